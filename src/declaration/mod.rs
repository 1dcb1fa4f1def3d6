//! Declaration nodes: the typed building blocks of an application.
//!
//! Every node category implements [`Declaration`], which exposes the node's
//! stable id, its manifest fragment and the custom types it references.
//! [`DeclarationNode`] is the closed sum over all categories and is what the
//! compiler walks when discovering types.

use crate::manifest::TypeRegistry;
use serde::Serialize;
use std::fmt;

pub mod conversion;
pub mod custom_type;
pub mod datastore;
pub mod event;
pub mod function;
pub mod provider;
pub mod widget;
pub mod workflow;

pub use conversion::*;
pub use custom_type::*;
pub use datastore::*;
pub use event::*;
pub use function::*;
pub use provider::*;
pub use widget::*;
pub use workflow::*;

/// The manifest section a declaration belongs to. Ids are unique per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Function,
    Workflow,
    CustomType,
    Datastore,
    CustomEvent,
    Provider,
    Widget,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Function => "Function",
            Category::Workflow => "Workflow",
            Category::CustomType => "CustomType",
            Category::Datastore => "Datastore",
            Category::CustomEvent => "CustomEvent",
            Category::Provider => "Provider",
            Category::Widget => "Widget",
        };
        write!(f, "{}", name)
    }
}

/// The capability shared by every declaration category.
pub trait Declaration {
    const CATEGORY: Category;

    /// The serialized form stored under this node's id in the manifest.
    type Fragment: Serialize;

    fn id(&self) -> &str;

    fn export(&self) -> Self::Fragment;

    /// Adds every custom type this node references directly to `registry`.
    fn register_parameter_types(&self, _registry: &mut TypeRegistry) {}
}

/// A borrowed view of any declaration, used to walk the application tree.
#[derive(Debug, Clone, Copy)]
pub enum DeclarationNode<'a> {
    Function(&'a FunctionDefinition),
    Workflow(&'a WorkflowDefinition),
    Datastore(&'a DatastoreDefinition),
    CustomType(&'a CustomType),
    CustomEvent(&'a CustomEvent),
    Provider(&'a ProviderDefinition),
    Widget(&'a WidgetDefinition),
}

impl DeclarationNode<'_> {
    pub fn id(&self) -> &str {
        match self {
            DeclarationNode::Function(node) => node.id(),
            DeclarationNode::Workflow(node) => node.id(),
            DeclarationNode::Datastore(node) => node.id(),
            DeclarationNode::CustomType(node) => Declaration::id(*node),
            DeclarationNode::CustomEvent(node) => node.id(),
            DeclarationNode::Provider(node) => node.id(),
            DeclarationNode::Widget(node) => node.id(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            DeclarationNode::Function(_) => FunctionDefinition::CATEGORY,
            DeclarationNode::Workflow(_) => WorkflowDefinition::CATEGORY,
            DeclarationNode::Datastore(_) => DatastoreDefinition::CATEGORY,
            DeclarationNode::CustomType(_) => CustomType::CATEGORY,
            DeclarationNode::CustomEvent(_) => CustomEvent::CATEGORY,
            DeclarationNode::Provider(_) => ProviderDefinition::CATEGORY,
            DeclarationNode::Widget(_) => WidgetDefinition::CATEGORY,
        }
    }

    pub fn register_parameter_types(&self, registry: &mut TypeRegistry) {
        match self {
            DeclarationNode::Function(node) => node.register_parameter_types(registry),
            DeclarationNode::Workflow(node) => node.register_parameter_types(registry),
            DeclarationNode::Datastore(node) => node.register_parameter_types(registry),
            DeclarationNode::CustomType(node) => node.register_parameter_types(registry),
            DeclarationNode::CustomEvent(node) => node.register_parameter_types(registry),
            DeclarationNode::Provider(node) => node.register_parameter_types(registry),
            DeclarationNode::Widget(node) => node.register_parameter_types(registry),
        }
    }
}
