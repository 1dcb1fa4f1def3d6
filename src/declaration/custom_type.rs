use super::{Category, Declaration};
use crate::manifest::TypeRegistry;
use crate::schema::{ObjectParameter, ParameterDefinition, builtin};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A named, reusable parameter definition.
///
/// `CustomType` is a cheap handle: clones share the same underlying type.
/// A type may be declared first and defined later, which is the only way to
/// build self-referential type graphs. Such cycles hold each other alive for
/// as long as the program runs.
#[derive(Clone)]
pub struct CustomType {
    inner: Arc<CustomTypeInner>,
}

struct CustomTypeInner {
    id: String,
    definition: OnceLock<ParameterDefinition>,
}

impl CustomType {
    pub fn new(id: &str, definition: ParameterDefinition) -> Self {
        let ty = Self::declare(id);
        let _ = ty.inner.definition.set(definition);
        ty
    }

    /// Creates a type whose definition is supplied later through [`CustomType::define`].
    pub fn declare(id: &str) -> Self {
        Self {
            inner: Arc::new(CustomTypeInner {
                id: id.to_string(),
                definition: OnceLock::new(),
            }),
        }
    }

    /// Attaches the definition of a declared type. Returns the definition
    /// back if the type was already defined.
    pub fn define(&self, definition: ParameterDefinition) -> Result<(), ParameterDefinition> {
        self.inner.definition.set(definition)
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn definition(&self) -> Option<&ParameterDefinition> {
        self.inner.definition.get()
    }

    /// Whether this type lives in the reserved platform namespace.
    pub fn is_builtin(&self) -> bool {
        builtin::is_reserved(&self.inner.id)
    }

    /// The string parameters use to point at this type.
    pub fn reference(&self) -> String {
        if self.inner.id.contains("#/") {
            self.inner.id.clone()
        } else {
            format!("#/types/{}", self.inner.id)
        }
    }

    /// True if both handles point at the same type.
    pub fn ptr_eq(&self, other: &CustomType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// Only the id is printed; the definition may lead back to this type.
impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomType").field(&self.inner.id).finish()
    }
}

impl Declaration for CustomType {
    const CATEGORY: Category = Category::CustomType;
    type Fragment = ParameterDefinition;

    fn id(&self) -> &str {
        CustomType::id(self)
    }

    /// An undefined type exports as an open object.
    fn export(&self) -> ParameterDefinition {
        self.definition()
            .cloned()
            .unwrap_or_else(|| ParameterDefinition::object(ObjectParameter::new()))
    }

    fn register_parameter_types(&self, registry: &mut TypeRegistry) {
        if let Some(definition) = self.definition() {
            registry.scan_definition(definition);
        }
    }
}
