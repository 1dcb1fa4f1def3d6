use super::builtin::BuiltinBase;
use super::parameter::{ParameterDefinition, ParameterKind, PrimitiveType};
use indexmap::IndexMap;
use std::fmt;

/// Custom-type references are followed at most this many times before the
/// shape degrades to [`RuntimeShape::Unknown`].
pub const MAX_TYPE_DEPTH: usize = 5;

/// The concrete runtime shape a parameter definition describes.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeShape {
    String,
    Number,
    Boolean,
    Array(Box<RuntimeShape>),
    Object {
        properties: IndexMap<String, RuntimeShape>,
        required: Vec<String>,
        /// Whether unknown keys are permitted (`additionalProperties` unset or `true`).
        open: bool,
    },
    /// Depth exhausted, or nothing more is known about the value.
    Unknown,
}

impl RuntimeShape {
    fn open_object() -> Self {
        RuntimeShape::Object {
            properties: IndexMap::new(),
            required: Vec::new(),
            open: true,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, RuntimeShape::Unknown)
    }
}

/// Resolves `definition` into its runtime shape.
///
/// Total over every definition: cycles through custom types and definitions
/// nested deeper than [`MAX_TYPE_DEPTH`] references resolve to
/// [`RuntimeShape::Unknown`] instead of expanding forever.
pub fn resolve_runtime_type(definition: &ParameterDefinition, depth: usize) -> RuntimeShape {
    if depth >= MAX_TYPE_DEPTH {
        return RuntimeShape::Unknown;
    }
    match &definition.kind {
        ParameterKind::Primitive(ty, _) => primitive_shape(ty),
        ParameterKind::Array(array) => RuntimeShape::Array(Box::new(
            array
                .items
                .as_deref()
                .map(|items| resolve_runtime_type(items, depth))
                .unwrap_or(RuntimeShape::Unknown),
        )),
        ParameterKind::Object(object) => RuntimeShape::Object {
            properties: object
                .properties
                .iter()
                .map(|(name, property)| (name.clone(), resolve_runtime_type(property, depth)))
                .collect(),
            required: object.required.clone().unwrap_or_default(),
            open: object.additional_properties != Some(false),
        },
        ParameterKind::Custom(ty) => match ty.definition() {
            Some(inner) => resolve_runtime_type(inner, depth + 1),
            None => RuntimeShape::Unknown,
        },
    }
}

fn primitive_shape(ty: &PrimitiveType) -> RuntimeShape {
    match ty {
        PrimitiveType::String => RuntimeShape::String,
        PrimitiveType::Boolean => RuntimeShape::Boolean,
        PrimitiveType::Integer | PrimitiveType::Number => RuntimeShape::Number,
        PrimitiveType::Builtin(builtin) => match builtin.base() {
            BuiltinBase::String => RuntimeShape::String,
            BuiltinBase::Number => RuntimeShape::Number,
            BuiltinBase::Boolean => RuntimeShape::Boolean,
            BuiltinBase::Object => RuntimeShape::open_object(),
            BuiltinBase::Array => RuntimeShape::Array(Box::new(RuntimeShape::Unknown)),
        },
    }
}

impl fmt::Display for RuntimeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeShape::String => write!(f, "string"),
            RuntimeShape::Number => write!(f, "number"),
            RuntimeShape::Boolean => write!(f, "boolean"),
            RuntimeShape::Unknown => write!(f, "unknown"),
            RuntimeShape::Array(items) => match **items {
                RuntimeShape::Object { .. } => write!(f, "Array<{}>", items),
                _ => write!(f, "{}[]", items),
            },
            RuntimeShape::Object {
                properties,
                required,
                open,
            } => {
                let mut fields: Vec<String> = properties
                    .iter()
                    .map(|(name, shape)| {
                        let optional = if required.contains(name) { "" } else { "?" };
                        format!("{}{}: {}", name, optional, shape)
                    })
                    .collect();
                if *open {
                    fields.push("[key: string]: unknown".to_string());
                }
                if fields.is_empty() {
                    write!(f, "{{}}")
                } else {
                    write!(f, "{{ {} }}", fields.join("; "))
                }
            }
        }
    }
}
