use super::builtin::BuiltinType;
use crate::declaration::CustomType;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// The closed set of primitive parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Boolean,
    Integer,
    Number,
    /// A type provided by the platform itself, e.g. `slack#/types/user_id`.
    Builtin(BuiltinType),
}

impl PrimitiveType {
    /// The value written to the `type` field of the manifest.
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::Builtin(builtin) => builtin.id(),
        }
    }
}

/// Constraints that only apply to primitive parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveConstraints {
    pub enumeration: Option<Vec<Value>>,
    pub choices: Option<Vec<Value>>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub format: Option<String>,
}

/// An object parameter. `required` is serialized as declared and is not
/// checked against the keys of `properties`.
#[derive(Debug, Clone, Default)]
pub struct ObjectParameter {
    pub properties: IndexMap<String, ParameterDefinition>,
    pub required: Option<Vec<String>>,
    pub additional_properties: Option<bool>,
}

impl ObjectParameter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: &str, definition: ParameterDefinition) -> Self {
        self.properties.insert(name.to_string(), definition);
        self
    }

    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArrayParameter {
    pub items: Option<Box<ParameterDefinition>>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

/// The shape-specific part of a parameter definition.
#[derive(Debug, Clone)]
pub enum ParameterKind {
    Primitive(PrimitiveType, PrimitiveConstraints),
    Object(ObjectParameter),
    Array(ArrayParameter),
    /// A reference to a named custom type. Serializes as the type's reference only.
    Custom(CustomType),
}

/// A named value description: the unit used for inputs, outputs, datastore
/// attributes, custom types and custom events.
#[derive(Debug, Clone)]
pub struct ParameterDefinition {
    pub kind: ParameterKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub hint: Option<String>,
    pub default: Option<Value>,
    pub examples: Option<Vec<Value>>,
}

impl ParameterDefinition {
    pub fn new(kind: ParameterKind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
            hint: None,
            default: None,
            examples: None,
        }
    }

    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::new(ParameterKind::Primitive(ty, PrimitiveConstraints::default()))
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveType::String)
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveType::Boolean)
    }

    pub fn integer() -> Self {
        Self::primitive(PrimitiveType::Integer)
    }

    pub fn number() -> Self {
        Self::primitive(PrimitiveType::Number)
    }

    pub fn builtin(ty: BuiltinType) -> Self {
        Self::primitive(PrimitiveType::Builtin(ty))
    }

    pub fn object(object: ObjectParameter) -> Self {
        Self::new(ParameterKind::Object(object))
    }

    pub fn array(items: ParameterDefinition) -> Self {
        Self::new(ParameterKind::Array(ArrayParameter {
            items: Some(Box::new(items)),
            ..ArrayParameter::default()
        }))
    }

    pub fn custom(ty: &CustomType) -> Self {
        Self::new(ParameterKind::Custom(ty.clone()))
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn examples(mut self, examples: Vec<Value>) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Applies `f` to the primitive constraints. No-op for non-primitive kinds.
    pub fn constrain(mut self, f: impl FnOnce(&mut PrimitiveConstraints)) -> Self {
        if let ParameterKind::Primitive(_, constraints) = &mut self.kind {
            f(constraints);
        }
        self
    }

    pub fn min_items(mut self, min: u64) -> Self {
        if let ParameterKind::Array(array) = &mut self.kind {
            array.min_items = Some(min);
        }
        self
    }

    pub fn max_items(mut self, max: u64) -> Self {
        if let ParameterKind::Array(array) = &mut self.kind {
            array.max_items = Some(max);
        }
        self
    }

    /// The custom type this parameter points at, if it is a reference.
    pub fn custom_type(&self) -> Option<&CustomType> {
        match &self.kind {
            ParameterKind::Custom(ty) => Some(ty),
            _ => None,
        }
    }

    /// Visits every custom type named directly in this definition's inline
    /// structure. Object properties and array items are walked, but a custom
    /// type's own definition is never entered.
    pub fn for_each_direct_reference(&self, f: &mut dyn FnMut(&CustomType)) {
        match &self.kind {
            ParameterKind::Custom(ty) => f(ty),
            ParameterKind::Object(object) => {
                for property in object.properties.values() {
                    property.for_each_direct_reference(f);
                }
            }
            ParameterKind::Array(array) => {
                if let Some(items) = &array.items {
                    items.for_each_direct_reference(f);
                }
            }
            ParameterKind::Primitive(..) => {}
        }
    }
}

impl Serialize for ParameterDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.kind {
            ParameterKind::Primitive(ty, _) => map.serialize_entry("type", ty.type_name())?,
            ParameterKind::Object(_) => map.serialize_entry("type", "object")?,
            ParameterKind::Array(_) => map.serialize_entry("type", "array")?,
            ParameterKind::Custom(ty) => map.serialize_entry("type", &ty.reference())?,
        }
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(hint) = &self.hint {
            map.serialize_entry("hint", hint)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if let Some(examples) = &self.examples {
            map.serialize_entry("examples", examples)?;
        }

        match &self.kind {
            ParameterKind::Primitive(_, c) => {
                if let Some(values) = &c.enumeration {
                    map.serialize_entry("enum", values)?;
                }
                if let Some(choices) = &c.choices {
                    map.serialize_entry("choices", choices)?;
                }
                if let Some(min) = c.min_length {
                    map.serialize_entry("minLength", &min)?;
                }
                if let Some(max) = c.max_length {
                    map.serialize_entry("maxLength", &max)?;
                }
                if let Some(min) = c.minimum {
                    map.serialize_entry("minimum", &min)?;
                }
                if let Some(max) = c.maximum {
                    map.serialize_entry("maximum", &max)?;
                }
                if let Some(format) = &c.format {
                    map.serialize_entry("format", format)?;
                }
            }
            ParameterKind::Object(object) => {
                map.serialize_entry("properties", &object.properties)?;
                if let Some(required) = &object.required {
                    map.serialize_entry("required", required)?;
                }
                if let Some(additional) = object.additional_properties {
                    map.serialize_entry("additionalProperties", &additional)?;
                }
            }
            ParameterKind::Array(array) => {
                if let Some(items) = &array.items {
                    map.serialize_entry("items", items)?;
                }
                if let Some(min) = array.min_items {
                    map.serialize_entry("minItems", &min)?;
                }
                if let Some(max) = array.max_items {
                    map.serialize_entry("maxItems", &max)?;
                }
            }
            ParameterKind::Custom(_) => {}
        }
        map.end()
    }
}

/// The `{ properties, required }` block used for function and workflow
/// inputs and outputs. Always serializes both keys.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ParameterSet {
    pub properties: IndexMap<String, ParameterDefinition>,
    pub required: Vec<String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: &str, definition: ParameterDefinition) -> Self {
        self.properties.insert(name.to_string(), definition);
        self
    }

    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn for_each_direct_reference(&self, f: &mut dyn FnMut(&CustomType)) {
        for definition in self.properties.values() {
            definition.for_each_direct_reference(f);
        }
    }
}
