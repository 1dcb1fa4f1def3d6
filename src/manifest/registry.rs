use crate::declaration::{CustomType, Declaration};
use crate::schema::{BUILTIN_NAMESPACE, ParameterDefinition, ParameterSet};
use ahash::AHashSet;
use tracing::{debug, trace};

/// The deduplicated set of custom types discovered during one compilation.
///
/// Entries keep insertion order, which is the order types appear in the
/// manifest. Types whose id starts with the reserved namespace are assumed to
/// be provided by the platform and are never added.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: Vec<CustomType>,
    known: AHashSet<String>,
    reserved_namespace: String,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::with_reserved_namespace(BUILTIN_NAMESPACE)
    }

    pub fn with_reserved_namespace(namespace: &str) -> Self {
        Self {
            entries: Vec::new(),
            known: AHashSet::new(),
            reserved_namespace: namespace.to_string(),
        }
    }

    /// Adds `ty` unless it is reserved or already present. Returns whether it was added.
    pub fn add(&mut self, ty: &CustomType) -> bool {
        if self.is_reserved(ty.id()) {
            trace!(type_id = ty.id(), "skipping reserved custom type");
            return false;
        }
        if !self.known.insert(ty.id().to_string()) {
            trace!(type_id = ty.id(), "custom type already registered");
            return false;
        }
        debug!(type_id = ty.id(), "registered custom type");
        self.entries.push(ty.clone());
        true
    }

    /// Adds every custom type referenced directly by `definition`.
    pub fn scan_definition(&mut self, definition: &ParameterDefinition) {
        definition.for_each_direct_reference(&mut |ty| {
            self.add(ty);
        });
    }

    /// Adds every custom type referenced directly by the properties of `parameters`.
    pub fn scan_parameters(&mut self, parameters: &ParameterSet) {
        parameters.for_each_direct_reference(&mut |ty| {
            self.add(ty);
        });
    }

    /// Lets every registered type register its own references, including
    /// types added while this runs. Terminates on cyclic type graphs because
    /// each id is added at most once.
    pub fn expand(&mut self) {
        let mut cursor = 0;
        while cursor < self.entries.len() {
            let ty = self.entries[cursor].clone();
            ty.register_parameter_types(self);
            cursor += 1;
        }
    }

    pub fn is_reserved(&self, id: &str) -> bool {
        id.starts_with(&self.reserved_namespace)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomType> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|ty| ty.id()).collect()
    }
}
