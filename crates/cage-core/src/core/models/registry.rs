use std::collections::HashMap;

/// Name of the type every graph registers first and assigns by default.
pub const DEFAULT_VERTEX_TYPE: &str = "VER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VertexTypeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexType {
    pub name: String,
    /// Number of vertices currently carrying this type.
    pub count: usize,
}

/// Bookkeeping table of named vertex types and how many vertices use each.
///
/// Types carry no topological meaning; they only let callers tag vertices
/// (for example by the kind of face that created them) and count the tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexTypeRegistry {
    types: Vec<VertexType>,
    by_name: HashMap<String, VertexTypeId>,
}

impl Default for VertexTypeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
        };
        registry.register(DEFAULT_VERTEX_TYPE);
        registry
    }
}

impl VertexTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type name, returning the existing id if it is already known.
    pub fn register(&mut self, name: &str) -> VertexTypeId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = VertexTypeId(self.types.len());
        self.types.push(VertexType {
            name: name.to_string(),
            count: 0,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, id: VertexTypeId) -> Option<&VertexType> {
        self.types.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<VertexTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexTypeId, &VertexType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (VertexTypeId(i), t))
    }

    pub(crate) fn increment(&mut self, id: VertexTypeId) {
        if let Some(t) = self.types.get_mut(id.0) {
            t.count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_contains_default_type() {
        let registry = VertexTypeRegistry::new();
        assert_eq!(registry.len(), 1);
        let id = registry.find(DEFAULT_VERTEX_TYPE).unwrap();
        assert_eq!(id, VertexTypeId::default());
        assert_eq!(registry.get(id).unwrap().count, 0);
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = VertexTypeRegistry::new();
        let pen = registry.register("PEN");
        let again = registry.register("PEN");
        assert_eq!(pen, again);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn increment_updates_component_count() {
        let mut registry = VertexTypeRegistry::new();
        let hex = registry.register("HEX");
        registry.increment(hex);
        registry.increment(hex);
        assert_eq!(registry.get(hex).unwrap().count, 2);
        assert_eq!(registry.get(VertexTypeId::default()).unwrap().count, 0);
    }
}
