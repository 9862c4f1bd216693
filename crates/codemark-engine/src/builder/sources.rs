//! Registered source files, by name and sequential index.

use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub index: usize,
    pub data: Arc<str>,
}

impl Source {
    pub fn is_test(&self) -> bool {
        self.name.ends_with("_test.go")
    }
}

#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
    by_name: HashMap<String, usize>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `data` under `name` and return its index. Registering a
    /// name again replaces the data and keeps the index.
    pub fn add(&mut self, name: &str, data: impl Into<Arc<str>>) -> usize {
        let data = data.into();
        if let Some(&index) = self.by_name.get(name) {
            self.sources[index].data = data;
            return index;
        }
        let index = self.sources.len();
        self.sources.push(Source {
            name: name.to_string(),
            index,
            data,
        });
        self.by_name.insert(name.to_string(), index);
        index
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.by_name.get(name).map(|&i| &self.sources[i])
    }

    pub fn by_index(&self, index: usize) -> Option<&Source> {
        self.sources.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn indexes_are_sequential_and_stable() {
        let mut registry = SourceRegistry::new();
        assert_eq!(registry.add("a.go", "package a"), 0);
        assert_eq!(registry.add("b_test.go", "package a"), 1);
        assert_eq!(registry.add("a.go", "package a // v2"), 0);
        assert_eq!(registry.len(), 2);
        assert_eq!(&*registry.get("a.go").unwrap().data, "package a // v2");
        assert!(registry.by_index(1).unwrap().is_test());
        assert!(registry.get("c.go").is_none());
    }
}
