use crate::core::models::system::MolecularSystem;
use crate::core::selection::Selection;
use crate::language::parser::Vocabulary;
use std::collections::HashMap;

/// Caller-owned named selections that queries can refer to by name.
#[derive(Debug, Clone, Default)]
pub struct SelectionRegistry {
    registry: HashMap<String, Selection>,
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a selection under its own name, returning the one it replaces.
    pub fn insert(&mut self, selection: Selection) -> Option<Selection> {
        self.registry.insert(selection.name().to_string(), selection)
    }

    pub fn get(&self, name: &str) -> Option<&Selection> {
        self.registry.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Selection> {
        self.registry.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The parser vocabulary for `system` plus every registered name.
    pub fn vocabulary(&self, system: &MolecularSystem) -> Vocabulary {
        let mut vocabulary = Vocabulary::new();
        for name in system.structure_names() {
            vocabulary.add_structure(name);
        }
        for name in self.names() {
            vocabulary.add_selection(name);
        }
        vocabulary
    }
}
