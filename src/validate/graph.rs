//! Insertion-ordered registry of named document entities.

use crate::HasName;
use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Zone,
    Surface,
    Fenestration,
    Construction,
    Material,
    Schedule,
    ScheduleTypeLimits,
    Thermostat,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Maps every declared `(kind, name)` to its position of declaration.
///
/// Names are unique within a kind; redeclarations are recorded
/// separately so the validator can report them.
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    entries: Vec<(EntityKind, String)>,
    index: HashMap<(EntityKind, String), usize>,
    duplicates: Vec<(EntityKind, String)>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every named entity of the document, section by section.
    pub fn build(doc: &Document) -> Self {
        let mut graph = Self::new();
        graph.declare_all(EntityKind::Material, &doc.materials);
        graph.declare_all(EntityKind::Construction, &doc.constructions);
        graph.declare_all(EntityKind::Zone, &doc.zones);
        graph.declare_all(EntityKind::Surface, &doc.surfaces);
        graph.declare_all(EntityKind::Fenestration, &doc.fenestrations);
        graph.declare_all(EntityKind::ScheduleTypeLimits, &doc.schedules.type_limits);
        graph.declare_all(EntityKind::Schedule, &doc.schedules.compact);
        graph.declare_all(EntityKind::Thermostat, &doc.hvac.thermostats);
        graph
    }

    fn declare_all<T: HasName>(&mut self, kind: EntityKind, items: &[T]) {
        for item in items {
            self.declare(kind, item.name());
        }
    }

    /// Declares an entity. Returns false if the name was already taken
    /// within its kind.
    pub fn declare(&mut self, kind: EntityKind, name: &str) -> bool {
        let key = (kind, name.to_string());
        if self.index.contains_key(&key) {
            if !self.duplicates.contains(&key) {
                self.duplicates.push(key);
            }
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(key);
        true
    }

    pub fn contains(&self, kind: EntityKind, name: &str) -> bool {
        self.index.contains_key(&(kind, name.to_string()))
    }

    /// Declaration position of an entity.
    pub fn position(&self, kind: EntityKind, name: &str) -> Option<usize> {
        self.index.get(&(kind, name.to_string())).copied()
    }

    /// Declared entities in insertion order.
    pub fn entries(&self) -> &[(EntityKind, String)] {
        &self.entries
    }

    pub fn duplicates(&self) -> &[(EntityKind, String)] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut g = ReferenceGraph::new();
        assert!(g.declare(EntityKind::Zone, "A"));
        assert!(g.declare(EntityKind::Surface, "A"));
        assert!(!g.declare(EntityKind::Zone, "A"));
        assert!(!g.declare(EntityKind::Zone, "A"));
        assert_eq!(g.len(), 2);
        assert_eq!(g.position(EntityKind::Surface, "A"), Some(1));
        assert!(g.contains(EntityKind::Zone, "A"));
        assert!(!g.contains(EntityKind::Material, "A"));
        assert_eq!(g.duplicates(), &[(EntityKind::Zone, "A".to_string())]);
    }

    #[test]
    fn test_build_from_document() {
        let mut doc = Document::new("test");
        doc.materials = crate::sim::materials::presets();
        let g = ReferenceGraph::build(&doc);
        assert_eq!(g.len(), doc.materials.len());
        assert_eq!(g.entries()[0].0, EntityKind::Material);
        assert!(g.duplicates().is_empty());
    }
}
