use crate::HasName;
use serde::{Deserialize, Serialize};

/// Construction assembly: ordered material layers, outside to inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    pub name: String,
    /// Material names, outermost layer first.
    pub layers: Vec<String>,
}

impl HasName for Construction {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Construction {
    pub fn new(name: &str, layers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            layers: layers.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the same assembly seen from the other side.
    ///
    /// Used for the ceiling that mirrors an interior floor.
    pub fn reversed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            layers: self.layers.iter().rev().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_layers() {
        let floor = Construction::new(
            "Interior_Floor",
            &["Timber_Flooring_25mm", "Concrete_200mm", "Gypsum_13mm"],
        );
        let ceiling = floor.reversed("Interior_Ceiling");
        assert_eq!(ceiling.name, "Interior_Ceiling");
        assert_eq!(
            ceiling.layers,
            vec!["Gypsum_13mm", "Concrete_200mm", "Timber_Flooring_25mm"]
        );
    }
}
