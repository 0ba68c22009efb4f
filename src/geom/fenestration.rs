use crate::HasName;
use crate::Point;
use serde::{Deserialize, Serialize};

/// Window sub-surface embedded in the plane of its parent wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fenestration {
    pub name: String,
    /// Name of the parent wall surface.
    pub surface: String,
    pub construction: String,
    pub vertices: Vec<Point>,
    /// Fraction of the parent wall the window covers after clamping.
    pub window_wall_ratio: f64,
    pub multiplier: u32,
}

impl HasName for Fenestration {
    fn name(&self) -> &str {
        &self.name
    }
}
