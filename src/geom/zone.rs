//! Thermal zone: a rectangular box owned by one floor partition.

use crate::HasName;
use crate::Point;
use crate::geom::rect::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    /// Floor index, 0 for the ground floor.
    pub floor: usize,
    /// Corner `(min(x), min(y), min(z))` of the zone box.
    pub origin: Point,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub multiplier: u32,
}

impl HasName for Zone {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Zone {
    pub fn new(
        name: &str,
        floor: usize,
        origin: Point,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            floor,
            origin,
            width,
            depth,
            height,
            multiplier: 1,
        }
    }

    /// Returns the zone box corners as (min_point, max_point).
    pub fn bbox(&self) -> (Point, Point) {
        let max = Point::new(
            self.origin.x + self.width,
            self.origin.y + self.depth,
            self.origin.z + self.height,
        );
        (self.origin, max)
    }

    /// Plan rectangle of the zone.
    pub fn rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.depth)
    }

    pub fn floor_area(&self) -> f64 {
        self.width * self.depth
    }

    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }
}
