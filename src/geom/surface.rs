//! Zone bounding surfaces.

use crate::HasName;
use crate::Point;
use crate::Vector;
use crate::geom::orientation::Orientation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a surface in the document surface table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Floor,
    Wall,
    Ceiling,
    Roof,
}

/// What lies beyond the outside face of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryCondition {
    Ground,
    Outdoors,
    /// Paired with a surface of another zone (see `Surface::reciprocal`).
    Surface,
    Adiabatic,
}

/// Position of a surface within its zone box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceRole {
    Floor,
    /// Ceiling or roof, depending on the surface kind.
    Top,
    Wall(Orientation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub name: String,
    pub zone: String,
    pub kind: SurfaceKind,
    pub role: SurfaceRole,
    pub construction: String,
    pub boundary: BoundaryCondition,
    pub sun_exposed: bool,
    pub wind_exposed: bool,
    pub vertices: Vec<Point>,
    /// Paired surface, only set when `boundary` is `BoundaryCondition::Surface`.
    pub reciprocal: Option<SurfaceId>,
}

impl HasName for Surface {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Surface {
    /// Outward unit normal of the vertex loop.
    pub fn normal(&self) -> Option<Vector> {
        Vector::loop_normal(&self.vertices)
    }

    /// Area of the (planar) vertex loop.
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }
}

impl SurfaceRole {
    /// Name suffix of the role, e.g. `Wall_North`.
    pub fn suffix(&self, kind: SurfaceKind) -> String {
        match (self, kind) {
            (SurfaceRole::Floor, _) => "Floor".to_string(),
            (SurfaceRole::Top, SurfaceKind::Roof) => "Roof".to_string(),
            (SurfaceRole::Top, _) => "Ceiling".to_string(),
            (SurfaceRole::Wall(o), _) => format!("Wall_{o}"),
        }
    }
}

/// Derives the document-wide surface name `{zone}_{role}`.
pub fn surface_name(zone: &str, kind: SurfaceKind, role: SurfaceRole) -> String {
    format!("{zone}_{}", role.suffix(kind))
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BoundaryCondition::Ground => "Ground",
            BoundaryCondition::Outdoors => "Outdoors",
            BoundaryCondition::Surface => "Surface",
            BoundaryCondition::Adiabatic => "Adiabatic",
        };
        f.write_str(s)
    }
}

/// Area of a planar polygon (Newell's method).
pub fn polygon_area(pts: &[Point]) -> f64 {
    if pts.len() < 3 {
        return 0.0;
    }
    let mut n = Vector::new(0., 0., 0.);
    for (i, a) in pts.iter().enumerate() {
        let b = pts[(i + 1) % pts.len()];
        n.dx += (a.y - b.y) * (a.z + b.z);
        n.dy += (a.z - b.z) * (a.x + b.x);
        n.dz += (a.x - b.x) * (a.y + b.y);
    }
    0.5 * n.length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::IsClose;

    #[test]
    fn test_surface_name() {
        assert_eq!(
            surface_name("F1_Core", SurfaceKind::Wall, SurfaceRole::Wall(Orientation::East)),
            "F1_Core_Wall_East"
        );
        assert_eq!(
            surface_name("F2_Core", SurfaceKind::Roof, SurfaceRole::Top),
            "F2_Core_Roof"
        );
        assert_eq!(
            surface_name("F1_Core", SurfaceKind::Ceiling, SurfaceRole::Top),
            "F1_Core_Ceiling"
        );
    }

    #[test]
    fn test_polygon_area() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(0., 0., 3.),
            Point::new(4., 0., 3.),
            Point::new(4., 0., 0.),
        ];
        assert!(polygon_area(&pts).is_close(12.0));
        assert!(polygon_area(&pts[..2]).is_close(0.0));
    }
}
