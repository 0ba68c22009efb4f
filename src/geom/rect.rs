//! Axis-aligned plan rectangles and their edge contacts.

use crate::geom::orientation::Orientation;
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing plan coordinates of zone edges.
pub const EDGE_TOL: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
}

/// How one rectangle's side touches another rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeContact {
    /// The side of `self` facing `Orientation` coincides with the opposite
    /// side of the other rectangle over its full length.
    Exact(Orientation),
    /// The sides are coplanar and overlap, but their spans differ.
    Partial(Orientation),
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, depth: f64) -> Self {
        Self {
            x,
            y,
            width,
            depth,
        }
    }

    pub fn x1(&self) -> f64 {
        self.x + self.width
    }

    pub fn y1(&self) -> f64 {
        self.y + self.depth
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    /// Plan coordinate of the side facing `o` and its span along the other axis.
    fn side(&self, o: Orientation) -> (f64, (f64, f64)) {
        match o {
            Orientation::North => (self.y1(), (self.x, self.x1())),
            Orientation::South => (self.y, (self.x, self.x1())),
            Orientation::East => (self.x1(), (self.y, self.y1())),
            Orientation::West => (self.x, (self.y, self.y1())),
        }
    }

    /// Returns true if the side facing `o` lies on the boundary of `outer`.
    pub fn is_on_boundary(&self, o: Orientation, outer: &Rect) -> bool {
        let (c, _) = self.side(o);
        let (outer_c, _) = outer.side(o);
        (c - outer_c).abs() < EDGE_TOL
    }

    /// Finds the side of `self` that touches `other`, if any.
    ///
    /// Rectangles meeting only at a corner do not touch.
    pub fn contact(&self, other: &Rect) -> Option<EdgeContact> {
        for o in Orientation::ALL {
            let (c1, (a1, b1)) = self.side(o);
            let (c2, (a2, b2)) = other.side(o.opposite());
            if (c1 - c2).abs() >= EDGE_TOL {
                continue;
            }
            let overlap = b1.min(b2) - a1.max(a2);
            if overlap <= EDGE_TOL {
                continue;
            }
            if (a1 - a2).abs() < EDGE_TOL && (b1 - b2).abs() < EDGE_TOL {
                return Some(EdgeContact::Exact(o));
            }
            return Some(EdgeContact::Partial(o));
        }
        None
    }

    /// Returns true if both rectangles cover the same plan area.
    pub fn matches(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() < EDGE_TOL
            && (self.y - other.y).abs() < EDGE_TOL
            && (self.width - other.width).abs() < EDGE_TOL
            && (self.depth - other.depth).abs() < EDGE_TOL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_contact() {
        let a = Rect::new(0., 0., 2., 3.);
        let b = Rect::new(2., 0., 4., 3.);
        assert_eq!(a.contact(&b), Some(EdgeContact::Exact(Orientation::East)));
        assert_eq!(b.contact(&a), Some(EdgeContact::Exact(Orientation::West)));

        let c = Rect::new(0., 3., 2., 1.);
        assert_eq!(a.contact(&c), Some(EdgeContact::Exact(Orientation::North)));
        assert_eq!(c.contact(&a), Some(EdgeContact::Exact(Orientation::South)));
    }

    #[test]
    fn test_partial_contact() {
        let a = Rect::new(0., 0., 2., 3.);
        let b = Rect::new(2., 1., 2., 5.);
        assert_eq!(a.contact(&b), Some(EdgeContact::Partial(Orientation::East)));
    }

    #[test]
    fn test_corner_touch_is_not_contact() {
        let a = Rect::new(0., 0., 2., 2.);
        let b = Rect::new(2., 2., 2., 2.);
        assert_eq!(a.contact(&b), None);
        let far = Rect::new(5., 0., 1., 1.);
        assert_eq!(a.contact(&far), None);
    }

    #[test]
    fn test_is_on_boundary() {
        let outer = Rect::new(0., 0., 10., 10.);
        let r = Rect::new(0., 5., 5., 5.);
        assert!(r.is_on_boundary(Orientation::West, &outer));
        assert!(r.is_on_boundary(Orientation::North, &outer));
        assert!(!r.is_on_boundary(Orientation::East, &outer));
        assert!(!r.is_on_boundary(Orientation::South, &outer));
    }
}
