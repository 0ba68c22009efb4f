//! Cardinal wall orientations and their vertex winding.
//!
//! Coordinate convention: +X points east, +Y points north, +Z points up.
//!
//! Every loop produced here starts at the upper-left corner and runs
//! counterclockwise when viewed from outside the zone, so its right-hand
//! normal is the outward normal of the wall.

use crate::Point;
use crate::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    pub fn outward_normal(&self) -> Vector {
        match self {
            Orientation::North => Vector::new(0., 1., 0.),
            Orientation::East => Vector::new(1., 0., 0.),
            Orientation::South => Vector::new(0., -1., 0.),
            Orientation::West => Vector::new(-1., 0., 0.),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Orientation::North => Orientation::South,
            Orientation::East => Orientation::West,
            Orientation::South => Orientation::North,
            Orientation::West => Orientation::East,
        }
    }

    /// Orientation whose outward normal matches `vn`, if any.
    pub fn from_normal(vn: &Vector) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|o| o.outward_normal().dot(*vn) > 1.0 - 1e-6)
    }

    /// Wall loop of the box `[min, max]` facing this orientation.
    ///
    /// Lookup table of the four fixed vertex orders:
    ///
    /// | wall  | plane  | start (upper-left) | traversal        |
    /// |-------|--------|--------------------|------------------|
    /// | North | y=ymax | (xmax, ymax, zmax) | down, -X, up     |
    /// | East  | x=xmax | (xmax, ymin, zmax) | down, +Y, up     |
    /// | South | y=ymin | (xmin, ymin, zmax) | down, +X, up     |
    /// | West  | x=xmin | (xmin, ymax, zmax) | down, -Y, up     |
    pub fn wall_loop(&self, min: Point, max: Point) -> [Point; 4] {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);
        match self {
            Orientation::North => [
                Point::new(x1, y1, z1),
                Point::new(x1, y1, z0),
                Point::new(x0, y1, z0),
                Point::new(x0, y1, z1),
            ],
            Orientation::East => [
                Point::new(x1, y0, z1),
                Point::new(x1, y0, z0),
                Point::new(x1, y1, z0),
                Point::new(x1, y1, z1),
            ],
            Orientation::South => [
                Point::new(x0, y0, z1),
                Point::new(x0, y0, z0),
                Point::new(x1, y0, z0),
                Point::new(x1, y0, z1),
            ],
            Orientation::West => [
                Point::new(x0, y1, z1),
                Point::new(x0, y1, z0),
                Point::new(x0, y0, z0),
                Point::new(x0, y0, z1),
            ],
        }
    }

    /// Horizontal direction pointing to the right of an observer standing
    /// outside the wall and looking at it.
    pub fn right(&self) -> Vector {
        self.outward_normal().cross(Vector::new(0., 0., 1.)) * -1.0
    }

    /// Lower-left corner of the wall of box `[min, max]` seen from outside.
    pub fn lower_left(&self, min: Point, max: Point) -> Point {
        match self {
            Orientation::North => Point::new(max.x, max.y, min.z),
            Orientation::East => Point::new(max.x, min.y, min.z),
            Orientation::South => Point::new(min.x, min.y, min.z),
            Orientation::West => Point::new(min.x, max.y, min.z),
        }
    }

    /// Loop of the sub-rectangle `[u0, u1] x [v0, v1]` in wall-local
    /// coordinates (u to the right from the lower-left corner, v up).
    ///
    /// Winding matches `wall_loop`.
    pub fn local_loop(
        &self,
        min: Point,
        max: Point,
        (u0, u1): (f64, f64),
        (v0, v1): (f64, f64),
    ) -> [Point; 4] {
        let origin = self.lower_left(min, max);
        let right = self.right();
        let up = Vector::new(0., 0., 1.);
        let at = |u: f64, v: f64| origin + right * u + up * v;
        [at(u0, v1), at(u0, v0), at(u1, v0), at(u1, v1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Orientation::North => "North",
            Orientation::East => "East",
            Orientation::South => "South",
            Orientation::West => "West",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> (Point, Point) {
        (Point::new(1., 2., 3.), Point::new(4., 6., 5.5))
    }

    #[test]
    fn test_wall_loops_face_outwards() {
        let (min, max) = unit_box();
        for o in Orientation::ALL {
            let pts = o.wall_loop(min, max);
            let vn = Vector::loop_normal(&pts).unwrap();
            assert!(
                vn.is_close(&o.outward_normal()),
                "{o} wall normal is {vn}"
            );
            // Upper-left corner first
            assert!((pts[0].z - max.z).abs() < 1e-12);
            assert!((pts[1].z - min.z).abs() < 1e-12);
        }
    }

    #[test]
    fn test_right_direction() {
        assert!(Orientation::South.right().is_close(&Vector::new(1., 0., 0.)));
        assert!(Orientation::North.right().is_close(&Vector::new(-1., 0., 0.)));
        assert!(Orientation::East.right().is_close(&Vector::new(0., 1., 0.)));
        assert!(Orientation::West.right().is_close(&Vector::new(0., -1., 0.)));
    }

    #[test]
    fn test_local_loop_matches_table() {
        let (min, max) = unit_box();
        for o in Orientation::ALL {
            let length = match o {
                Orientation::North | Orientation::South => max.x - min.x,
                Orientation::East | Orientation::West => max.y - min.y,
            };
            let full = o.local_loop(min, max, (0., length), (0., max.z - min.z));
            let table = o.wall_loop(min, max);
            for (a, b) in full.iter().zip(table.iter()) {
                assert!(a.is_close(b), "{o}: {a} != {b}");
            }
        }
    }

    #[test]
    fn test_from_normal_and_opposite() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_normal(&o.outward_normal()), Some(o));
            assert_eq!(o.opposite().opposite(), o);
        }
        assert_eq!(Orientation::from_normal(&Vector::new(0., 0., 1.)), None);
    }
}
