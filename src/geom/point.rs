use crate::Vector;
use crate::geom::{EPS, KEY_DECIMALS, round_to};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Integer key of a point rounded to a fixed number of decimals.
///
/// Used wherever vertices have to be counted or compared exactly
/// (closure tallies, deduplication).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(i64, i64, i64);

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        Vector::from_points(*self, *other).length()
    }

    /// Returns a copy with every coordinate rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            x: round_to(self.x, decimals),
            y: round_to(self.y, decimals),
            z: round_to(self.z, decimals),
        }
    }

    pub fn key(&self) -> PointKey {
        let scale = 10f64.powi(KEY_DECIMALS);
        PointKey(
            (self.x * scale).round() as i64,
            (self.y * scale).round() as i64,
            (self.z * scale).round() as i64,
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

// Implement +
// (Sub is NOT implemented, use Vector::from_points)
impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
            z: self.z + other.dz,
        }
    }
}

/// Smallest pairwise distance between points of a loop.
///
/// Returns `f64::INFINITY` for loops with fewer than 2 points.
pub fn min_pairwise_distance(pts: &[Point]) -> f64 {
    let mut min_d = f64::INFINITY;
    for (i, a) in pts.iter().enumerate() {
        for b in pts.iter().skip(i + 1) {
            min_d = min_d.min(a.distance(b));
        }
    }
    min_d
}
