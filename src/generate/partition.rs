//! Footprint partitioning into zone rectangles.

use crate::Point;
use crate::error::{GenerationError, GenerationResult};
use crate::generate::descriptor::{BuildingDescriptor, ComplexityTier};
use crate::generate::footprint::Footprint;
use crate::geom::rect::Rect;
use crate::geom::zone::Zone;

/// Default perimeter zone depth (15 ft).
pub const DEFAULT_PERIMETER_DEPTH: f64 = 4.57;

/// Partition pattern applied identically to every floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartitionStrategy {
    /// `n` equal strips along the longer footprint axis.
    Linear(usize),
    /// `columns x rows` equal rectangles.
    Grid(usize, usize),
    /// Four corners, four edge zones and a core, with the given perimeter depth.
    PerimeterCore(f64),
}

impl PartitionStrategy {
    /// Selects the strategy for the descriptor's complexity tier.
    pub fn for_descriptor(desc: &BuildingDescriptor, fp: &Footprint) -> GenerationResult<Self> {
        let tier = desc.complexity;
        match tier {
            ComplexityTier::Simple => {
                let n = desc.zones_per_floor.unwrap_or(1);
                if !(1..=3).contains(&n) {
                    return Err(GenerationError::UnsupportedZoneCount { tier, count: n });
                }
                Ok(PartitionStrategy::Linear(n))
            }
            ComplexityTier::Medium => {
                if let Some((gx, gy)) = desc.grid {
                    let count = gx * gy;
                    if !(4..=8).contains(&count) {
                        return Err(GenerationError::UnsupportedZoneCount { tier, count });
                    }
                    return Ok(PartitionStrategy::Grid(gx, gy));
                }
                let n = desc.zones_per_floor.unwrap_or(4);
                if !(4..=8).contains(&n) {
                    return Err(GenerationError::UnsupportedZoneCount { tier, count: n });
                }
                let (gx, gy) = squarest_grid(n, fp);
                Ok(PartitionStrategy::Grid(gx, gy))
            }
            ComplexityTier::Complex => Ok(PartitionStrategy::PerimeterCore(
                desc.perimeter_depth.unwrap_or(DEFAULT_PERIMETER_DEPTH),
            )),
        }
    }

    /// Splits the footprint into named rectangles.
    ///
    /// Names carry no floor prefix; `zones_for_floor` adds it.
    pub fn partition(&self, fp: &Footprint) -> GenerationResult<Vec<(String, Rect)>> {
        match *self {
            PartitionStrategy::Linear(n) => Ok(linear(fp, n)),
            PartitionStrategy::Grid(gx, gy) => Ok(grid(fp, gx, gy)),
            PartitionStrategy::PerimeterCore(p) => perimeter_core(fp, p),
        }
    }
}

/// Grid with `n` cells whose cells are closest to square.
fn squarest_grid(n: usize, fp: &Footprint) -> (usize, usize) {
    let mut best = (1, n);
    let mut best_score = f64::INFINITY;
    for gx in 1..=n {
        if n % gx != 0 {
            continue;
        }
        let gy = n / gx;
        let cell_aspect = (fp.width / gx as f64) / (fp.depth / gy as f64);
        let score = cell_aspect.ln().abs();
        if score < best_score - 1e-12 {
            best = (gx, gy);
            best_score = score;
        }
    }
    best
}

fn linear(fp: &Footprint, n: usize) -> Vec<(String, Rect)> {
    let along_x = fp.width >= fp.depth;
    (0..n)
        .map(|i| {
            let rect = if along_x {
                let w = fp.width / n as f64;
                Rect::new(i as f64 * w, 0., w, fp.depth)
            } else {
                let d = fp.depth / n as f64;
                Rect::new(0., i as f64 * d, fp.width, d)
            };
            (format!("Strip{}", i + 1), rect)
        })
        .collect()
}

fn grid(fp: &Footprint, gx: usize, gy: usize) -> Vec<(String, Rect)> {
    let w = fp.width / gx as f64;
    let d = fp.depth / gy as f64;
    let mut cells = Vec::with_capacity(gx * gy);
    for row in 0..gy {
        for col in 0..gx {
            let rect = Rect::new(col as f64 * w, row as f64 * d, w, d);
            cells.push((format!("Zone_R{}C{}", row + 1, col + 1), rect));
        }
    }
    cells
}

fn perimeter_core(fp: &Footprint, p: f64) -> GenerationResult<Vec<(String, Rect)>> {
    let (w, d) = (fp.width, fp.depth);
    let core_w = w - 2.0 * p;
    let core_d = d - 2.0 * p;
    if !(p > 0.0) || core_w <= 0.0 || core_d <= 0.0 {
        return Err(GenerationError::DegenerateCore {
            width: w,
            depth: d,
            perimeter_depth: p,
        });
    }
    let (x1, y1) = (w - p, d - p);
    // South to north, west to east
    Ok(vec![
        ("Corner_SW".to_string(), Rect::new(0., 0., p, p)),
        ("Perimeter_South".to_string(), Rect::new(p, 0., core_w, p)),
        ("Corner_SE".to_string(), Rect::new(x1, 0., p, p)),
        ("Perimeter_West".to_string(), Rect::new(0., p, p, core_d)),
        ("Core".to_string(), Rect::new(p, p, core_w, core_d)),
        ("Perimeter_East".to_string(), Rect::new(x1, p, p, core_d)),
        ("Corner_NW".to_string(), Rect::new(0., y1, p, p)),
        ("Perimeter_North".to_string(), Rect::new(p, y1, core_w, p)),
        ("Corner_NE".to_string(), Rect::new(x1, y1, p, p)),
    ])
}

/// Turns the partition rectangles into zones of one floor (0-based index).
pub fn zones_for_floor(cells: &[(String, Rect)], floor: usize, floor_height: f64) -> Vec<Zone> {
    let z0 = floor as f64 * floor_height;
    cells
        .iter()
        .map(|(suffix, r)| {
            let name = format!("F{}_{}", floor + 1, suffix);
            Zone::new(&name, floor, Point::new(r.x, r.y, z0), r.width, r.depth, floor_height)
        })
        .collect()
}
