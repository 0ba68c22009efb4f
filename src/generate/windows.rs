//! Window placement on exterior walls.

use crate::document::Document;
use crate::error::{GenerationError, GenerationResult};
use crate::generate::defaults::WINDOW;
use crate::geom::bboxes::{bounding_box, vertical_extent};
use crate::geom::fenestration::Fenestration;
use crate::geom::orientation::Orientation;
use crate::geom::surface::{BoundaryCondition, Surface, SurfaceKind, SurfaceRole};

/// Window width over window height.
pub const WINDOW_ASPECT: f64 = 1.5;

/// Sill height and edge margin, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    pub sill_height: f64,
    pub edge_margin: f64,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            sill_height: 0.8,
            edge_margin: 0.1,
        }
    }
}

/// Computes the window sub-surface of a wall for the given window-to-wall ratio.
///
/// The window keeps `WINDOW_ASPECT`, is centered horizontally and sits on
/// the sill. Its height is clamped to `wall_height - sill - margin` and its
/// width to `wall_width - 2 * margin`. The ratio must not exceed the usable
/// fraction of the wall left after margins and sill. The returned window
/// records the ratio it actually covers, which is lower than `wwr` when a
/// clamp applies.
pub fn place_window(
    wall: &Surface,
    wwr: f64,
    geometry: &WindowGeometry,
) -> GenerationResult<Fenestration> {
    let exceeds = |usable: f64| GenerationError::WindowExceedsWall {
        surface: wall.name.clone(),
        wwr,
        usable,
    };
    let orientation = match wall.role {
        SurfaceRole::Wall(o) => Some(o),
        _ => wall.normal().and_then(|vn| Orientation::from_normal(&vn)),
    };
    let (Some(o), Some((min, max)), Some((wall_w, wall_h))) = (
        orientation,
        bounding_box(&wall.vertices),
        vertical_extent(&wall.vertices),
    ) else {
        return Err(exceeds(0.0));
    };

    let s = geometry.sill_height;
    let m = geometry.edge_margin;
    let max_h = wall_h - s - m;
    let max_w = wall_w - 2.0 * m;
    let usable = if wall_w * wall_h > 0.0 {
        (max_w.max(0.0) * max_h.max(0.0)) / (wall_w * wall_h)
    } else {
        0.0
    };

    let area = wall_w * wall_h * wwr;
    let mut h = (area / WINDOW_ASPECT).sqrt();
    let mut w = WINDOW_ASPECT * h;
    h = h.min(max_h);
    w = w.min(max_w);
    if !(h > 0.0 && w > 0.0) || wwr > usable {
        return Err(exceeds(usable));
    }

    let u0 = 0.5 * (wall_w - w);
    let vertices = o.local_loop(min, max, (u0, u0 + w), (s, s + h)).to_vec();
    Ok(Fenestration {
        name: format!("{}_Window", wall.name),
        surface: wall.name.clone(),
        construction: WINDOW.to_string(),
        vertices,
        window_wall_ratio: (w * h) / (wall_w * wall_h),
        multiplier: 1,
    })
}

/// Places one window on every exterior wall of the document.
///
/// Does nothing for a non-positive ratio. Existing windows are replaced.
pub fn place_windows(
    doc: &mut Document,
    wwr: f64,
    geometry: &WindowGeometry,
) -> GenerationResult<usize> {
    doc.fenestrations.clear();
    if wwr <= 0.0 {
        return Ok(0);
    }
    let mut windows = Vec::new();
    for wall in doc
        .surfaces
        .iter()
        .filter(|s| s.kind == SurfaceKind::Wall && s.boundary == BoundaryCondition::Outdoors)
    {
        windows.push(place_window(wall, wwr, geometry)?);
    }
    let count = windows.len();
    doc.fenestrations = windows;
    log::debug!("Placed {count} windows at window-to-wall ratio {wwr}");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use crate::Vector;
    use crate::geom::surface::polygon_area;
    use crate::geom::zone::Zone;
    use crate::generate::synth::synthesize_zone;

    fn walls(w: f64, d: f64, h: f64) -> Vec<Surface> {
        let zone = Zone::new("Z", 0, Point::new(1., 2., 0.), w, d, h);
        synthesize_zone(&zone, &zone.rect(), 0)
            .into_iter()
            .filter(|s| s.kind == SurfaceKind::Wall)
            .collect()
    }

    #[test]
    fn test_window_area_and_plane() {
        for wall in walls(10., 6., 4.) {
            let win = place_window(&wall, 0.3, &WindowGeometry::default()).unwrap();
            assert_eq!(win.vertices.len(), 4);
            assert_eq!(win.name, format!("{}_Window", wall.name));

            let wall_area = wall.area();
            assert!((polygon_area(&win.vertices) - 0.3 * wall_area).abs() < 1e-9);
            assert!((win.window_wall_ratio - 0.3).abs() < 1e-9);

            // Same plane and same facing as the wall
            let wn = wall.normal().unwrap();
            let vn = Vector::loop_normal(&win.vertices).unwrap();
            assert!(wn.is_close(&vn));
            let offset = Vector::from_points(wall.vertices[0], win.vertices[0]);
            assert!(offset.dot(wn).abs() < 1e-9);

            // Bottom edge on the sill
            assert!((win.vertices[1].z - 0.8).abs() < 1e-9);
        }
    }

    #[test]
    fn test_window_is_clamped() {
        // Wide, low wall: height hits the clamp, width does not
        let wall = walls(20., 20., 2.5).remove(0);
        let geometry = WindowGeometry::default();
        let win = place_window(&wall, 0.4, &geometry).unwrap();
        let (w, h) = vertical_extent(&win.vertices).unwrap();
        assert!((h - (2.5 - 0.8 - 0.1)).abs() < 1e-9);

        // The stored ratio is the covered fraction, not the requested one
        let covered = polygon_area(&win.vertices) / wall.area();
        assert!((win.window_wall_ratio - covered).abs() < 1e-9);
        assert!((win.window_wall_ratio - w * h / 50.0).abs() < 1e-9);
        assert!(win.window_wall_ratio < 0.4);
    }

    #[test]
    fn test_window_exceeds_wall() {
        let wall = walls(2., 2., 2.).remove(0);
        let res = place_window(&wall, 0.95, &WindowGeometry::default());
        assert!(matches!(res, Err(GenerationError::WindowExceedsWall { .. })));
    }

    #[test]
    fn test_window_stays_within_margins() {
        for wall in walls(4., 3., 3.) {
            let win = place_window(&wall, 0.35, &WindowGeometry::default()).unwrap();
            let (wmin, wmax) = bounding_box(&wall.vertices).unwrap();
            let (min, max) = bounding_box(&win.vertices).unwrap();
            assert!(min.z >= wmin.z + 0.8 - 1e-9);
            assert!(max.z <= wmax.z - 0.1 + 1e-9);
            assert!(min.x >= wmin.x - 1e-9 && max.x <= wmax.x + 1e-9);
            assert!(min.y >= wmin.y - 1e-9 && max.y <= wmax.y + 1e-9);
        }
    }
}
