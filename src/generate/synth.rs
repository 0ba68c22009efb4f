//! Per-zone surface synthesis.
//!
//! Every zone box yields six surfaces in a fixed order: floor, ceiling or
//! roof, then the walls north, east, south and west. Loops start at the
//! upper-left corner and run counterclockwise when viewed from outside.

use crate::Point;
use crate::document::Document;
use crate::generate::defaults::construction_for;
use crate::geom::orientation::Orientation;
use crate::geom::rect::{EDGE_TOL, Rect};
use crate::geom::surface::{BoundaryCondition, Surface, SurfaceKind, SurfaceRole, surface_name};
use crate::geom::zone::Zone;
use rayon::prelude::*;

/// Roles of the six surfaces of a box zone, in emission order.
pub const ROLES: [SurfaceRole; 6] = [
    SurfaceRole::Floor,
    SurfaceRole::Top,
    SurfaceRole::Wall(Orientation::North),
    SurfaceRole::Wall(Orientation::East),
    SurfaceRole::Wall(Orientation::South),
    SurfaceRole::Wall(Orientation::West),
];

/// Plan rectangle enclosing all zones.
pub fn footprint_rect(zones: &[Zone]) -> Option<Rect> {
    let first = zones.first()?.rect();
    let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x1(), first.y1());
    for z in zones.iter().skip(1) {
        let r = z.rect();
        x0 = x0.min(r.x);
        y0 = y0.min(r.y);
        x1 = x1.max(r.x1());
        y1 = y1.max(r.y1());
    }
    Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
}

/// Vertex loop of one face of the zone box.
pub fn surface_loop(zone: &Zone, role: SurfaceRole) -> Vec<Point> {
    let (min, max) = zone.bbox();
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    match role {
        // Viewed from below
        SurfaceRole::Floor => vec![
            Point::new(x0, y0, z0),
            Point::new(x0, y1, z0),
            Point::new(x1, y1, z0),
            Point::new(x1, y0, z0),
        ],
        SurfaceRole::Top => vec![
            Point::new(x0, y1, z1),
            Point::new(x0, y0, z1),
            Point::new(x1, y0, z1),
            Point::new(x1, y1, z1),
        ],
        SurfaceRole::Wall(o) => o.wall_loop(min, max).to_vec(),
    }
}

/// Builds the surface for one role with its positional boundary condition.
///
/// Interior surfaces get `BoundaryCondition::Surface` without a reciprocal;
/// the pairing pass links them afterwards.
pub fn synthesize_surface(
    zone: &Zone,
    role: SurfaceRole,
    outer: &Rect,
    top_floor: usize,
) -> Surface {
    let (kind, boundary) = match role {
        SurfaceRole::Floor => {
            if zone.origin.z.abs() < EDGE_TOL {
                (SurfaceKind::Floor, BoundaryCondition::Ground)
            } else {
                (SurfaceKind::Floor, BoundaryCondition::Surface)
            }
        }
        SurfaceRole::Top => {
            if zone.floor >= top_floor {
                (SurfaceKind::Roof, BoundaryCondition::Outdoors)
            } else {
                (SurfaceKind::Ceiling, BoundaryCondition::Surface)
            }
        }
        SurfaceRole::Wall(o) => {
            if zone.rect().is_on_boundary(o, outer) {
                (SurfaceKind::Wall, BoundaryCondition::Outdoors)
            } else {
                (SurfaceKind::Wall, BoundaryCondition::Surface)
            }
        }
    };
    let exposed = boundary == BoundaryCondition::Outdoors;
    Surface {
        name: surface_name(&zone.name, kind, role),
        zone: zone.name.clone(),
        kind,
        role,
        construction: construction_for(kind, boundary).to_string(),
        boundary,
        sun_exposed: exposed,
        wind_exposed: exposed,
        vertices: surface_loop(zone, role),
        reciprocal: None,
    }
}

pub fn synthesize_zone(zone: &Zone, outer: &Rect, top_floor: usize) -> Vec<Surface> {
    ROLES
        .iter()
        .map(|&role| synthesize_surface(zone, role, outer, top_floor))
        .collect()
}

/// Synthesizes the surfaces of all zones.
///
/// Zones are independent, so with `parallel` set they are processed on the
/// rayon pool. The result is merged in zone order either way.
pub fn synthesize(zones: &[Zone], top_floor: usize, parallel: bool) -> Vec<Surface> {
    let Some(outer) = footprint_rect(zones) else {
        return Vec::new();
    };
    let per_zone: Vec<Vec<Surface>> = if parallel {
        zones
            .par_iter()
            .map(|z| synthesize_zone(z, &outer, top_floor))
            .collect()
    } else {
        zones
            .iter()
            .map(|z| synthesize_zone(z, &outer, top_floor))
            .collect()
    };
    per_zone.into_iter().flatten().collect()
}

/// Rebuilds the surface set of one zone from its stored dimensions.
///
/// Existing surfaces keep their name, construction, boundary and
/// reciprocal; only their vertex loop is rewritten. Missing roles are
/// appended and duplicate roles removed. Returns the number of surfaces
/// rewritten or added, or `None` for an unknown zone.
pub fn regenerate_zone(doc: &mut Document, zone_name: &str) -> Option<usize> {
    let zone = doc.zone(zone_name)?.clone();
    let outer = footprint_rect(&doc.zones)?;
    let top_floor = doc.zones.iter().map(|z| z.floor).max().unwrap_or(0);

    // Keep only the first surface of each role
    let mut seen: Vec<SurfaceRole> = Vec::new();
    let keep: Vec<bool> = doc
        .surfaces
        .iter()
        .map(|s| {
            if s.zone != zone_name {
                return true;
            }
            if seen.contains(&s.role) {
                false
            } else {
                seen.push(s.role);
                true
            }
        })
        .collect();
    doc.retain_surfaces(&keep);

    let mut changed = 0;
    for role in ROLES {
        let fresh = surface_loop(&zone, role);
        match doc
            .surfaces
            .iter_mut()
            .find(|s| s.zone == zone_name && s.role == role)
        {
            Some(s) => {
                if s.vertices != fresh {
                    s.vertices = fresh;
                    changed += 1;
                }
            }
            None => {
                doc.surfaces
                    .push(synthesize_surface(&zone, role, &outer, top_floor));
                changed += 1;
            }
        }
    }
    Some(changed)
}
