//! Interior surface pairing across adjacent and stacked zones.
//!
//! Adjacency is purely geometric: two zones of a floor are neighbors when
//! one full side of each coincides (`EdgeContact::Exact`). A partial
//! overlap is ambiguous and left unpaired, so the validator reports the
//! affected walls.

use crate::document::Document;
use crate::geom::rect::{EDGE_TOL, EdgeContact};
use crate::geom::surface::{BoundaryCondition, SurfaceId, SurfaceRole};
use crate::geom::zone::Zone;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairingReport {
    /// Wall pairs linked within a floor.
    pub lateral: usize,
    /// Ceiling/floor pairs linked between consecutive floors.
    pub vertical: usize,
    /// Zone pairs sharing only part of a side.
    pub ambiguous: Vec<(String, String)>,
}

fn same_storey(a: &Zone, b: &Zone) -> bool {
    a.floor == b.floor
        && (a.origin.z - b.origin.z).abs() < EDGE_TOL
        && (a.height - b.height).abs() < EDGE_TOL
}

fn stacked(lower: &Zone, upper: &Zone) -> bool {
    upper.floor == lower.floor + 1
        && (lower.origin.z + lower.height - upper.origin.z).abs() < EDGE_TOL
        && lower.rect().matches(&upper.rect())
}

/// Links every interior surface with its geometric counterpart.
///
/// Existing links are cleared first, so running the pass twice gives the
/// same result. Only surfaces whose boundary is `Surface` are linked.
pub fn pair_surfaces(doc: &mut Document) -> PairingReport {
    doc.unlink_all();
    let index = doc.role_index();
    let lookup = |zone: &Zone, role: SurfaceRole| -> Option<SurfaceId> {
        index.get(&(zone.name.clone(), role)).copied()
    };

    let mut links: Vec<(SurfaceId, SurfaceId, bool)> = Vec::new();
    let mut report = PairingReport::default();

    for (i, a) in doc.zones.iter().enumerate() {
        for b in doc.zones.iter().skip(i + 1) {
            if !same_storey(a, b) {
                continue;
            }
            match a.rect().contact(&b.rect()) {
                Some(EdgeContact::Exact(o)) => {
                    let pair = (
                        lookup(a, SurfaceRole::Wall(o)),
                        lookup(b, SurfaceRole::Wall(o.opposite())),
                    );
                    if let (Some(sa), Some(sb)) = pair {
                        links.push((sa, sb, false));
                    }
                }
                Some(EdgeContact::Partial(o)) => {
                    log::warn!(
                        "Zones {} and {} overlap only partially on their {} side",
                        a.name,
                        b.name,
                        o
                    );
                    report.ambiguous.push((a.name.clone(), b.name.clone()));
                }
                None => {}
            }
        }
    }

    for lower in &doc.zones {
        for upper in &doc.zones {
            if !stacked(lower, upper) {
                continue;
            }
            let pair = (
                lookup(lower, SurfaceRole::Top),
                lookup(upper, SurfaceRole::Floor),
            );
            if let (Some(ceiling), Some(floor)) = pair {
                links.push((ceiling, floor, true));
            }
        }
    }

    let awaiting = |doc: &Document, id: SurfaceId| {
        doc.surface(id)
            .is_some_and(|s| s.boundary == BoundaryCondition::Surface)
    };
    for (a, b, vertical) in links {
        if !(awaiting(doc, a) && awaiting(doc, b)) {
            continue;
        }
        doc.link_surfaces(a, b);
        if vertical {
            report.vertical += 1;
        } else {
            report.lateral += 1;
        }
    }

    log::debug!(
        "Paired {} lateral and {} vertical surface pairs ({} ambiguous contacts)",
        report.lateral,
        report.vertical,
        report.ambiguous.len()
    );
    report
}
