use crate::document::Document;
use crate::geom::point::PointKey;
use crate::validate::graph::EntityKind;
use crate::validate::{IssueCategory, ValidationIssue};
use std::collections::{BTreeSet, HashMap};

/// Surfaces bounding a rectangular box zone.
pub const BOX_SURFACES: usize = 6;

/// Faces meeting at each corner of a closed box.
pub const FACES_PER_CORNER: usize = 3;

/// Tally of rounded corner coordinates across the surfaces of one zone.
///
/// Each surface contributes a corner at most once.
pub fn corner_tally(doc: &Document, zone: &str) -> HashMap<PointKey, usize> {
    let mut tally = HashMap::new();
    for s in doc.surfaces.iter().filter(|s| s.zone == zone) {
        let corners: BTreeSet<PointKey> = s.vertices.iter().map(|p| p.key()).collect();
        for key in corners {
            *tally.entry(key).or_insert(0) += 1;
        }
    }
    tally
}

pub fn check_closure(doc: &Document) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for zone in &doc.zones {
        let count = doc.surfaces.iter().filter(|s| s.zone == zone.name).count();
        let open = corner_tally(doc, &zone.name)
            .values()
            .filter(|&&n| n != FACES_PER_CORNER)
            .count();
        if count == BOX_SURFACES && open == 0 {
            continue;
        }
        issues.push(ValidationIssue::new(
            IssueCategory::UnclosedGeometry,
            Some(EntityKind::Zone),
            vec![zone.name.clone()],
            format!(
                "Zone {} is not closed: {} surfaces, {} corners not shared by exactly {} faces",
                zone.name, count, open, FACES_PER_CORNER
            ),
        ));
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use crate::generate::synth::synthesize;
    use crate::geom::zone::Zone;

    fn doc() -> Document {
        let mut doc = Document::new("test");
        doc.zones = vec![
            Zone::new("A", 0, Point::new(0., 0., 0.), 4., 3., 2.5),
            Zone::new("B", 0, Point::new(4., 0., 0.), 4., 3., 2.5),
        ];
        doc.surfaces = synthesize(&doc.zones, 0, false);
        doc
    }

    #[test]
    fn test_closed_zones() {
        let d = doc();
        assert!(check_closure(&d).is_empty());
        let tally = corner_tally(&d, "A");
        assert_eq!(tally.len(), 8);
    }

    #[test]
    fn test_missing_surface() {
        let mut d = doc();
        d.surfaces.retain(|s| s.name != "B_Roof");
        let issues = check_closure(&d);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].subject(), Some("B"));
    }

    #[test]
    fn test_shifted_vertex() {
        let mut d = doc();
        d.surfaces[0].vertices[2].x += 0.5;
        let issues = check_closure(&d);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, IssueCategory::UnclosedGeometry);
    }

    #[test]
    fn test_rounding_noise_is_tolerated() {
        let mut d = doc();
        d.surfaces[3].vertices[0].z += 1e-9;
        assert!(check_closure(&d).is_empty());
    }
}
