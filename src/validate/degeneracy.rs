use crate::Point;
use crate::document::Document;
use crate::geom::point::min_pairwise_distance;
use crate::validate::graph::EntityKind;
use crate::validate::{IssueCategory, ValidationIssue};

/// Vertices of one loop closer than this are coincident.
pub const MIN_VERTEX_SEPARATION: f64 = 1e-10;

pub fn is_degenerate(pts: &[Point]) -> bool {
    pts.len() < 3 || min_pairwise_distance(pts) < MIN_VERTEX_SEPARATION
}

fn issue(kind: EntityKind, name: &str, pts: &[Point]) -> ValidationIssue {
    let detail = if pts.len() < 3 {
        format!("{kind} {name} has only {} vertices", pts.len())
    } else {
        format!(
            "{kind} {name} has vertices {:e} m apart",
            min_pairwise_distance(pts)
        )
    };
    ValidationIssue::new(
        IssueCategory::DegenerateVertex,
        Some(kind),
        vec![name.to_string()],
        detail,
    )
}

pub fn check_degeneracy(doc: &Document) -> Vec<ValidationIssue> {
    let surfaces = doc
        .surfaces
        .iter()
        .filter(|s| is_degenerate(&s.vertices))
        .map(|s| issue(EntityKind::Surface, &s.name, &s.vertices));
    let windows = doc
        .fenestrations
        .iter()
        .filter(|f| is_degenerate(&f.vertices))
        .map(|f| issue(EntityKind::Fenestration, &f.name, &f.vertices));
    surfaces.chain(windows).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        let below = vec![
            Point::new(0., 0., 0.),
            Point::new(0.5e-10, 0., 0.),
            Point::new(0., 1., 0.),
        ];
        assert!(is_degenerate(&below));

        let at = vec![
            Point::new(0., 0., 0.),
            Point::new(1e-10, 0., 0.),
            Point::new(0., 1., 0.),
        ];
        assert!(!is_degenerate(&at));

        let above = vec![
            Point::new(0., 0., 0.),
            Point::new(2e-10, 0., 0.),
            Point::new(0., 1., 0.),
        ];
        assert!(!is_degenerate(&above));
    }

    #[test]
    fn test_too_few_vertices() {
        assert!(is_degenerate(&[Point::new(0., 0., 0.), Point::new(1., 0., 0.)]));
    }

    #[test]
    fn test_check_document() {
        let mut doc = Document::new("test");
        doc.zones.push(crate::geom::zone::Zone::new(
            "Z",
            0,
            Point::new(0., 0., 0.),
            3.,
            3.,
            3.,
        ));
        doc.surfaces = crate::generate::synth::synthesize(&doc.zones, 0, false);
        assert!(check_degeneracy(&doc).is_empty());
        let dup = doc.surfaces[4].vertices[3];
        doc.surfaces[4].vertices.push(dup);
        let issues = check_degeneracy(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].subject(), Some("Z_Wall_South"));
    }
}
