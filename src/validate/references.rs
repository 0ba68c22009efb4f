//! Reference integrity, surface pairing symmetry and HVAC coverage.

use crate::document::Document;
use crate::geom::surface::{BoundaryCondition, SurfaceId};
use crate::validate::graph::{EntityKind, ReferenceGraph};
use crate::validate::{IssueCategory, ValidationIssue};

/// A name used in a reference position.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub from: String,
    pub to_kind: EntityKind,
    pub to: String,
}

impl Reference {
    fn new(from: &str, to_kind: EntityKind, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to_kind,
            to: to.to_string(),
        }
    }
}

/// Every cross-reference of the document, in section order.
pub fn collect_references(doc: &Document) -> Vec<Reference> {
    let mut refs = Vec::new();
    for c in &doc.constructions {
        for layer in &c.layers {
            refs.push(Reference::new(&c.name, EntityKind::Material, layer));
        }
    }
    for s in &doc.surfaces {
        refs.push(Reference::new(&s.name, EntityKind::Zone, &s.zone));
        refs.push(Reference::new(&s.name, EntityKind::Construction, &s.construction));
    }
    for f in &doc.fenestrations {
        refs.push(Reference::new(&f.name, EntityKind::Surface, &f.surface));
        refs.push(Reference::new(&f.name, EntityKind::Construction, &f.construction));
    }
    for s in &doc.schedules.compact {
        refs.push(Reference::new(&s.name, EntityKind::ScheduleTypeLimits, &s.type_limits));
    }
    for t in &doc.hvac.thermostats {
        refs.push(Reference::new(&t.name, EntityKind::Schedule, &t.heating_schedule));
        refs.push(Reference::new(&t.name, EntityKind::Schedule, &t.cooling_schedule));
    }
    for sys in &doc.hvac.ideal_loads {
        let from = format!("{} ideal loads", sys.zone);
        refs.push(Reference::new(&from, EntityKind::Zone, &sys.zone));
        refs.push(Reference::new(&from, EntityKind::Thermostat, &sys.thermostat));
        if let Some(avail) = &sys.availability_schedule {
            refs.push(Reference::new(&from, EntityKind::Schedule, avail));
        }
    }
    refs
}

pub fn check_references(doc: &Document) -> Vec<ValidationIssue> {
    let graph = ReferenceGraph::build(doc);
    let mut issues = Vec::new();

    for (kind, name) in graph.duplicates() {
        issues.push(ValidationIssue::new(
            IssueCategory::DuplicateName,
            Some(*kind),
            vec![name.clone()],
            format!("{kind} name '{name}' is declared more than once"),
        ));
    }

    // One issue per missing entity, listing every referrer
    let mut missing: Vec<(EntityKind, String, Vec<String>)> = Vec::new();
    for r in collect_references(doc) {
        if graph.contains(r.to_kind, &r.to) {
            continue;
        }
        match missing
            .iter_mut()
            .find(|(k, n, _)| *k == r.to_kind && *n == r.to)
        {
            Some((_, _, referrers)) => referrers.push(r.from),
            None => missing.push((r.to_kind, r.to, vec![r.from])),
        }
    }
    for (kind, name, referrers) in missing {
        let detail = format!(
            "{kind} '{name}' is not declared (referenced by {})",
            referrers.join(", ")
        );
        let mut entities = vec![name];
        entities.extend(referrers);
        issues.push(ValidationIssue::new(
            IssueCategory::DanglingReference,
            Some(kind),
            entities,
            detail,
        ));
    }

    issues.extend(check_pairing(doc));
    issues.extend(check_hvac_coverage(doc));
    issues
}

/// Symmetry of reciprocal links: `pair(pair(s)) == s`.
pub fn check_pairing(doc: &Document) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (i, s) in doc.surfaces.iter().enumerate() {
        let problem = match (s.boundary, s.reciprocal) {
            (BoundaryCondition::Surface, None) => Some("has no reciprocal surface".to_string()),
            (BoundaryCondition::Surface, Some(r)) => match doc.surface(r) {
                None => Some(format!("points to missing surface #{}", r.0)),
                Some(_) if r == SurfaceId(i) => Some("is paired with itself".to_string()),
                Some(other) if other.zone == s.zone => Some(format!(
                    "is paired with {} in its own zone {}",
                    other.name, s.zone
                )),
                Some(other) if other.reciprocal != Some(SurfaceId(i)) => Some(format!(
                    "points to {} which does not point back",
                    other.name
                )),
                Some(other) if other.boundary != BoundaryCondition::Surface => Some(format!(
                    "points to {} whose boundary is {}",
                    other.name, other.boundary
                )),
                Some(_) => None,
            },
            (b, Some(_)) => Some(format!("has a reciprocal but its boundary is {b}")),
            (_, None) => None,
        };
        if let Some(p) = problem {
            issues.push(ValidationIssue::new(
                IssueCategory::UnpairedSurface,
                Some(EntityKind::Surface),
                vec![s.name.clone()],
                format!("Surface {} {}", s.name, p),
            ));
        }
    }
    issues
}

pub fn check_hvac_coverage(doc: &Document) -> Vec<ValidationIssue> {
    doc.zones
        .iter()
        .filter(|z| !doc.hvac.controls(&z.name))
        .map(|z| {
            ValidationIssue::new(
                IssueCategory::UncontrolledZone,
                Some(EntityKind::Zone),
                vec![z.name.clone()],
                format!("Zone {} has no HVAC binding", z.name),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::descriptor::BuildingDescriptor;
    use crate::generate::{GenerationOptions, generate_document};

    fn doc() -> Document {
        let desc = BuildingDescriptor::with_footprint("b", 2, 12., 6.).zones_per_floor(2);
        generate_document(&desc, &GenerationOptions::default()).unwrap()
    }

    #[test]
    fn test_clean_document() {
        assert!(check_references(&doc()).is_empty());
    }

    #[test]
    fn test_missing_construction_reported_once() {
        let mut d = doc();
        d.constructions.retain(|c| c.name != "Exterior_Wall");
        let issues = check_references(&d);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.category, IssueCategory::DanglingReference);
        assert_eq!(issue.kind, Some(EntityKind::Construction));
        assert_eq!(issue.subject(), Some("Exterior_Wall"));
        assert!(issue.entities.len() > 2);
    }

    #[test]
    fn test_dangling_iff_undeclared() {
        let mut d = doc();
        d.hvac.ideal_loads[0].availability_schedule = Some("Always_On".to_string());
        assert!(check_references(&d).is_empty());
        d.hvac.ideal_loads[0].availability_schedule = Some("Never".to_string());
        let issues = check_references(&d);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, Some(EntityKind::Schedule));
    }

    #[test]
    fn test_asymmetric_pairing() {
        let mut d = doc();
        let id = d.surface_id("F1_Strip1_Wall_East").unwrap();
        d.surfaces[id.0].reciprocal = Some(SurfaceId(0));
        let issues = check_pairing(&d);
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i.category == IssueCategory::UnpairedSurface));
        assert!(issues.iter().any(|i| i.subject() == Some("F1_Strip1_Wall_East")));
    }

    #[test]
    fn test_self_pairing() {
        let mut d = doc();
        let east = d.surface_id("F1_Strip1_Wall_East").unwrap();
        let west = d.surface_id("F1_Strip2_Wall_West").unwrap();
        d.surfaces[east.0].reciprocal = Some(east);
        d.surfaces[west.0].reciprocal = Some(west);
        let issues = check_pairing(&d);
        let subjects: Vec<_> = issues.iter().filter_map(|i| i.subject()).collect();
        assert_eq!(subjects, vec!["F1_Strip1_Wall_East", "F1_Strip2_Wall_West"]);
        assert!(issues.iter().all(|i| i.category == IssueCategory::UnpairedSurface));
    }

    #[test]
    fn test_pairing_within_one_zone() {
        let mut d = doc();
        let east = d.surface_id("F1_Strip1_Wall_East").unwrap();
        let west = d.surface_id("F1_Strip1_Wall_West").unwrap();
        d.link_surfaces(east, west);
        let issues = check_pairing(&d);
        assert!(issues.iter().any(|i| i.subject() == Some("F1_Strip1_Wall_East")));
        assert!(issues.iter().any(|i| i.subject() == Some("F1_Strip1_Wall_West")));
    }

    #[test]
    fn test_uncontrolled_zone_and_duplicates() {
        let mut d = doc();
        d.hvac.ideal_loads.remove(0);
        let dup = d.schedules.compact[0].clone();
        d.schedules.compact.push(dup);
        let issues = check_references(&d);
        let cats: Vec<_> = issues.iter().map(|i| i.category).collect();
        assert_eq!(
            cats,
            vec![IssueCategory::DuplicateName, IssueCategory::UncontrolledZone]
        );
    }
}
