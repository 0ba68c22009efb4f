//! Corrective transformations, one per issue category.
//!
//! Every transformation is deterministic and idempotent: applying it to an
//! already repaired document changes nothing and reports no changes.

use crate::HasName;
use crate::Point;
use crate::document::Document;
use crate::generate::defaults;
use crate::generate::descriptor::HvacDefaults;
use crate::generate::pairing::pair_surfaces;
use crate::generate::synth::regenerate_zone;
use crate::geom::KEY_DECIMALS;
use crate::sim::construction::Construction;
use crate::sim::hvac::IdealLoadsSystem;
use crate::sim::materials::presets;
use crate::sim::schedule::ScheduleTypeLimits;
use crate::validate::graph::EntityKind;
use crate::validate::ranges::clamp_document;
use crate::validate::schedules::fix_schedule;
use crate::validate::{IssueCategory, ValidationIssue};

/// A corrective transformation for validation issues.
pub trait Repair {
    /// Returns true if `apply` knows how to fix this issue.
    fn handles(&self, issue: &ValidationIssue) -> bool;

    /// Fixes the issue in place and describes each change made.
    fn apply(&self, doc: &mut Document, issue: &ValidationIssue) -> Vec<String>;
}

/// Category-to-transformation mapping used by the repair loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRepairs;

impl Repair for DefaultRepairs {
    fn handles(&self, issue: &ValidationIssue) -> bool {
        match issue.category {
            IssueCategory::DanglingReference => matches!(
                issue.kind,
                Some(
                    EntityKind::Construction
                        | EntityKind::Material
                        | EntityKind::Schedule
                        | EntityKind::ScheduleTypeLimits
                        | EntityKind::Thermostat
                )
            ),
            IssueCategory::UnclosedGeometry
            | IssueCategory::DegenerateVertex
            | IssueCategory::RangeConstraint
            | IssueCategory::ScheduleFormat
            | IssueCategory::UnpairedSurface
            | IssueCategory::UncontrolledZone => true,
            IssueCategory::DuplicateName | IssueCategory::EngineFailure => false,
        }
    }

    fn apply(&self, doc: &mut Document, issue: &ValidationIssue) -> Vec<String> {
        let subject = issue.subject().map(|s| s.to_string());
        let changes = match issue.category {
            IssueCategory::DanglingReference => match (issue.kind, subject.as_deref()) {
                (Some(kind), Some(name)) => declare_default(doc, kind, name),
                _ => Vec::new(),
            },
            IssueCategory::UnclosedGeometry => regenerate(doc, issue, subject.as_deref()),
            IssueCategory::DegenerateVertex => dedupe(doc, subject.as_deref()),
            IssueCategory::RangeConstraint => clamp_document(doc),
            IssueCategory::ScheduleFormat => fix_schedules(doc, subject.as_deref()),
            IssueCategory::UnpairedSurface => repair_pairing(doc),
            IssueCategory::UncontrolledZone => match subject.as_deref() {
                Some(zone) => bind_zone(doc, zone),
                None => Vec::new(),
            },
            IssueCategory::DuplicateName | IssueCategory::EngineFailure => Vec::new(),
        };
        for c in &changes {
            log::info!("Repair [{}]: {}", issue.category, c);
        }
        changes
    }
}

/// Declares a default entity for a name that is referenced but missing.
///
/// Known default names get their generator definition; anything else gets
/// a neutral placeholder. Names the new entity references in turn are
/// declared as well.
pub fn declare_default(doc: &mut Document, kind: EntityKind, name: &str) -> Vec<String> {
    match kind {
        EntityKind::Construction => declare_construction(doc, name),
        EntityKind::Material => declare_material(doc, name),
        EntityKind::Schedule => declare_schedule(doc, name),
        EntityKind::ScheduleTypeLimits => declare_type_limits(doc, name),
        EntityKind::Thermostat => declare_thermostat(doc, name),
        EntityKind::Zone | EntityKind::Surface | EntityKind::Fenestration => Vec::new(),
    }
}

fn declare_material(doc: &mut Document, name: &str) -> Vec<String> {
    if doc.has_material(name) {
        return Vec::new();
    }
    let material = presets()
        .into_iter()
        .find(|m| m.name() == name)
        .unwrap_or_else(|| defaults::placeholder_material(name));
    doc.materials.push(material);
    vec![format!("declared material {name}")]
}

fn declare_construction(doc: &mut Document, name: &str) -> Vec<String> {
    let mut changes = Vec::new();
    if doc.construction(name).is_none() {
        let construction = defaults::constructions()
            .into_iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| Construction::new(name, &[defaults::FALLBACK_LAYER]));
        changes.push(format!(
            "declared construction {name} with layers [{}]",
            construction.layers.join(", ")
        ));
        doc.constructions.push(construction);
    }
    let layers = doc
        .construction(name)
        .map(|c| c.layers.clone())
        .unwrap_or_default();
    for layer in layers {
        changes.extend(declare_material(doc, &layer));
    }
    changes
}

fn declare_type_limits(doc: &mut Document, name: &str) -> Vec<String> {
    if doc.schedules.type_limits.iter().any(|l| l.name == name) {
        return Vec::new();
    }
    let limits = defaults::type_limits()
        .into_iter()
        .find(|l| l.name == name)
        .unwrap_or_else(|| ScheduleTypeLimits::unbounded(name));
    doc.schedules.type_limits.push(limits);
    vec![format!("declared schedule type limits {name}")]
}

fn declare_schedule(doc: &mut Document, name: &str) -> Vec<String> {
    let mut changes = Vec::new();
    if doc.schedules.get(name).is_none() {
        let schedule = defaults::schedules(&HvacDefaults::default())
            .into_iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| defaults::placeholder_schedule(name));
        changes.push(format!("declared schedule {name}"));
        doc.schedules.compact.push(schedule);
    }
    let limits = doc
        .schedules
        .get(name)
        .map(|s| s.type_limits.clone())
        .unwrap_or_default();
    if !limits.is_empty() {
        changes.extend(declare_type_limits(doc, &limits));
    }
    changes
}

fn declare_thermostat(doc: &mut Document, name: &str) -> Vec<String> {
    let mut changes = Vec::new();
    if doc.hvac.thermostat(name).is_none() {
        doc.hvac.thermostats.push(defaults::thermostat(name));
        changes.push(format!("declared thermostat {name}"));
    }
    let schedules = doc
        .hvac
        .thermostat(name)
        .map(|t| [t.heating_schedule.clone(), t.cooling_schedule.clone()]);
    for s in schedules.into_iter().flatten() {
        changes.extend(declare_schedule(doc, &s));
    }
    changes
}

fn regenerate(doc: &mut Document, issue: &ValidationIssue, subject: Option<&str>) -> Vec<String> {
    let zones: Vec<String> = match (issue.kind, subject) {
        (Some(EntityKind::Zone), Some(zone)) => vec![zone.to_string()],
        _ => doc.zones.iter().map(|z| z.name.clone()).collect(),
    };
    let mut changes = Vec::new();
    for zone in zones {
        match regenerate_zone(doc, &zone) {
            Some(0) | None => {}
            Some(n) => changes.push(format!("regenerated {n} surfaces of zone {zone}")),
        }
    }
    // Rebuilt surfaces start unlinked
    if !changes.is_empty() {
        changes.extend(repair_pairing(doc));
    }
    changes
}

/// Rounds vertices and drops every vertex coinciding with an earlier one.
pub fn dedupe_vertices(pts: &[Point]) -> Vec<Point> {
    let mut kept: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().map(|p| p.rounded(KEY_DECIMALS)) {
        if !kept.iter().any(|k| k.key() == p.key()) {
            kept.push(p);
        }
    }
    kept
}

fn dedupe(doc: &mut Document, subject: Option<&str>) -> Vec<String> {
    let wanted = |name: &str| subject.is_none_or(|s| s == name);
    let mut changes = Vec::new();
    let loops = doc
        .surfaces
        .iter_mut()
        .map(|s| (&s.name, &mut s.vertices))
        .chain(
            doc.fenestrations
                .iter_mut()
                .map(|f| (&f.name, &mut f.vertices)),
        );
    for (name, vertices) in loops {
        if !wanted(name.as_str()) {
            continue;
        }
        let clean = dedupe_vertices(vertices);
        if clean != *vertices {
            changes.push(format!(
                "{name}: {} -> {} vertices after rounding",
                vertices.len(),
                clean.len()
            ));
            *vertices = clean;
        }
    }
    changes
}

fn fix_schedules(doc: &mut Document, subject: Option<&str>) -> Vec<String> {
    doc.schedules
        .compact
        .iter_mut()
        .filter(|s| subject.is_none_or(|name| name == s.name))
        .flat_map(fix_schedule)
        .collect()
}

fn repair_pairing(doc: &mut Document) -> Vec<String> {
    let before: Vec<_> = doc.surfaces.iter().map(|s| s.reciprocal).collect();
    let report = pair_surfaces(doc);
    let after: Vec<_> = doc.surfaces.iter().map(|s| s.reciprocal).collect();
    if before == after {
        return Vec::new();
    }
    vec![format!(
        "re-paired surfaces: {} lateral, {} vertical",
        report.lateral, report.vertical
    )]
}

fn bind_zone(doc: &mut Document, zone: &str) -> Vec<String> {
    if doc.hvac.controls(zone) || doc.zone(zone).is_none() {
        return Vec::new();
    }
    let mut changes = declare_thermostat(doc, defaults::THERMOSTAT);
    doc.hvac
        .ideal_loads
        .push(IdealLoadsSystem::new(zone, defaults::THERMOSTAT));
    changes.push(format!("bound zone {zone} to {}", defaults::THERMOSTAT));
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::descriptor::BuildingDescriptor;
    use crate::generate::{GenerationOptions, generate_document};
    use crate::validate::validate;

    fn doc() -> Document {
        let desc = BuildingDescriptor::with_footprint("b", 2, 10., 8.).zones_per_floor(2);
        generate_document(&desc, &GenerationOptions::default()).unwrap()
    }

    fn repair_all(doc: &mut Document) -> Vec<String> {
        let mut changes = Vec::new();
        for issue in validate(doc) {
            assert!(DefaultRepairs.handles(&issue), "{issue}");
            changes.extend(DefaultRepairs.apply(doc, &issue));
        }
        changes
    }

    #[test]
    fn test_missing_construction_gets_default_definition() {
        let mut d = doc();
        let original = d.construction(defaults::EXTERIOR_WALL).cloned();
        d.constructions.retain(|c| c.name != defaults::EXTERIOR_WALL);
        assert!(!repair_all(&mut d).is_empty());
        assert_eq!(d.construction(defaults::EXTERIOR_WALL).cloned(), original);
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn test_unknown_construction_uses_fallback_layer() {
        let mut d = doc();
        d.materials.clear();
        d.constructions.clear();
        d.surfaces[0].construction = "Custom".to_string();
        repair_all(&mut d);
        let custom = d.construction("Custom").unwrap();
        assert_eq!(custom.layers, vec![defaults::FALLBACK_LAYER.to_string()]);
        assert!(d.has_material(defaults::FALLBACK_LAYER));
        assert!(validate(&d).is_empty(), "{:?}", validate(&d));
    }

    #[test]
    fn test_missing_thermostat_chain() {
        let mut d = doc();
        d.hvac.thermostats.clear();
        d.schedules.compact.clear();
        d.schedules.type_limits.clear();
        // The thermostat pulls in its schedules and their limits
        repair_all(&mut d);
        assert!(validate(&d).is_empty(), "{:?}", validate(&d));
        // Idempotent
        assert!(repair_all(&mut d).is_empty());
    }

    #[test]
    fn test_uncontrolled_zone() {
        let mut d = doc();
        d.hvac.ideal_loads.clear();
        d.hvac.thermostats.clear();
        let changes = repair_all(&mut d);
        assert!(changes.iter().any(|c| c.starts_with("bound zone")));
        assert_eq!(d.hvac.ideal_loads.len(), d.zones.len());
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn test_dangling_zone_is_not_handled() {
        let issue = ValidationIssue::new(
            IssueCategory::DanglingReference,
            Some(EntityKind::Zone),
            vec!["Ghost".to_string()],
            String::new(),
        );
        assert!(!DefaultRepairs.handles(&issue));
    }

    #[test]
    fn test_dedupe_vertices() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1e-11, 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 1., 0.),
        ];
        let clean = dedupe_vertices(&pts);
        assert_eq!(clean.len(), 3);
        assert_eq!(dedupe_vertices(&clean), clean);
    }

    #[test]
    fn test_shifted_wall_regenerated() {
        let mut d = doc();
        let id = d.surface_id("F1_Strip1_Wall_North").unwrap();
        d.surfaces[id.0].vertices[0].z += 0.7;
        let issues = validate(&d);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, IssueCategory::UnclosedGeometry);
        let changes = DefaultRepairs.apply(&mut d, &issues[0]);
        assert_eq!(changes.len(), 1);
        assert!(validate(&d).is_empty());
    }
}
