//! Numeric field ranges.
//!
//! Each ranged entity describes its fields once through
//! `RangeChecked::visit_ranges`; the same description drives both the
//! validator (report) and the repair (clamp to the nearest valid value).

use crate::HasName;
use crate::document::Document;
use crate::geom::fenestration::Fenestration;
use crate::geom::zone::Zone;
use crate::sim::materials::Material;
use crate::sim::schedule::ScheduleTypeLimits;
use crate::sim::settings::{BuildingInfo, RunPeriod, SiteLocation};
use crate::validate::graph::EntityKind;
use crate::validate::{IssueCategory, ValidationIssue};

/// Smallest value a strictly positive field is clamped to.
pub const POSITIVE_FLOOR: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `[lo, hi]`
    Closed(f64, f64),
    /// `(lo, hi)`
    Open(f64, f64),
    /// `[lo, hi)`, out-of-range values wrap around.
    Periodic(f64, f64),
    /// `> 0`
    Positive,
}

impl Bound {
    pub fn contains(&self, v: f64) -> bool {
        match *self {
            Bound::Closed(lo, hi) => v >= lo && v <= hi,
            Bound::Open(lo, hi) => v > lo && v < hi,
            Bound::Periodic(lo, hi) => v >= lo && v < hi,
            Bound::Positive => v > 0.0,
        }
    }

    /// Nearest valid value.
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_nan() {
            return match *self {
                Bound::Closed(lo, _) | Bound::Periodic(lo, _) => lo,
                Bound::Open(lo, _) => lo + POSITIVE_FLOOR,
                Bound::Positive => POSITIVE_FLOOR,
            };
        }
        match *self {
            Bound::Closed(lo, hi) => v.clamp(lo, hi),
            Bound::Open(lo, hi) => v.clamp(lo + POSITIVE_FLOOR, hi - POSITIVE_FLOOR),
            Bound::Periodic(lo, hi) => lo + (v - lo).rem_euclid(hi - lo),
            Bound::Positive => v.max(POSITIVE_FLOOR),
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Closed(lo, hi) => write!(f, "[{lo}, {hi}]"),
            Bound::Open(lo, hi) => write!(f, "({lo}, {hi})"),
            Bound::Periodic(lo, hi) => write!(f, "[{lo}, {hi})"),
            Bound::Positive => write!(f, "> 0"),
        }
    }
}

pub const NORTH_AXIS: Bound = Bound::Periodic(0.0, 360.0);
pub const LATITUDE: Bound = Bound::Closed(-90.0, 90.0);
pub const LONGITUDE: Bound = Bound::Closed(-180.0, 180.0);
pub const TIME_ZONE: Bound = Bound::Closed(-12.0, 14.0);
pub const ELEVATION: Bound = Bound::Closed(-300.0, 8900.0);
pub const UNIT_INTERVAL: Bound = Bound::Closed(0.0, 1.0);
pub const SHGC: Bound = Bound::Open(0.0, 1.0);

#[derive(Debug, Clone, PartialEq)]
pub struct RangeViolation {
    pub field: &'static str,
    pub detail: String,
}

/// Walks ranged fields either to report violations or to fix them.
#[derive(Debug, Default)]
pub struct RangeVisitor {
    fix: bool,
    pub violations: Vec<RangeViolation>,
    pub changes: Vec<String>,
}

impl RangeVisitor {
    pub fn checking() -> Self {
        Self::default()
    }

    pub fn fixing() -> Self {
        Self {
            fix: true,
            ..Default::default()
        }
    }

    /// Generic rule: `valid` is evaluated by the caller, `fix` repairs the
    /// field and describes what it did.
    pub fn rule(
        &mut self,
        field: &'static str,
        valid: bool,
        detail: impl FnOnce() -> String,
        fix: impl FnOnce() -> String,
    ) {
        if valid {
            return;
        }
        if self.fix {
            self.changes.push(format!("{field}: {}", fix()));
        } else {
            self.violations.push(RangeViolation {
                field,
                detail: detail(),
            });
        }
    }

    pub fn real(&mut self, field: &'static str, value: &mut f64, bound: Bound) {
        let old = *value;
        self.rule(
            field,
            bound.contains(old),
            || format!("{field} = {old} outside {bound}"),
            || {
                *value = bound.clamp(old);
                format!("{old} -> {}", *value)
            },
        );
    }

    pub fn optional(&mut self, field: &'static str, value: &mut Option<f64>, bound: Bound) {
        if let Some(v) = value.as_mut() {
            self.real(field, v, bound);
        }
    }

    pub fn integer(&mut self, field: &'static str, value: &mut u32, lo: u32, hi: u32) {
        let old = *value;
        self.rule(
            field,
            (lo..=hi).contains(&old),
            || format!("{field} = {old} outside [{lo}, {hi}]"),
            || {
                *value = old.clamp(lo, hi);
                format!("{old} -> {}", *value)
            },
        );
    }
}

/// Entities with numeric fields constrained to documented ranges.
pub trait RangeChecked: Clone {
    /// Describes every ranged field to the visitor.
    fn visit_ranges(&mut self, v: &mut RangeVisitor);

    fn range_violations(&self) -> Vec<RangeViolation> {
        let mut copy = self.clone();
        let mut v = RangeVisitor::checking();
        copy.visit_ranges(&mut v);
        v.violations
    }

    /// Clamps out-of-range fields, returning a description of each change.
    fn clamp_ranges(&mut self) -> Vec<String> {
        let mut v = RangeVisitor::fixing();
        self.visit_ranges(&mut v);
        v.changes
    }
}

impl RangeChecked for BuildingInfo {
    fn visit_ranges(&mut self, v: &mut RangeVisitor) {
        v.real("north_axis", &mut self.north_axis, NORTH_AXIS);
        v.real(
            "loads_convergence_tolerance",
            &mut self.loads_convergence_tolerance,
            Bound::Positive,
        );
        v.real(
            "temperature_convergence_tolerance",
            &mut self.temperature_convergence_tolerance,
            Bound::Positive,
        );
        let (min, max) = (self.min_warmup_days, self.max_warmup_days);
        let min_days = &mut self.min_warmup_days;
        v.rule(
            "min_warmup_days",
            min <= max,
            || format!("min_warmup_days = {min} exceeds max_warmup_days = {max}"),
            || {
                *min_days = max;
                format!("{min} -> {max}")
            },
        );
    }
}

impl RangeChecked for SiteLocation {
    fn visit_ranges(&mut self, v: &mut RangeVisitor) {
        v.real("latitude", &mut self.latitude, LATITUDE);
        v.real("longitude", &mut self.longitude, LONGITUDE);
        v.real("time_zone", &mut self.time_zone, TIME_ZONE);
        v.real("elevation", &mut self.elevation, ELEVATION);
    }
}

impl RangeChecked for RunPeriod {
    fn visit_ranges(&mut self, v: &mut RangeVisitor) {
        v.integer("begin_month", &mut self.begin_month, 1, 12);
        v.integer("begin_day", &mut self.begin_day, 1, 31);
        v.integer("end_month", &mut self.end_month, 1, 12);
        v.integer("end_day", &mut self.end_day, 1, 31);
        let begin = (self.begin_month, self.begin_day);
        let end = (self.end_month, self.end_day);
        let (end_month, end_day) = (&mut self.end_month, &mut self.end_day);
        v.rule(
            "end",
            begin <= end,
            || {
                format!(
                    "run period ends {}/{} before it begins {}/{}",
                    end.0, end.1, begin.0, begin.1
                )
            },
            || {
                *end_month = begin.0;
                *end_day = begin.1;
                format!("{}/{} -> {}/{}", end.0, end.1, begin.0, begin.1)
            },
        );
    }
}

impl RangeChecked for Material {
    fn visit_ranges(&mut self, v: &mut RangeVisitor) {
        match self {
            Material::Standard {
                thickness,
                conductivity,
                density,
                specific_heat,
                ..
            } => {
                v.real("thickness", thickness, Bound::Positive);
                v.real("conductivity", conductivity, Bound::Positive);
                v.real("density", density, Bound::Positive);
                v.real("specific_heat", specific_heat, Bound::Positive);
            }
            Material::NoMass {
                thermal_resistance,
                ..
            }
            | Material::AirGap {
                thermal_resistance,
                ..
            } => {
                v.real("thermal_resistance", thermal_resistance, Bound::Positive);
            }
            Material::Glazing {
                u_factor,
                solar_heat_gain_coefficient,
                visible_transmittance,
                ..
            } => {
                v.real("u_factor", u_factor, Bound::Positive);
                v.real("solar_heat_gain_coefficient", solar_heat_gain_coefficient, SHGC);
                v.optional("visible_transmittance", visible_transmittance, UNIT_INTERVAL);
            }
        }
    }
}

impl RangeChecked for ScheduleTypeLimits {
    fn visit_ranges(&mut self, v: &mut RangeVisitor) {
        let (Some(lo), Some(hi)) = (self.lower, self.upper) else {
            return;
        };
        let (lower, upper) = (&mut self.lower, &mut self.upper);
        v.rule(
            "limits",
            lo < hi,
            || format!("lower limit {lo} is not below upper limit {hi}"),
            || {
                let (new_lo, new_hi) = if lo > hi { (hi, lo) } else { (lo, lo + 1.0) };
                *lower = Some(new_lo);
                *upper = Some(new_hi);
                format!("[{lo}, {hi}] -> [{new_lo}, {new_hi}]")
            },
        );
    }
}

impl RangeChecked for Zone {
    fn visit_ranges(&mut self, v: &mut RangeVisitor) {
        v.integer("multiplier", &mut self.multiplier, 1, u32::MAX);
        v.real("width", &mut self.width, Bound::Positive);
        v.real("depth", &mut self.depth, Bound::Positive);
        v.real("height", &mut self.height, Bound::Positive);
    }
}

impl RangeChecked for Fenestration {
    fn visit_ranges(&mut self, v: &mut RangeVisitor) {
        v.integer("multiplier", &mut self.multiplier, 1, u32::MAX);
        v.real("window_wall_ratio", &mut self.window_wall_ratio, Bound::Open(0.0, 1.0));
    }
}

fn push_issues<T: RangeChecked>(
    issues: &mut Vec<ValidationIssue>,
    kind: Option<EntityKind>,
    name: &str,
    item: &T,
) {
    for violation in item.range_violations() {
        issues.push(ValidationIssue::new(
            IssueCategory::RangeConstraint,
            kind,
            vec![name.to_string()],
            format!("{name}: {}", violation.detail),
        ));
    }
}

fn visit_timestep(timestep: &mut u32, v: &mut RangeVisitor) {
    v.integer("timestep", timestep, 1, 60);
}

pub fn check_ranges(doc: &Document) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    push_issues(&mut issues, None, &doc.building.name, &doc.building);

    let mut v = RangeVisitor::checking();
    visit_timestep(&mut doc.timestep.clone(), &mut v);
    for violation in v.violations {
        issues.push(ValidationIssue::new(
            IssueCategory::RangeConstraint,
            None,
            vec!["Timestep".to_string()],
            violation.detail,
        ));
    }

    push_issues(&mut issues, None, &doc.site.name, &doc.site);
    push_issues(&mut issues, None, &doc.run_period.name, &doc.run_period);
    for m in &doc.materials {
        push_issues(&mut issues, Some(EntityKind::Material), m.name(), m);
    }
    for z in &doc.zones {
        push_issues(&mut issues, Some(EntityKind::Zone), &z.name, z);
    }
    for f in &doc.fenestrations {
        push_issues(&mut issues, Some(EntityKind::Fenestration), &f.name, f);
    }
    for l in &doc.schedules.type_limits {
        push_issues(&mut issues, Some(EntityKind::ScheduleTypeLimits), &l.name, l);
    }
    issues
}

/// Clamps every ranged field of the document; returns the changes made.
pub fn clamp_document(doc: &mut Document) -> Vec<String> {
    let mut changes = Vec::new();
    let mut tag = |name: &str, list: Vec<String>| {
        changes.extend(list.into_iter().map(|c| format!("{name}.{c}")));
    };

    let name = doc.building.name.clone();
    tag(&name, doc.building.clamp_ranges());
    let mut v = RangeVisitor::fixing();
    visit_timestep(&mut doc.timestep, &mut v);
    tag("Timestep", v.changes);
    let name = doc.site.name.clone();
    tag(&name, doc.site.clamp_ranges());
    let name = doc.run_period.name.clone();
    tag(&name, doc.run_period.clamp_ranges());
    for m in doc.materials.iter_mut() {
        let name = m.name().to_string();
        tag(&name, m.clamp_ranges());
    }
    for z in doc.zones.iter_mut() {
        let name = z.name.clone();
        tag(&name, z.clamp_ranges());
    }
    for f in doc.fenestrations.iter_mut() {
        let name = f.name.clone();
        tag(&name, f.clamp_ranges());
    }
    for l in doc.schedules.type_limits.iter_mut() {
        let name = l.name.clone();
        tag(&name, l.clamp_ranges());
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(LATITUDE.contains(90.0));
        assert!(!LATITUDE.contains(90.5));
        assert!(!NORTH_AXIS.contains(360.0));
        assert!((NORTH_AXIS.clamp(370.0) - 10.0).abs() < 1e-12);
        assert!((NORTH_AXIS.clamp(-30.0) - 330.0).abs() < 1e-12);
        assert!((LATITUDE.clamp(-95.0) + 90.0).abs() < 1e-12);
        assert!(SHGC.contains(SHGC.clamp(1.0)));
        assert!(Bound::Positive.contains(Bound::Positive.clamp(-2.0)));
        assert!(Bound::Positive.contains(Bound::Positive.clamp(f64::NAN)));
    }

    #[test]
    fn test_site_violations_and_clamp() {
        let mut site = SiteLocation {
            latitude: 95.0,
            time_zone: -13.0,
            ..Default::default()
        };
        let violations = site.range_violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "latitude");

        let changes = site.clamp_ranges();
        assert_eq!(changes.len(), 2);
        assert!(site.range_violations().is_empty());
        assert!((site.latitude - 90.0).abs() < 1e-12);
        assert!((site.time_zone + 12.0).abs() < 1e-12);
        // Idempotent
        assert!(site.clamp_ranges().is_empty());
    }

    #[test]
    fn test_material_ranges() {
        let mut glass = Material::glazing("g", 2.0, 1.2, Some(1.5));
        assert_eq!(glass.range_violations().len(), 2);
        glass.clamp_ranges();
        assert!(glass.range_violations().is_empty());

        let mut wall = Material::standard("w", 0.0, 1.0, 1000.0, 900.0);
        assert_eq!(wall.range_violations()[0].field, "thickness");
        wall.clamp_ranges();
        assert!(wall.range_violations().is_empty());
    }

    #[test]
    fn test_run_period_order() {
        let mut rp = RunPeriod {
            begin_month: 6,
            begin_day: 1,
            end_month: 3,
            end_day: 31,
            ..Default::default()
        };
        assert_eq!(rp.range_violations().len(), 1);
        rp.clamp_ranges();
        assert_eq!((rp.end_month, rp.end_day), (6, 1));
        assert!(rp.range_violations().is_empty());
    }

    #[test]
    fn test_type_limits_order() {
        let mut l = ScheduleTypeLimits::new("L", Some(5.0), Some(1.0), "Dimensionless");
        assert_eq!(l.range_violations().len(), 1);
        l.clamp_ranges();
        assert_eq!((l.lower, l.upper), (Some(1.0), Some(5.0)));

        let mut eq = ScheduleTypeLimits::new("E", Some(2.0), Some(2.0), "Dimensionless");
        eq.clamp_ranges();
        assert_eq!(eq.upper, Some(3.0));
        assert!(eq.range_violations().is_empty());
    }

    #[test]
    fn test_document_clamp() {
        let mut doc = Document::new("b");
        doc.building.north_axis = 400.0;
        doc.timestep = 0;
        assert_eq!(check_ranges(&doc).len(), 2);
        let changes = clamp_document(&mut doc);
        assert_eq!(changes.len(), 2);
        assert!(check_ranges(&doc).is_empty());
        assert!((doc.building.north_axis - 40.0).abs() < 1e-9);
        assert_eq!(doc.timestep, 1);
    }
}
