//! Default envelope, schedules and HVAC entities.
//!
//! Used both to assemble generated documents and to fill in dangling
//! references during repair.

use crate::generate::descriptor::HvacDefaults;
use crate::geom::surface::{BoundaryCondition, SurfaceKind};
use crate::sim::construction::Construction;
use crate::sim::hvac::Thermostat;
use crate::sim::materials::{Material, Roughness, presets};
use crate::sim::schedule::{CompactSchedule, ScheduleTypeLimits};

pub const EXTERIOR_WALL: &str = "Exterior_Wall";
pub const INTERIOR_WALL: &str = "Interior_Wall";
pub const GROUND_FLOOR: &str = "Ground_Floor";
pub const INTERIOR_FLOOR: &str = "Interior_Floor";
pub const INTERIOR_CEILING: &str = "Interior_Ceiling";
pub const ROOF: &str = "Roof";
pub const WINDOW: &str = "Window_Double";

pub const TEMPERATURE_LIMITS: &str = "Temperature";
pub const FRACTION_LIMITS: &str = "Fraction";

pub const HEATING_SETPOINT: &str = "Heating_Setpoint";
pub const COOLING_SETPOINT: &str = "Cooling_Setpoint";
pub const ALWAYS_ON: &str = "Always_On";

pub const THERMOSTAT: &str = "Dual_Setpoint_Thermostat";

/// Layer used when a construction has to be synthesized.
pub const FALLBACK_LAYER: &str = "Concrete_200mm";

pub fn materials() -> Vec<Material> {
    presets()
}

pub fn constructions() -> Vec<Construction> {
    let interior_floor = Construction::new(
        INTERIOR_FLOOR,
        &["Timber_Flooring_25mm", "Concrete_200mm", "Gypsum_13mm"],
    );
    let interior_ceiling = interior_floor.reversed(INTERIOR_CEILING);
    vec![
        Construction::new(
            EXTERIOR_WALL,
            &["Plaster_15mm", "Insulation_100mm", "Concrete_200mm", "Plaster_15mm"],
        ),
        Construction::new(INTERIOR_WALL, &["Gypsum_13mm", "Air_Gap_Partition", "Gypsum_13mm"]),
        Construction::new(
            GROUND_FLOOR,
            &["Insulation_100mm", "Concrete_200mm", "Timber_Flooring_25mm"],
        ),
        interior_floor,
        interior_ceiling,
        Construction::new(ROOF, &["Roof_Deck_19mm", "Insulation_100mm", "Gypsum_13mm"]),
        Construction::new(WINDOW, &["Glazing_Double"]),
    ]
}

/// Construction name chosen from the surface position.
pub fn construction_for(kind: SurfaceKind, boundary: BoundaryCondition) -> &'static str {
    match (kind, boundary) {
        (SurfaceKind::Floor, BoundaryCondition::Ground) => GROUND_FLOOR,
        (SurfaceKind::Floor, _) => INTERIOR_FLOOR,
        (SurfaceKind::Ceiling, _) => INTERIOR_CEILING,
        (SurfaceKind::Roof, _) => ROOF,
        (SurfaceKind::Wall, BoundaryCondition::Outdoors) => EXTERIOR_WALL,
        (SurfaceKind::Wall, _) => INTERIOR_WALL,
    }
}

pub fn type_limits() -> Vec<ScheduleTypeLimits> {
    vec![
        ScheduleTypeLimits::new(TEMPERATURE_LIMITS, Some(-60.0), Some(200.0), "Temperature"),
        ScheduleTypeLimits::new(FRACTION_LIMITS, Some(0.0), Some(1.0), "Dimensionless"),
    ]
}

pub fn schedules(hvac: &HvacDefaults) -> Vec<CompactSchedule> {
    vec![
        CompactSchedule::constant(HEATING_SETPOINT, TEMPERATURE_LIMITS, hvac.heating_setpoint),
        CompactSchedule::constant(COOLING_SETPOINT, TEMPERATURE_LIMITS, hvac.cooling_setpoint),
        CompactSchedule::constant(ALWAYS_ON, FRACTION_LIMITS, 1.0),
    ]
}

pub fn thermostat(name: &str) -> Thermostat {
    Thermostat::new(name, HEATING_SETPOINT, COOLING_SETPOINT)
}

/// Massless placeholder for a material referenced but never declared.
pub fn placeholder_material(name: &str) -> Material {
    Material::NoMass {
        name: name.to_string(),
        roughness: Roughness::MediumRough,
        thermal_resistance: 0.1,
    }
}

/// Always-on schedule for a name referenced but never declared.
pub fn placeholder_schedule(name: &str) -> CompactSchedule {
    CompactSchedule::constant(name, FRACTION_LIMITS, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HasName;

    #[test]
    fn test_constructions_resolve() {
        let materials = materials();
        for c in constructions() {
            for layer in &c.layers {
                assert!(
                    materials.iter().any(|m| m.name() == layer),
                    "{} uses undeclared {}",
                    c.name,
                    layer
                );
            }
        }
    }

    #[test]
    fn test_construction_for() {
        assert_eq!(
            construction_for(SurfaceKind::Wall, BoundaryCondition::Outdoors),
            EXTERIOR_WALL
        );
        assert_eq!(
            construction_for(SurfaceKind::Wall, BoundaryCondition::Surface),
            INTERIOR_WALL
        );
        assert_eq!(
            construction_for(SurfaceKind::Floor, BoundaryCondition::Ground),
            GROUND_FLOOR
        );
    }

    #[test]
    fn test_schedules_use_declared_limits() {
        let limits = type_limits();
        for s in schedules(&HvacDefaults::default()) {
            assert!(limits.iter().any(|l| l.name == s.type_limits));
        }
    }
}
