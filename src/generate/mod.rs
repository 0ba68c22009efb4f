//! Building descriptor to simulation document.
//!
//! Stages, each consuming the previous one's output:
//! footprint planning, zone partitioning, surface synthesis,
//! surface pairing and window placement.

pub mod defaults;
pub mod descriptor;
pub mod footprint;
pub mod pairing;
pub mod partition;
pub mod synth;
pub mod windows;

use crate::document::Document;
use crate::error::GenerationResult;
use crate::sim::hvac::IdealLoadsSystem;
use descriptor::BuildingDescriptor;
use partition::{PartitionStrategy, zones_for_floor};
use windows::WindowGeometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub window: WindowGeometry,
    /// Synthesize zone surfaces on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            window: WindowGeometry::default(),
            parallel: true,
        }
    }
}

/// Runs the whole generation pipeline and assembles a complete document.
pub fn generate_document(
    desc: &BuildingDescriptor,
    options: &GenerationOptions,
) -> GenerationResult<Document> {
    let fp = footprint::plan_footprint(desc)?;
    let strategy = PartitionStrategy::for_descriptor(desc, &fp)?;
    let cells = strategy.partition(&fp)?;
    log::debug!("Partition strategy for {}: {:?}", desc.name, strategy);

    let floors = desc.floors as usize;
    let zones: Vec<_> = (0..floors)
        .flat_map(|floor| zones_for_floor(&cells, floor, desc.floor_height))
        .collect();

    let mut doc = Document::new(&desc.name);
    doc.building.north_axis = desc.north_axis;
    doc.site = desc.location.clone();
    doc.materials = defaults::materials();
    doc.constructions = defaults::constructions();
    doc.surfaces = synth::synthesize(&zones, floors - 1, options.parallel);
    doc.zones = zones;

    let report = pairing::pair_surfaces(&mut doc);
    windows::place_windows(&mut doc, desc.window_wall_ratio, &options.window)?;

    doc.schedules.type_limits = defaults::type_limits();
    doc.schedules.compact = defaults::schedules(&desc.hvac);
    doc.hvac.thermostats = vec![defaults::thermostat(defaults::THERMOSTAT)];
    doc.hvac.ideal_loads = doc
        .zones
        .iter()
        .map(|z| IdealLoadsSystem::new(&z.name, defaults::THERMOSTAT))
        .collect();

    log::info!(
        "Generated {}: {} zones, {} surfaces ({} lateral, {} vertical pairs), {} windows",
        desc.name,
        doc.zones.len(),
        doc.surfaces.len(),
        report.lateral,
        report.vertical,
        doc.fenestrations.len()
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::geom::surface::BoundaryCondition;

    #[test]
    fn test_generate_single_zone() {
        let desc = BuildingDescriptor::with_footprint("box", 1, 10., 10.);
        let doc = generate_document(&desc, &GenerationOptions::default()).unwrap();
        assert_eq!(doc.zones.len(), 1);
        assert_eq!(doc.surfaces.len(), 6);
        assert_eq!(doc.fenestrations.len(), 4);
        assert_eq!(doc.hvac.ideal_loads.len(), 1);
        assert!((doc.floor_area() - 100.0).abs() < 1e-9);
        assert!(doc.surfaces.iter().all(|s| s.reciprocal.is_none()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let desc = BuildingDescriptor::with_footprint("tower", 4, 30., 20.).perimeter_depth(4.0);
        let par = generate_document(&desc, &GenerationOptions::default()).unwrap();
        let seq = generate_document(
            &desc,
            &GenerationOptions {
                parallel: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_no_windows_for_zero_ratio() {
        let desc = BuildingDescriptor::with_footprint("dark", 2, 8., 6.).window_wall_ratio(0.0);
        let doc = generate_document(&desc, &GenerationOptions::default()).unwrap();
        assert!(doc.fenestrations.is_empty());
        let paired = doc
            .surfaces
            .iter()
            .filter(|s| s.boundary == BoundaryCondition::Surface)
            .count();
        assert_eq!(paired, 2);
    }

    #[test]
    fn test_stage_errors_propagate() {
        let desc = BuildingDescriptor::with_footprint("tight", 1, 8., 8.).perimeter_depth(4.0);
        assert!(matches!(
            generate_document(&desc, &GenerationOptions::default()),
            Err(GenerationError::DegenerateCore { .. })
        ));
        let desc = BuildingDescriptor::with_footprint("glass", 1, 2., 2.).window_wall_ratio(0.95);
        assert!(matches!(
            generate_document(&desc, &GenerationOptions::default()),
            Err(GenerationError::WindowExceedsWall { .. })
        ));
    }
}
