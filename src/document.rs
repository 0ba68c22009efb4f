//! The simulation input document.
//!
//! Sections are kept in the order the simulation engine expects them.
//! Surfaces live in a single table; a paired surface refers to its
//! reciprocal by `SurfaceId` (index into that table).

use crate::HasName;
use crate::geom::fenestration::Fenestration;
use crate::geom::surface::{BoundaryCondition, Surface, SurfaceId, SurfaceRole};
use crate::geom::zone::Zone;
use crate::sim::construction::Construction;
use crate::sim::hvac::Hvac;
use crate::sim::materials::Material;
use crate::sim::schedule::{CompactSchedule, ScheduleTypeLimits};
use crate::sim::settings::{
    BuildingInfo, GlobalGeometryRules, Outputs, RunPeriod, SimulationControl, SiteLocation,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedules {
    pub type_limits: Vec<ScheduleTypeLimits>,
    pub compact: Vec<CompactSchedule>,
}

impl Schedules {
    pub fn get(&self, name: &str) -> Option<&CompactSchedule> {
        self.compact.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub simulation_control: SimulationControl,
    pub building: BuildingInfo,
    /// Timesteps per hour.
    pub timestep: u32,
    pub site: SiteLocation,
    pub run_period: RunPeriod,
    pub materials: Vec<Material>,
    pub constructions: Vec<Construction>,
    pub geometry_rules: GlobalGeometryRules,
    pub zones: Vec<Zone>,
    pub surfaces: Vec<Surface>,
    pub fenestrations: Vec<Fenestration>,
    pub schedules: Schedules,
    pub hvac: Hvac,
    pub outputs: Outputs,
    /// Incremented every time a repair produces a new document generation.
    pub generation: u32,
}

impl Document {
    /// Creates an empty document with default settings.
    pub fn new(name: &str) -> Self {
        Self {
            simulation_control: SimulationControl::default(),
            building: BuildingInfo::new(name),
            timestep: 4,
            site: SiteLocation::default(),
            run_period: RunPeriod::default(),
            materials: Vec::new(),
            constructions: Vec::new(),
            geometry_rules: GlobalGeometryRules::default(),
            zones: Vec::new(),
            surfaces: Vec::new(),
            fenestrations: Vec::new(),
            schedules: Schedules::default(),
            hvac: Hvac::default(),
            outputs: Outputs::default(),
            generation: 0,
        }
    }

    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id.0)
    }

    pub fn surface_id(&self, name: &str) -> Option<SurfaceId> {
        self.surfaces.iter().position(|s| s.name == name).map(SurfaceId)
    }

    /// Lookup table `(zone name, role) -> surface id`.
    pub fn role_index(&self) -> HashMap<(String, SurfaceRole), SurfaceId> {
        self.surfaces
            .iter()
            .enumerate()
            .map(|(i, s)| ((s.zone.clone(), s.role), SurfaceId(i)))
            .collect()
    }

    /// Name of the reciprocal surface, if the surface is paired.
    pub fn reciprocal_name(&self, id: SurfaceId) -> Option<&str> {
        let other = self.surface(id)?.reciprocal?;
        self.surface(other).map(|s| s.name.as_str())
    }

    pub fn construction(&self, name: &str) -> Option<&Construction> {
        self.constructions.iter().find(|c| c.name == name)
    }

    pub fn has_material(&self, name: &str) -> bool {
        self.materials.iter().any(|m| m.name() == name)
    }

    /// Links two surfaces as mutual reciprocals.
    ///
    /// Both table entries are written, so the relation is symmetric
    /// by construction. Exposure flags are cleared on both sides.
    pub fn link_surfaces(&mut self, a: SurfaceId, b: SurfaceId) {
        for (this, other) in [(a, b), (b, a)] {
            if let Some(s) = self.surfaces.get_mut(this.0) {
                s.boundary = BoundaryCondition::Surface;
                s.reciprocal = Some(other);
                s.sun_exposed = false;
                s.wind_exposed = false;
            }
        }
    }

    /// Removes surfaces whose `keep` flag is false.
    ///
    /// Reciprocal ids of the remaining surfaces are remapped to the new
    /// table positions; links to removed surfaces are dropped.
    pub fn retain_surfaces(&mut self, keep: &[bool]) {
        let mut remap: Vec<Option<SurfaceId>> = Vec::with_capacity(self.surfaces.len());
        let mut next = 0;
        for i in 0..self.surfaces.len() {
            if keep.get(i).copied().unwrap_or(true) {
                remap.push(Some(SurfaceId(next)));
                next += 1;
            } else {
                remap.push(None);
            }
        }
        let mut i = 0;
        self.surfaces.retain(|_| {
            let k = remap[i].is_some();
            i += 1;
            k
        });
        for s in self.surfaces.iter_mut() {
            s.reciprocal = s.reciprocal.and_then(|r| remap.get(r.0).copied().flatten());
        }
    }

    /// Clears every reciprocal link, leaving boundary conditions untouched.
    pub fn unlink_all(&mut self) {
        for s in self.surfaces.iter_mut() {
            s.reciprocal = None;
        }
    }

    /// Total conditioned floor area in m^2 (including zone multipliers).
    pub fn floor_area(&self) -> f64 {
        self.zones
            .iter()
            .map(|z| z.floor_area() * z.multiplier as f64)
            .sum()
    }

    pub fn volume(&self) -> f64 {
        self.zones
            .iter()
            .map(|z| z.volume() * z.multiplier as f64)
            .sum()
    }
}
