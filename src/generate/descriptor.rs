//! Abstract building descriptor consumed by the generation pipeline.

use crate::sim::settings::SiteLocation;
use serde::{Deserialize, Serialize};

/// Zone partitioning tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityTier {
    /// 1 to 3 zones per floor, split into strips.
    Simple,
    /// 4 to 8 zones per floor on a regular grid.
    Medium,
    /// Perimeter zones around a core zone.
    Complex,
}

/// How the per-floor footprint is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FootprintSpec {
    Explicit { width: f64, depth: f64 },
    /// Total building area split evenly across floors.
    FromArea { total_area: f64, aspect_ratio: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HvacDefaults {
    /// Heating setpoint in degC.
    pub heating_setpoint: f64,
    /// Cooling setpoint in degC.
    pub cooling_setpoint: f64,
}

impl Default for HvacDefaults {
    fn default() -> Self {
        Self {
            heating_setpoint: 20.0,
            cooling_setpoint: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingDescriptor {
    pub name: String,
    pub floors: u32,
    pub footprint: FootprintSpec,
    /// Floor-to-floor height in meters.
    pub floor_height: f64,
    pub complexity: ComplexityTier,
    /// Requested zones per floor (Simple and Medium tiers).
    pub zones_per_floor: Option<usize>,
    /// Explicit `(columns, rows)` grid for the Medium tier.
    pub grid: Option<(usize, usize)>,
    /// Perimeter zone depth for the Complex tier.
    pub perimeter_depth: Option<f64>,
    pub location: SiteLocation,
    pub north_axis: f64,
    pub window_wall_ratio: f64,
    pub hvac: HvacDefaults,
}

impl Default for BuildingDescriptor {
    fn default() -> Self {
        Self {
            name: "Building".to_string(),
            floors: 1,
            footprint: FootprintSpec::Explicit {
                width: 10.0,
                depth: 10.0,
            },
            floor_height: 3.0,
            complexity: ComplexityTier::Simple,
            zones_per_floor: None,
            grid: None,
            perimeter_depth: None,
            location: SiteLocation::default(),
            north_axis: 0.0,
            window_wall_ratio: 0.3,
            hvac: HvacDefaults::default(),
        }
    }
}

impl BuildingDescriptor {
    /// Descriptor with an explicit per-floor footprint.
    pub fn with_footprint(name: &str, floors: u32, width: f64, depth: f64) -> Self {
        Self {
            name: name.to_string(),
            floors,
            footprint: FootprintSpec::Explicit { width, depth },
            ..Default::default()
        }
    }

    /// Descriptor with a footprint derived from total area and aspect ratio.
    pub fn with_area(name: &str, floors: u32, total_area: f64, aspect_ratio: f64) -> Self {
        Self {
            name: name.to_string(),
            floors,
            footprint: FootprintSpec::FromArea {
                total_area,
                aspect_ratio,
            },
            ..Default::default()
        }
    }

    pub fn complexity(mut self, tier: ComplexityTier) -> Self {
        self.complexity = tier;
        self
    }

    pub fn zones_per_floor(mut self, n: usize) -> Self {
        self.zones_per_floor = Some(n);
        self
    }

    pub fn grid(mut self, columns: usize, rows: usize) -> Self {
        self.complexity = ComplexityTier::Medium;
        self.grid = Some((columns, rows));
        self
    }

    pub fn perimeter_depth(mut self, depth: f64) -> Self {
        self.complexity = ComplexityTier::Complex;
        self.perimeter_depth = Some(depth);
        self
    }

    pub fn window_wall_ratio(mut self, wwr: f64) -> Self {
        self.window_wall_ratio = wwr;
        self
    }
}
