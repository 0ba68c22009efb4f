//! Document-level settings: simulation control, building metadata,
//! site location, run period, geometry rules and output directives.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationControl {
    pub zone_sizing: bool,
    pub system_sizing: bool,
    pub plant_sizing: bool,
    pub run_for_sizing_periods: bool,
    pub run_for_weather_file: bool,
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self {
            zone_sizing: true,
            system_sizing: false,
            plant_sizing: false,
            run_for_sizing_periods: false,
            run_for_weather_file: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Country,
    Suburbs,
    City,
    Ocean,
    Urban,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolarDistribution {
    MinimalShadowing,
    FullExterior,
    FullInteriorAndExterior,
    FullExteriorWithReflections,
    FullInteriorAndExteriorWithReflections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub name: String,
    /// Degrees clockwise from true north, in [0, 360).
    pub north_axis: f64,
    pub terrain: Terrain,
    pub loads_convergence_tolerance: f64,
    /// Degrees C.
    pub temperature_convergence_tolerance: f64,
    pub solar_distribution: SolarDistribution,
    pub max_warmup_days: u32,
    pub min_warmup_days: u32,
}

impl BuildingInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            north_axis: 0.0,
            terrain: Terrain::Suburbs,
            loads_convergence_tolerance: 0.04,
            temperature_convergence_tolerance: 0.4,
            solar_distribution: SolarDistribution::FullExterior,
            max_warmup_days: 25,
            min_warmup_days: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteLocation {
    pub name: String,
    /// Degrees, [-90, 90].
    pub latitude: f64,
    /// Degrees, [-180, 180].
    pub longitude: f64,
    /// Hours from GMT, [-12, 14].
    pub time_zone: f64,
    /// Meters above sea level, [-300, 8900].
    pub elevation: f64,
}

impl Default for SiteLocation {
    fn default() -> Self {
        Self {
            name: "Denver_CO_USA".to_string(),
            latitude: 39.74,
            longitude: -105.18,
            time_zone: -7.0,
            elevation: 1829.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPeriod {
    pub name: String,
    pub begin_month: u32,
    pub begin_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl Default for RunPeriod {
    fn default() -> Self {
        Self {
            name: "Annual".to_string(),
            begin_month: 1,
            begin_day: 1,
            end_month: 12,
            end_day: 31,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingVertex {
    UpperLeftCorner,
    LowerLeftCorner,
    UpperRightCorner,
    LowerRightCorner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexDirection {
    Counterclockwise,
    Clockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    Relative,
    World,
}

/// Vertex conventions every surface loop in the document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalGeometryRules {
    pub starting_vertex: StartingVertex,
    pub direction: VertexDirection,
    pub coordinate_system: CoordinateSystem,
}

impl Default for GlobalGeometryRules {
    fn default() -> Self {
        Self {
            starting_vertex: StartingVertex::UpperLeftCorner,
            direction: VertexDirection::Counterclockwise,
            coordinate_system: CoordinateSystem::Relative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputVariable {
    pub key: String,
    pub variable: String,
    pub frequency: String,
}

impl OutputVariable {
    pub fn hourly(variable: &str) -> Self {
        Self {
            key: "*".to_string(),
            variable: variable.to_string(),
            frequency: "Hourly".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    pub variables: Vec<OutputVariable>,
    pub variable_dictionary: String,
    pub diagnostics: Vec<String>,
    pub summary_reports: Vec<String>,
    pub table_style: String,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            variables: vec![
                OutputVariable::hourly("Zone Mean Air Temperature"),
                OutputVariable::hourly("Zone Ideal Loads Supply Air Total Heating Energy"),
                OutputVariable::hourly("Zone Ideal Loads Supply Air Total Cooling Energy"),
            ],
            variable_dictionary: "Regular".to_string(),
            diagnostics: vec!["DisplayExtraWarnings".to_string()],
            summary_reports: vec!["AllSummary".to_string()],
            table_style: "HTML".to_string(),
        }
    }
}
