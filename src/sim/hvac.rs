//! Zone-to-thermostat-to-schedule bindings.

use crate::HasName;
use serde::{Deserialize, Serialize};

/// Dual-setpoint thermostat referencing two schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thermostat {
    pub name: String,
    pub heating_schedule: String,
    pub cooling_schedule: String,
}

impl HasName for Thermostat {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Thermostat {
    pub fn new(name: &str, heating_schedule: &str, cooling_schedule: &str) -> Self {
        Self {
            name: name.to_string(),
            heating_schedule: heating_schedule.to_string(),
            cooling_schedule: cooling_schedule.to_string(),
        }
    }
}

/// Ideal loads air system conditioning one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealLoadsSystem {
    pub zone: String,
    pub thermostat: String,
    pub availability_schedule: Option<String>,
}

impl IdealLoadsSystem {
    pub fn new(zone: &str, thermostat: &str) -> Self {
        Self {
            zone: zone.to_string(),
            thermostat: thermostat.to_string(),
            availability_schedule: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hvac {
    pub thermostats: Vec<Thermostat>,
    pub ideal_loads: Vec<IdealLoadsSystem>,
}

impl Hvac {
    pub fn thermostat(&self, name: &str) -> Option<&Thermostat> {
        self.thermostats.iter().find(|t| t.name == name)
    }

    /// Returns true if some ideal loads system serves the zone.
    pub fn controls(&self, zone: &str) -> bool {
        self.ideal_loads.iter().any(|s| s.zone == zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls() {
        let hvac = Hvac {
            thermostats: vec![Thermostat::new("T", "Heat", "Cool")],
            ideal_loads: vec![IdealLoadsSystem::new("F1_Core", "T")],
        };
        assert!(hvac.controls("F1_Core"));
        assert!(!hvac.controls("F2_Core"));
        assert_eq!(hvac.thermostat("T").map(|t| t.heating_schedule.as_str()), Some("Heat"));
        assert!(hvac.thermostat("X").is_none());
    }
}
