//! Material definitions referenced by construction layers.

use crate::HasName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Roughness {
    VeryRough,
    Rough,
    MediumRough,
    MediumSmooth,
    Smooth,
    VerySmooth,
}

/// One of the four material kinds understood by the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Material {
    /// Layer with thermal mass.
    Standard {
        name: String,
        roughness: Roughness,
        /// Thickness in meters.
        thickness: f64,
        /// Thermal conductivity in W/(m*K).
        conductivity: f64,
        /// Density in kg/m^3.
        density: f64,
        /// Specific heat capacity in J/(kg*K).
        specific_heat: f64,
    },
    /// Pure resistance layer without mass.
    NoMass {
        name: String,
        roughness: Roughness,
        /// Thermal resistance in m^2*K/W.
        thermal_resistance: f64,
    },
    AirGap {
        name: String,
        thermal_resistance: f64,
    },
    /// Simple glazing system.
    Glazing {
        name: String,
        /// U-factor in W/(m^2*K).
        u_factor: f64,
        solar_heat_gain_coefficient: f64,
        visible_transmittance: Option<f64>,
    },
}

impl HasName for Material {
    fn name(&self) -> &str {
        match self {
            Material::Standard { name, .. }
            | Material::NoMass { name, .. }
            | Material::AirGap { name, .. }
            | Material::Glazing { name, .. } => name,
        }
    }
}

impl Material {
    pub fn standard(
        name: &str,
        thickness: f64,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> Self {
        Material::Standard {
            name: name.to_string(),
            roughness: Roughness::MediumRough,
            thickness,
            conductivity,
            density,
            specific_heat,
        }
    }

    pub fn glazing(name: &str, u_factor: f64, shgc: f64, vt: Option<f64>) -> Self {
        Material::Glazing {
            name: name.to_string(),
            u_factor,
            solar_heat_gain_coefficient: shgc,
            visible_transmittance: vt,
        }
    }
}

/// Default material set used by generated documents and by repairs.
pub fn presets() -> Vec<Material> {
    vec![
        Material::standard("Concrete_200mm", 0.20, 1.4, 2300.0, 880.0),
        Material::standard("Insulation_100mm", 0.10, 0.04, 30.0, 1030.0),
        Material::standard("Plaster_15mm", 0.015, 0.87, 1800.0, 840.0),
        Material::standard("Gypsum_13mm", 0.013, 0.16, 950.0, 840.0),
        Material::standard("Timber_Flooring_25mm", 0.025, 0.14, 650.0, 1200.0),
        Material::standard("Roof_Deck_19mm", 0.019, 0.14, 530.0, 900.0),
        Material::AirGap {
            name: "Air_Gap_Partition".to_string(),
            thermal_resistance: 0.15,
        },
        Material::glazing("Glazing_Double", 2.7, 0.6, Some(0.7)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_unique_names() {
        let p = presets();
        let names: std::collections::HashSet<_> = p.iter().map(|m| m.name()).collect();
        assert_eq!(names.len(), p.len());
        let glazing = p.iter().filter(|m| matches!(m, Material::Glazing { .. }));
        assert_eq!(glazing.count(), 1);
    }

    #[test]
    fn test_serde_tagged() {
        let m = Material::AirGap {
            name: "gap".to_string(),
            thermal_resistance: 0.18,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"type\":\"AirGap\""));
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
