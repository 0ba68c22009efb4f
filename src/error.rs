use crate::generate::descriptor::ComplexityTier;
use crate::validate::ValidationIssue;
use thiserror::Error;

/// Result type for generation stages
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Malformed-input failures of the generation pipeline. These are never
/// retried; the descriptor has to be corrected upstream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error(
        "Perimeter depth {perimeter_depth} m leaves no core in a {width} m x {depth} m footprint"
    )]
    DegenerateCore {
        width: f64,
        depth: f64,
        perimeter_depth: f64,
    },

    #[error(
        "Window-to-wall ratio {wwr} does not fit wall {surface} (usable fraction {usable:.3})"
    )]
    WindowExceedsWall {
        surface: String,
        wwr: f64,
        usable: f64,
    },

    #[error("Unsupported zone count {count} for {tier:?} complexity")]
    UnsupportedZoneCount { tier: ComplexityTier, count: usize },
}

/// Terminal outcomes of a repair loop that did not reach an accepted document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepairError {
    #[error(
        "Repair budget of {budget} attempts exhausted with {} outstanding issues",
        .issues.len()
    )]
    BudgetExhausted {
        budget: u32,
        issues: Vec<ValidationIssue>,
    },

    #[error("{} issues have no mapped repair", .issues.len())]
    Unrepairable { issues: Vec<ValidationIssue> },

    #[error("Simulation engine could not be run: {0}")]
    Engine(String),
}
