pub mod document;
pub mod engine;
pub mod error;
pub mod generate;
pub mod geom;
pub mod io;
pub mod name;
pub mod repair;
pub mod sim;
pub mod validate;

// Prelude
pub use document::Document;
pub use error::{GenerationError, RepairError};
pub use generate::descriptor::{BuildingDescriptor, ComplexityTier};
pub use generate::{GenerationOptions, generate_document};
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use name::HasName;
pub use repair::RepairLoop;
pub use validate::{IssueCategory, ValidationIssue, validate};
