use crate::error::{GenerationError, GenerationResult};
use crate::generate::descriptor::{BuildingDescriptor, FootprintSpec};
use crate::geom::rect::Rect;
use crate::geom::round_to;
use serde::{Deserialize, Serialize};

/// Decimal places kept for footprint dimensions.
pub const FOOTPRINT_DECIMALS: i32 = 2;

/// Rectangular per-floor footprint anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub depth: f64,
}

impl Footprint {
    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0., 0., self.width, self.depth)
    }
}

/// Solves `width * depth == floor_area` and `width / depth == aspect_ratio`.
///
/// Both dimensions are rounded to `FOOTPRINT_DECIMALS` places.
pub fn from_area(floor_area: f64, aspect_ratio: f64) -> GenerationResult<Footprint> {
    if !(floor_area > 0.0) {
        return Err(GenerationError::InvalidDimension(format!(
            "floor area must be positive, got {floor_area}"
        )));
    }
    if !(aspect_ratio > 0.0) {
        return Err(GenerationError::InvalidDimension(format!(
            "aspect ratio must be positive, got {aspect_ratio}"
        )));
    }
    let width = (floor_area * aspect_ratio).sqrt();
    rounded(width, floor_area / width)
}

/// Rounds both dimensions, rejecting any that round down to zero.
fn rounded(width: f64, depth: f64) -> GenerationResult<Footprint> {
    let fp = Footprint {
        width: round_to(width, FOOTPRINT_DECIMALS),
        depth: round_to(depth, FOOTPRINT_DECIMALS),
    };
    if !(fp.width > 0.0 && fp.depth > 0.0) {
        return Err(GenerationError::InvalidDimension(format!(
            "footprint {width} x {depth} rounds to {} x {}",
            fp.width, fp.depth
        )));
    }
    Ok(fp)
}

/// Derives the footprint shared by every floor of the descriptor.
pub fn plan_footprint(desc: &BuildingDescriptor) -> GenerationResult<Footprint> {
    if desc.floors == 0 {
        return Err(GenerationError::InvalidDimension(
            "floor count must be positive".to_string(),
        ));
    }
    if !(desc.floor_height > 0.0) {
        return Err(GenerationError::InvalidDimension(format!(
            "floor height must be positive, got {}",
            desc.floor_height
        )));
    }
    let fp = match desc.footprint {
        FootprintSpec::Explicit { width, depth } => {
            if !(width > 0.0 && depth > 0.0) {
                return Err(GenerationError::InvalidDimension(format!(
                    "footprint must be positive, got {width} x {depth}"
                )));
            }
            rounded(width, depth)?
        }
        FootprintSpec::FromArea {
            total_area,
            aspect_ratio,
        } => from_area(total_area / desc.floors as f64, aspect_ratio)?,
    };
    log::debug!(
        "Footprint of {}: {} m x {} m per floor",
        desc.name,
        fp.width,
        fp.depth
    );
    Ok(fp)
}
