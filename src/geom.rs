pub mod bboxes;
pub mod fenestration;
pub mod orientation;
pub mod point;
pub mod rect;
pub mod surface;
pub mod vector;
pub mod zone;

/// Geometric precision
pub const EPS: f64 = 1e-9;

/// Number of decimals kept when vertex coordinates are compared as keys.
pub const KEY_DECIMALS: i32 = 6;

/// Approximate equality for geometric quantities.
pub trait IsClose {
    fn is_close(&self, other: Self) -> bool;
}

impl IsClose for f64 {
    fn is_close(&self, other: f64) -> bool {
        (self - other).abs() < EPS
    }
}

/// Rounds `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert!(round_to(2.345678, 2).is_close(2.35));
        assert!(round_to(-1.005, 0).is_close(-1.0));
        assert!(round_to(17.320508, 2).is_close(17.32));
    }

    #[test]
    fn test_is_close_f64() {
        assert!(1.0_f64.is_close(1.0 + 1e-12));
        assert!(!1.0_f64.is_close(1.001));
    }
}
