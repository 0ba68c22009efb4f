use crate::geom::point::Point;

/// Axis-aligned bounding box of a point set as (min_point, max_point).
///
/// Returns None for an empty slice.
pub fn bounding_box(pts: &[Point]) -> Option<(Point, Point)> {
    let first = pts.first()?;
    let mut pmin = *first;
    let mut pmax = *first;
    for p in pts.iter().skip(1) {
        pmin.x = pmin.x.min(p.x);
        pmin.y = pmin.y.min(p.y);
        pmin.z = pmin.z.min(p.z);
        pmax.x = pmax.x.max(p.x);
        pmax.y = pmax.y.max(p.y);
        pmax.z = pmax.z.max(p.z);
    }
    Some((pmin, pmax))
}

/// Horizontal and vertical extent of a vertical planar loop.
///
/// The horizontal extent is measured along whichever of X/Y the loop spans.
pub fn vertical_extent(pts: &[Point]) -> Option<(f64, f64)> {
    let (pmin, pmax) = bounding_box(pts)?;
    let horizontal = (pmax.x - pmin.x).max(pmax.y - pmin.y);
    let vertical = pmax.z - pmin.z;
    Some((horizontal, vertical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::IsClose;

    #[test]
    fn test_bounding_box() {
        let pts = vec![
            Point::new(1., -2., 0.),
            Point::new(-1., 3., 5.),
            Point::new(0., 0., 2.),
        ];
        let (pmin, pmax) = bounding_box(&pts).unwrap();
        assert!(pmin.is_close(&Point::new(-1., -2., 0.)));
        assert!(pmax.is_close(&Point::new(1., 3., 5.)));
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_vertical_extent() {
        let wall = vec![
            Point::new(0., 4., 3.),
            Point::new(0., 4., 0.),
            Point::new(0., 0., 0.),
            Point::new(0., 0., 3.),
        ];
        let (w, h) = vertical_extent(&wall).unwrap();
        assert!(w.is_close(4.0));
        assert!(h.is_close(3.0));
    }
}
