//! Projection service interface
//!
//! GeoTrace never computes screen positions itself. Whatever owns the map
//! surface implements [`Projection`] and hands layers a non-owning handle
//! to it.

use crate::data::{Coordinate, ScreenPoint};

/// Maps geographic coordinates to screen space and back.
pub trait Projection {
    /// Project a coordinate onto the screen.
    ///
    /// Returns `None` when the coordinate cannot be placed (for example
    /// while the map surface is not attached to a window).
    fn to_screen(&self, coordinate: Coordinate) -> Option<ScreenPoint>;

    /// Convert a screen point (e.g. a mouse click) back to a coordinate.
    fn to_coordinate(&self, _point: ScreenPoint) -> Option<Coordinate> {
        None
    }
}

/// Plate carrée projection onto a fixed-size surface.
///
/// Longitude maps linearly onto `x` and latitude onto `y` (growing
/// downwards). Useful for headless rendering and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquirectangularProjection {
    pub width: f64,
    pub height: f64,
}

impl EquirectangularProjection {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Projection for EquirectangularProjection {
    fn to_screen(&self, coordinate: Coordinate) -> Option<ScreenPoint> {
        if !coordinate.is_finite() {
            return None;
        }
        let x = (coordinate.longitude + 180.0) / 360.0 * self.width;
        let y = (90.0 - coordinate.latitude) / 180.0 * self.height;
        Some(ScreenPoint::new(x, y))
    }

    fn to_coordinate(&self, point: ScreenPoint) -> Option<Coordinate> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let longitude = point.x / self.width * 360.0 - 180.0;
        let latitude = 90.0 - point.y / self.height * 180.0;
        Some(Coordinate::new(latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equirectangular_corners() {
        let projection = EquirectangularProjection::new(360.0, 180.0);
        assert_eq!(
            projection.to_screen(Coordinate::new(90.0, -180.0)),
            Some(ScreenPoint::new(0.0, 0.0))
        );
        assert_eq!(
            projection.to_screen(Coordinate::new(0.0, 0.0)),
            Some(ScreenPoint::new(180.0, 90.0))
        );
        assert_eq!(projection.to_screen(Coordinate::new(f64::NAN, 0.0)), None);
    }

    #[test]
    fn test_equirectangular_inverse() {
        let projection = EquirectangularProjection::new(720.0, 360.0);
        let coord = projection
            .to_coordinate(ScreenPoint::new(360.0, 180.0))
            .unwrap();
        assert!((coord.latitude).abs() < 1e-9);
        assert!((coord.longitude).abs() < 1e-9);
    }
}
