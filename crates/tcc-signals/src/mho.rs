//! Mho distance characteristic.

use serde::{Deserialize, Serialize};
use tcc_core::numeric::is_positive;

/// Points on the rendered circle, one every 5°.
pub const MHO_POINTS: usize = 72;

/// Point on the R-X plane (Ω).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MhoPoint {
    pub x: f64,
    pub y: f64,
}

/// Circular characteristic on the R-X plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MhoCircle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl MhoCircle {
    /// Circle with diameter `reach`.
    ///
    /// Without an explicit center the circle is self-polarized: it is centered at
    /// `(0, reach/2)` and passes through the origin. A non-positive or non-finite reach
    /// collapses the radius to zero.
    pub fn new(reach: f64, center_x: Option<f64>, center_y: Option<f64>) -> Self {
        let radius = if is_positive(reach) { reach / 2.0 } else { 0.0 };
        Self {
            center_x: center_x.unwrap_or(0.0),
            center_y: center_y.unwrap_or(radius),
            radius,
        }
    }

    pub fn reach(&self) -> f64 {
        2.0 * self.radius
    }

    /// [`MHO_POINTS`] points counter-clockwise from angle 0.
    pub fn points(&self) -> Vec<MhoPoint> {
        let step = 360.0 / MHO_POINTS as f64;
        (0..MHO_POINTS)
            .map(|i| {
                let theta = (i as f64 * step).to_radians();
                MhoPoint {
                    x: self.center_x + self.radius * theta.cos(),
                    y: self.center_y + self.radius * theta.sin(),
                }
            })
            .collect()
    }

    /// Impedance `(r, x)` lies on or inside the characteristic.
    pub fn contains(&self, r: f64, x: f64) -> bool {
        let dx = r - self.center_x;
        let dy = x - self.center_y;
        self.radius > 0.0 && dx * dx + dy * dy <= self.radius * self.radius
    }
}

pub fn mho_circle_points(reach: f64, center_x: Option<f64>, center_y: Option<f64>) -> Vec<MhoPoint> {
    MhoCircle::new(reach, center_x, center_y).points()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_polarized_circle_passes_through_origin() {
        let points = mho_circle_points(10.0, None, None);
        assert_eq!(points.len(), MHO_POINTS);

        // 270°
        let bottom = points[54];
        assert!(bottom.x.abs() < 1e-9);
        assert!(bottom.y.abs() < 1e-9);

        // 90°
        let top = points[18];
        assert!((top.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn points_sit_on_radius() {
        let circle = MhoCircle::new(8.0, Some(1.5), Some(-2.0));
        for p in circle.points() {
            let d = ((p.x - 1.5).powi(2) + (p.y + 2.0).powi(2)).sqrt();
            assert!((d - 4.0).abs() < 1e-12);
        }
        assert_eq!(circle.reach(), 8.0);
    }

    #[test]
    fn invalid_reach_collapses() {
        for reach in [0.0, -3.0, f64::NAN] {
            let circle = MhoCircle::new(reach, None, None);
            assert_eq!(circle.radius, 0.0);
            assert!(circle.points().iter().all(|p| p.x == 0.0 && p.y == 0.0));
            assert!(!circle.contains(0.0, 0.0));
        }
    }

    #[test]
    fn contains_checks_the_disc() {
        let circle = MhoCircle::new(10.0, None, None);
        assert!(circle.contains(0.0, 5.0));
        assert!(circle.contains(3.0, 5.0));
        assert!(!circle.contains(0.0, 10.5));
        assert!(!circle.contains(-2.0, -1.0));
    }
}
