//! Fortescue symmetrical components.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use tcc_core::numeric::is_positive;

/// Polar phasor; angle in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Phasor {
    pub magnitude: f64,
    pub angle_deg: f64,
}

impl Phasor {
    pub const ZERO: Self = Self {
        magnitude: 0.0,
        angle_deg: 0.0,
    };

    pub fn new(magnitude: f64, angle_deg: f64) -> Self {
        Self {
            magnitude,
            angle_deg,
        }
    }

    /// Rectangular form. Non-finite phasors map to zero.
    pub fn to_complex(self) -> Complex64 {
        if self.magnitude.is_finite() && self.angle_deg.is_finite() {
            Complex64::from_polar(self.magnitude, self.angle_deg.to_radians())
        } else {
            Complex64::new(0.0, 0.0)
        }
    }

    /// Polar form with the angle in `(-180, 180]`.
    pub fn from_complex(z: Complex64) -> Self {
        if !z.is_finite() || z.norm() == 0.0 {
            return Self::ZERO;
        }
        let (magnitude, theta) = z.to_polar();
        Self::new(magnitude, theta.to_degrees())
    }
}

impl fmt::Display for Phasor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}∠{:.2}°", self.magnitude, self.angle_deg)
    }
}

/// Sequence components of a three-phase set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SequenceComponents {
    pub zero: Phasor,
    pub positive: Phasor,
    pub negative: Phasor,
}

/// `a = 1∠120°`
fn rotator() -> Complex64 {
    Complex64::from_polar(1.0, 120.0_f64.to_radians())
}

/// Decompose phases A, B, C into zero, positive and negative sequence.
///
/// `I0 = (A + B + C)/3`, `I1 = (A + aB + a²C)/3`, `I2 = (A + a²B + aC)/3`.
pub fn decompose(a: Phasor, b: Phasor, c: Phasor) -> SequenceComponents {
    let (va, vb, vc) = (a.to_complex(), b.to_complex(), c.to_complex());
    let op = rotator();
    let op2 = op * op;

    SequenceComponents {
        zero: Phasor::from_complex((va + vb + vc) / 3.0),
        positive: Phasor::from_complex((va + op * vb + op2 * vc) / 3.0),
        negative: Phasor::from_complex((va + op2 * vb + op * vc) / 3.0),
    }
}

impl SequenceComponents {
    /// Phase quantities `[A, B, C]` rebuilt from the components.
    pub fn reconstruct(&self) -> [Phasor; 3] {
        let (i0, i1, i2) = (
            self.zero.to_complex(),
            self.positive.to_complex(),
            self.negative.to_complex(),
        );
        let op = rotator();
        let op2 = op * op;

        [
            Phasor::from_complex(i0 + i1 + i2),
            Phasor::from_complex(i0 + op2 * i1 + op * i2),
            Phasor::from_complex(i0 + op * i1 + op2 * i2),
        ]
    }

    /// Unbalance `|I2| / |I1|`, or `None` without a positive sequence.
    pub fn negative_to_positive_ratio(&self) -> Option<f64> {
        is_positive(self.positive.magnitude)
            .then(|| self.negative.magnitude / self.positive.magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_set_is_pure_positive_sequence() {
        let comps = decompose(
            Phasor::new(1.0, 0.0),
            Phasor::new(1.0, -120.0),
            Phasor::new(1.0, 120.0),
        );
        assert!((comps.positive.magnitude - 1.0).abs() < 1e-9);
        assert!(comps.positive.angle_deg.abs() < 1e-6);
        assert!(comps.zero.magnitude < 1e-9);
        assert!(comps.negative.magnitude < 1e-9);
        assert!(comps.negative_to_positive_ratio().unwrap() < 1e-9);
    }

    #[test]
    fn reversed_rotation_is_negative_sequence() {
        let comps = decompose(
            Phasor::new(2.0, 0.0),
            Phasor::new(2.0, 120.0),
            Phasor::new(2.0, -120.0),
        );
        assert!((comps.negative.magnitude - 2.0).abs() < 1e-9);
        assert!(comps.positive.magnitude < 1e-9);
        assert!(comps.negative_to_positive_ratio().is_none_or(|r| r > 1e6));
    }

    #[test]
    fn in_phase_set_is_zero_sequence() {
        let p = Phasor::new(5.0, 30.0);
        let comps = decompose(p, p, p);
        assert!((comps.zero.magnitude - 5.0).abs() < 1e-9);
        assert!((comps.zero.angle_deg - 30.0).abs() < 1e-6);
        assert!(comps.positive.magnitude < 1e-9);
        assert!(comps.negative.magnitude < 1e-9);
    }

    #[test]
    fn single_phase_fault_splits_evenly() {
        let comps = decompose(Phasor::new(3.0, 0.0), Phasor::ZERO, Phasor::ZERO);
        for part in [comps.zero, comps.positive, comps.negative] {
            assert!((part.magnitude - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn non_finite_phasors_become_zero() {
        let comps = decompose(
            Phasor::new(f64::NAN, 0.0),
            Phasor::new(f64::INFINITY, 10.0),
            Phasor::new(1.0, f64::NAN),
        );
        assert_eq!(comps.zero, Phasor::ZERO);
        assert_eq!(comps.positive, Phasor::ZERO);
        assert_eq!(comps.negative, Phasor::ZERO);
        assert_eq!(comps.negative_to_positive_ratio(), None);
    }

    #[test]
    fn display_uses_polar_form() {
        assert_eq!(Phasor::new(1.0, -120.0).to_string(), "1.0000∠-120.00°");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn phasor() -> impl Strategy<Value = Phasor> {
        (0.0_f64..10_000.0, -180.0_f64..180.0).prop_map(|(m, a)| Phasor::new(m, a))
    }

    proptest! {
        #[test]
        fn reconstruct_recovers_phases(a in phasor(), b in phasor(), c in phasor()) {
            let rebuilt = decompose(a, b, c).reconstruct();
            for (orig, back) in [a, b, c].iter().zip(rebuilt.iter()) {
                let err = (orig.to_complex() - back.to_complex()).norm();
                prop_assert!(err <= 1e-9 * (1.0 + orig.magnitude), "err {}", err);
            }
        }
    }
}
