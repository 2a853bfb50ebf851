//! Curve families and their fixed coefficient table.

use crate::error::{CurveError, CurveResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standardized time-current characteristic.
///
/// Serialized with the upper-case names used in study files, e.g. `IEC_STANDARD_INVERSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurveFamily {
    #[serde(alias = "IEC_SI")]
    IecStandardInverse,
    #[serde(alias = "IEC_VI")]
    IecVeryInverse,
    #[serde(alias = "IEC_EI")]
    IecExtremelyInverse,
    #[serde(alias = "ANSI_MI")]
    AnsiModeratelyInverse,
    #[serde(alias = "ANSI_VI")]
    AnsiVeryInverse,
    #[serde(alias = "ANSI_EI")]
    AnsiExtremelyInverse,
    #[serde(alias = "DT")]
    DefiniteTime,
    FuseFast,
    FuseSlow,
    MccbThermalMag,
}

/// Coefficient payload for a curve family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveShape {
    /// IEC 60255: `t = TMS · k / (M^alpha − 1)`
    Iec { k: f64, alpha: f64 },
    /// IEEE C37.112: `t = TDS · (A / (M^p − 1) + B)`
    Ansi { a: f64, b: f64, p: f64 },
    /// `t = TMS`
    DefiniteTime,
    /// Fuse/MCCB approximation without an asymptote: `t = TMS · k / M^alpha`
    Simplified { k: f64, alpha: f64 },
}

impl CurveShape {
    /// Base operating time at multiple-of-pickup `m` for a unit multiplier.
    ///
    /// Raw formula only: callers own the pickup gate, asymptote guard and floor clamp.
    pub fn unit_time(&self, m: f64) -> f64 {
        match *self {
            CurveShape::Iec { k, alpha } => k / (m.powf(alpha) - 1.0),
            CurveShape::Ansi { a, b, p } => a / (m.powf(p) - 1.0) + b,
            CurveShape::DefiniteTime => 1.0,
            CurveShape::Simplified { k, alpha } => k / m.powf(alpha),
        }
    }

    /// True for shapes with a singularity at `M = 1`.
    pub fn has_asymptote(&self) -> bool {
        matches!(self, CurveShape::Iec { .. } | CurveShape::Ansi { .. })
    }
}

impl CurveFamily {
    pub const ALL: [CurveFamily; 10] = [
        CurveFamily::IecStandardInverse,
        CurveFamily::IecVeryInverse,
        CurveFamily::IecExtremelyInverse,
        CurveFamily::AnsiModeratelyInverse,
        CurveFamily::AnsiVeryInverse,
        CurveFamily::AnsiExtremelyInverse,
        CurveFamily::DefiniteTime,
        CurveFamily::FuseFast,
        CurveFamily::FuseSlow,
        CurveFamily::MccbThermalMag,
    ];

    /// The one coefficient table for every family.
    pub const fn shape(self) -> CurveShape {
        match self {
            CurveFamily::IecStandardInverse => CurveShape::Iec {
                k: 0.14,
                alpha: 0.02,
            },
            CurveFamily::IecVeryInverse => CurveShape::Iec {
                k: 13.5,
                alpha: 1.0,
            },
            CurveFamily::IecExtremelyInverse => CurveShape::Iec {
                k: 80.0,
                alpha: 2.0,
            },
            CurveFamily::AnsiModeratelyInverse => CurveShape::Ansi {
                a: 0.0515,
                b: 0.114,
                p: 0.02,
            },
            CurveFamily::AnsiVeryInverse => CurveShape::Ansi {
                a: 19.61,
                b: 0.491,
                p: 2.0,
            },
            CurveFamily::AnsiExtremelyInverse => CurveShape::Ansi {
                a: 28.2,
                b: 0.1217,
                p: 2.0,
            },
            CurveFamily::DefiniteTime => CurveShape::DefiniteTime,
            CurveFamily::FuseFast => CurveShape::Simplified { k: 1.0, alpha: 2.0 },
            CurveFamily::FuseSlow => CurveShape::Simplified {
                k: 10.0,
                alpha: 2.0,
            },
            CurveFamily::MccbThermalMag => CurveShape::Simplified {
                k: 60.0,
                alpha: 2.0,
            },
        }
    }

    /// Canonical study-file name.
    pub const fn name(self) -> &'static str {
        match self {
            CurveFamily::IecStandardInverse => "IEC_STANDARD_INVERSE",
            CurveFamily::IecVeryInverse => "IEC_VERY_INVERSE",
            CurveFamily::IecExtremelyInverse => "IEC_EXTREMELY_INVERSE",
            CurveFamily::AnsiModeratelyInverse => "ANSI_MODERATELY_INVERSE",
            CurveFamily::AnsiVeryInverse => "ANSI_VERY_INVERSE",
            CurveFamily::AnsiExtremelyInverse => "ANSI_EXTREMELY_INVERSE",
            CurveFamily::DefiniteTime => "DEFINITE_TIME",
            CurveFamily::FuseFast => "FUSE_FAST",
            CurveFamily::FuseSlow => "FUSE_SLOW",
            CurveFamily::MccbThermalMag => "MCCB_THERMAL_MAG",
        }
    }

    /// Short alias accepted on input, if the family has one.
    pub const fn alias(self) -> Option<&'static str> {
        match self {
            CurveFamily::IecStandardInverse => Some("IEC_SI"),
            CurveFamily::IecVeryInverse => Some("IEC_VI"),
            CurveFamily::IecExtremelyInverse => Some("IEC_EI"),
            CurveFamily::AnsiModeratelyInverse => Some("ANSI_MI"),
            CurveFamily::AnsiVeryInverse => Some("ANSI_VI"),
            CurveFamily::AnsiExtremelyInverse => Some("ANSI_EI"),
            CurveFamily::DefiniteTime => Some("DT"),
            CurveFamily::FuseFast | CurveFamily::FuseSlow | CurveFamily::MccbThermalMag => None,
        }
    }

    pub fn is_definite_time(self) -> bool {
        matches!(self.shape(), CurveShape::DefiniteTime)
    }
}

impl fmt::Display for CurveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveFamily {
    type Err = CurveError;

    /// Case-insensitive; `-` and spaces are read as `_`.
    fn from_str(s: &str) -> CurveResult<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        CurveFamily::ALL
            .into_iter()
            .find(|family| {
                family.name() == normalized || family.alias() == Some(normalized.as_str())
            })
            .ok_or_else(|| CurveError::UnknownFamily {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_and_alias() {
        assert_eq!(
            "IEC_STANDARD_INVERSE".parse::<CurveFamily>().unwrap(),
            CurveFamily::IecStandardInverse
        );
        assert_eq!(
            "iec-vi".parse::<CurveFamily>().unwrap(),
            CurveFamily::IecVeryInverse
        );
        assert_eq!(
            "mccb thermal mag".parse::<CurveFamily>().unwrap(),
            CurveFamily::MccbThermalMag
        );
    }

    #[test]
    fn parse_unknown_is_explicit_error() {
        let err = "IEC_LONG_TIME".parse::<CurveFamily>().unwrap_err();
        assert_eq!(
            err,
            CurveError::UnknownFamily {
                name: "IEC_LONG_TIME".into()
            }
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for family in CurveFamily::ALL {
            assert_eq!(family.to_string().parse::<CurveFamily>().unwrap(), family);
        }
    }

    #[test]
    fn serde_names_match_display() {
        for family in CurveFamily::ALL {
            let yaml = serde_yaml::to_string(&family).unwrap();
            assert_eq!(yaml.trim(), family.name());
        }
        let parsed: CurveFamily = serde_yaml::from_str("ANSI_EI").unwrap();
        assert_eq!(parsed, CurveFamily::AnsiExtremelyInverse);
    }

    #[test]
    fn only_iec_and_ansi_have_asymptotes() {
        for family in CurveFamily::ALL {
            let expected = family.name().starts_with("IEC") || family.name().starts_with("ANSI");
            assert_eq!(family.shape().has_asymptote(), expected, "{family}");
        }
    }

    #[test]
    fn iec_unit_time_matches_formula() {
        let shape = CurveFamily::IecVeryInverse.shape();
        // 13.5 / (4 - 1)
        assert!((shape.unit_time(4.0) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn ansi_unit_time_includes_constant_term() {
        let shape = CurveFamily::AnsiVeryInverse.shape();
        // 19.61 / (2^2 - 1) + 0.491
        let expected = 19.61 / 3.0 + 0.491;
        assert!((shape.unit_time(2.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn simplified_unit_time_is_finite_at_one() {
        let shape = CurveFamily::FuseSlow.shape();
        assert_eq!(shape.unit_time(1.0), 10.0);
    }
}
