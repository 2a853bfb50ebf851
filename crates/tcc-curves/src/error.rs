//! Error types for curve parsing and sampling.

use tcc_core::error::TccError;
use thiserror::Error;

/// Errors raised at the untyped edges of the curve library.
///
/// Trip-time evaluation itself never fails; these only come from parsing family names
/// and configuring sweeps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("Unknown curve family: {name}")]
    UnknownFamily { name: String },

    #[error("Invalid sweep: {what}")]
    InvalidSweep { what: &'static str },
}

pub type CurveResult<T> = Result<T, CurveError>;

impl From<CurveError> for TccError {
    fn from(e: CurveError) -> Self {
        match e {
            CurveError::UnknownFamily { .. } => TccError::InvalidArg {
                what: "unknown curve family",
            },
            CurveError::InvalidSweep { what } => TccError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CurveError::UnknownFamily {
            name: "IEC_BOGUS".into(),
        };
        assert!(err.to_string().contains("IEC_BOGUS"));
    }

    #[test]
    fn error_conversion() {
        let err = CurveError::InvalidSweep { what: "points" };
        let tcc_err: TccError = err.into();
        assert!(matches!(tcc_err, TccError::InvalidArg { what: "points" }));
    }
}
