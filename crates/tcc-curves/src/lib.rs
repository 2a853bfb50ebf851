//! tcc-curves: time-current curve evaluation for protection devices.
//!
//! Provides:
//! - The curve family table (IEC 60255, IEEE/ANSI C37.112, simplified fuse/MCCB)
//! - The trip-time evaluator with instantaneous override and numeric guards
//! - Log-spaced curve sampling for plotting
//!
//! Evaluation is a pure function of its inputs. Every degenerate input resolves to
//! [`TripTime::NoTrip`] instead of an error.
//!
//! # Example
//!
//! ```
//! use tcc_curves::{CurveFamily, DeviceSetting};
//! use tcc_core::units::amps;
//!
//! let relay = DeviceSetting::new(amps(100.0), 0.1, CurveFamily::IecStandardInverse);
//! let t = relay.trip_time(amps(500.0));
//! assert!(t.seconds().unwrap() > 0.4);
//! ```

pub mod error;
pub mod evaluator;
pub mod family;
pub mod sweep;

// Re-exports
pub use error::{CurveError, CurveResult};
pub use evaluator::{
    ASYMPTOTE_EPSILON, DeviceSetting, INSTANTANEOUS_TRIP_S, MIN_TRIP_TIME_S, TripTime,
    evaluate_trip_time,
};
pub use family::{CurveFamily, CurveShape};
pub use sweep::{CurvePoint, CurveSweep, sample_curve};
