//! Trip-time evaluation for a single device at a single current.

use crate::family::CurveFamily;
use std::fmt;
use tcc_core::numeric::is_positive;
use tcc_core::units::{Current, Time, s};

/// Fixed operating time of the instantaneous element (s).
pub const INSTANTANEOUS_TRIP_S: f64 = 0.02;

/// Floor applied to every defined trip time (s); stands in for breaker and processing latency.
pub const MIN_TRIP_TIME_S: f64 = 0.01;

/// Multiple-of-pickup margin above 1.0 inside which inverse-time curves do not operate.
pub const ASYMPTOTE_EPSILON: f64 = 1e-3;

/// Outcome of evaluating a device at one current.
///
/// `NoTrip` is an expected result, not a failure: currents below pickup, degenerate settings
/// and non-finite intermediate values all land here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TripTime {
    Trip(Time),
    NoTrip,
}

impl TripTime {
    pub fn time(self) -> Option<Time> {
        match self {
            TripTime::Trip(t) => Some(t),
            TripTime::NoTrip => None,
        }
    }

    /// Trip time in seconds, if the device operates.
    pub fn seconds(self) -> Option<f64> {
        self.time().map(|t| t.value)
    }

    pub fn is_trip(self) -> bool {
        matches!(self, TripTime::Trip(_))
    }
}

impl fmt::Display for TripTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripTime::Trip(t) => write!(f, "{:.3} s", t.value),
            TripTime::NoTrip => f.write_str("no trip"),
        }
    }
}

/// Compute the operating time of a protection element.
///
/// # Arguments
/// * `current` - Measured (fault) current
/// * `pickup` - Pickup setting; the element only times above this
/// * `time_multiplier` - TMS/TDS; for definite time this is the operating time in seconds
/// * `curve` - Curve family
/// * `instantaneous` - Optional high-set threshold; reaching it gives [`INSTANTANEOUS_TRIP_S`]
///
/// # Returns
/// `Trip(t)` with `t >= MIN_TRIP_TIME_S` and finite, or `NoTrip`.
pub fn evaluate_trip_time(
    current: Current,
    pickup: Current,
    time_multiplier: f64,
    curve: CurveFamily,
    instantaneous: Option<Current>,
) -> TripTime {
    let i = current.value;
    let i_pickup = pickup.value;

    if !is_positive(i) || !is_positive(i_pickup) {
        return TripTime::NoTrip;
    }
    if !(time_multiplier.is_finite() && time_multiplier >= 0.0) {
        return TripTime::NoTrip;
    }
    if i <= i_pickup {
        return TripTime::NoTrip;
    }

    if let Some(threshold) = instantaneous {
        if i >= threshold.value {
            return TripTime::Trip(s(INSTANTANEOUS_TRIP_S));
        }
    }

    let raw = if curve.is_definite_time() {
        time_multiplier
    } else {
        let m = i / i_pickup;
        if m <= 1.0 + ASYMPTOTE_EPSILON {
            return TripTime::NoTrip;
        }
        time_multiplier * curve.shape().unit_time(m)
    };

    if !raw.is_finite() {
        return TripTime::NoTrip;
    }

    TripTime::Trip(s(raw.max(MIN_TRIP_TIME_S)))
}

/// Configuration of one protection device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSetting {
    /// Pickup current (must be > 0 to ever operate)
    pub pickup: Current,
    /// Time multiplier (TMS/TDS), >= 0
    pub time_multiplier: f64,
    pub curve: CurveFamily,
    /// Instantaneous (high-set) threshold
    pub instantaneous: Option<Current>,
}

impl DeviceSetting {
    /// Create a setting with no instantaneous element.
    pub fn new(pickup: Current, time_multiplier: f64, curve: CurveFamily) -> Self {
        Self {
            pickup,
            time_multiplier,
            curve,
            instantaneous: None,
        }
    }

    /// Add an instantaneous element.
    pub fn with_instantaneous(mut self, threshold: Current) -> Self {
        self.instantaneous = Some(threshold);
        self
    }

    /// Operating time at `current`.
    pub fn trip_time(&self, current: Current) -> TripTime {
        evaluate_trip_time(
            current,
            self.pickup,
            self.time_multiplier,
            self.curve,
            self.instantaneous,
        )
    }
}
