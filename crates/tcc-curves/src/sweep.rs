//! Log-spaced current sweeps for plotting time-current curves.

use crate::error::{CurveError, CurveResult};
use crate::evaluator::DeviceSetting;
use serde::{Deserialize, Serialize};
use std::fmt;
use tcc_core::numeric::{is_positive, log_space};
use tcc_core::units::{Current, amps};

/// Default number of points on a plotted curve.
pub const DEFAULT_SWEEP_POINTS: usize = 200;

/// Current range and density of a plotted curve.
///
/// Points are logarithmically spaced, matching log-log TCC axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSweep {
    start: Current,
    end: Current,
    points: usize,
}

impl CurveSweep {
    /// Create a sweep from `start` to `end`; both endpoints are sampled.
    pub fn new(start: Current, end: Current, points: usize) -> CurveResult<Self> {
        if points < 2 {
            return Err(CurveError::InvalidSweep {
                what: "sweep must have at least 2 points",
            });
        }
        if !is_positive(start.value) || !is_positive(end.value) {
            return Err(CurveError::InvalidSweep {
                what: "sweep bounds must be positive and finite",
            });
        }
        if end.value <= start.value {
            return Err(CurveError::InvalidSweep {
                what: "sweep end must be above start",
            });
        }
        Ok(Self { start, end, points })
    }

    pub fn start(&self) -> Current {
        self.start
    }

    pub fn end(&self) -> Current {
        self.end
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// Generate all sample currents, endpoints exact.
    pub fn currents(&self) -> Vec<Current> {
        log_space(self.start.value, self.end.value, self.points)
            .into_iter()
            .map(amps)
            .collect()
    }
}

impl Default for CurveSweep {
    /// 10 A to 100 kA.
    fn default() -> Self {
        Self {
            start: amps(10.0),
            end: amps(100_000.0),
            points: DEFAULT_SWEEP_POINTS,
        }
    }
}

impl fmt::Display for CurveSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} A to {} A ({} points, logarithmic)",
            self.start.value, self.end.value, self.points
        )
    }
}

/// One point on a plotted curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub current_a: f64,
    pub time_s: f64,
}

/// Evaluate `setting` across `sweep`, keeping only the currents where it operates.
pub fn sample_curve(setting: &DeviceSetting, sweep: &CurveSweep) -> Vec<CurvePoint> {
    sweep
        .currents()
        .into_iter()
        .filter_map(|current| {
            setting.trip_time(current).seconds().map(|time_s| CurvePoint {
                current_a: current.value,
                time_s,
            })
        })
        .collect()
}
