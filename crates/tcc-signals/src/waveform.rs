//! Synthetic sine waveforms with optional CT saturation.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tcc_core::numeric::is_positive;

/// Default sampling density.
pub const SAMPLES_PER_CYCLE: usize = 64;

/// Share of the excess above the saturation limit that survives clipping.
const SATURATION_EXCESS_GAIN: f64 = 0.1;

/// One waveform sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformSample {
    pub index: usize,
    /// Time since the first sample (s); 0 when the frequency is not positive
    pub time_s: f64,
    pub amplitude: f64,
}

/// Sine waveform parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSpec {
    pub cycles: usize,
    pub frequency_hz: f64,
    /// Peak amplitude
    pub magnitude: f64,
    pub phase_shift_deg: f64,
    /// 0 = ideal CT, 1 = fully saturated core; clamped to `[0, 1]`
    pub saturation_factor: f64,
    pub samples_per_cycle: usize,
}

impl Default for WaveformSpec {
    fn default() -> Self {
        Self {
            cycles: 2,
            frequency_hz: 50.0,
            magnitude: 1.0,
            phase_shift_deg: 0.0,
            saturation_factor: 0.0,
            samples_per_cycle: SAMPLES_PER_CYCLE,
        }
    }
}

impl WaveformSpec {
    pub fn sample_count(&self) -> usize {
        self.cycles.saturating_mul(self.samples_per_cycle)
    }

    /// Level above which the secondary is compressed, or `None` for an ideal CT.
    pub fn saturation_limit(&self) -> Option<f64> {
        let sf = if self.saturation_factor.is_nan() {
            0.0
        } else {
            self.saturation_factor.clamp(0.0, 1.0)
        };
        (sf > 0.0).then(|| self.magnitude * (1.0 - sf))
    }

    /// Sample `index` of the series.
    pub fn sample(&self, index: usize) -> WaveformSample {
        let t = if self.samples_per_cycle == 0 {
            0.0
        } else {
            index as f64 / self.samples_per_cycle as f64
        };
        let time_s = if is_positive(self.frequency_hz) {
            t / self.frequency_hz
        } else {
            0.0
        };

        let amplitude = if is_positive(self.magnitude) {
            let ideal = self.magnitude * (TAU * t + self.phase_shift_deg.to_radians()).sin();
            match self.saturation_limit() {
                Some(limit) => saturate(ideal, limit),
                None => ideal,
            }
        } else {
            0.0
        };

        WaveformSample {
            index,
            time_s,
            amplitude,
        }
    }

    /// Restartable iterator over all samples.
    pub fn samples(&self) -> impl Iterator<Item = WaveformSample> + use<> {
        let spec = *self;
        (0..spec.sample_count()).map(move |i| spec.sample(i))
    }
}

/// Compress the part of `value` beyond `limit` to a tenth of its size.
fn saturate(value: f64, limit: f64) -> f64 {
    let excess = value.abs() - limit;
    if excess > 0.0 {
        value.signum() * (limit + excess * SATURATION_EXCESS_GAIN)
    } else {
        value
    }
}

/// Generate `cycles` cycles at [`SAMPLES_PER_CYCLE`] samples per cycle.
pub fn generate_waveform(
    cycles: usize,
    frequency_hz: f64,
    magnitude: f64,
    phase_shift_deg: f64,
    saturation_factor: f64,
) -> Vec<WaveformSample> {
    WaveformSpec {
        cycles,
        frequency_hz,
        magnitude,
        phase_shift_deg,
        saturation_factor,
        samples_per_cycle: SAMPLES_PER_CYCLE,
    }
    .samples()
    .collect()
}

#[cfg(test)]
fn peak(samples: &[WaveformSample]) -> f64 {
    samples.iter().map(|s| s.amplitude.abs()).fold(0.0, f64::max)
}
