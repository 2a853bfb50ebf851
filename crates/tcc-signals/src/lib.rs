//! Waveform and phasor helpers for protection studies.
//!
//! - **waveform**: synthetic sine series with soft clipping to mimic CT saturation
//! - **mho**: self-polarized distance characteristic as a circle of points
//! - **sequence**: Fortescue decomposition into zero/positive/negative sequence
//!
//! Everything here is a pure transformation. Malformed inputs (non-finite or non-positive
//! magnitudes) degrade to zero vectors instead of failing.

pub mod mho;
pub mod sequence;
pub mod waveform;

pub use mho::{MHO_POINTS, MhoCircle, MhoPoint, mho_circle_points};
pub use sequence::{Phasor, SequenceComponents, decompose};
pub use waveform::{SAMPLES_PER_CYCLE, WaveformSample, WaveformSpec, generate_waveform};
