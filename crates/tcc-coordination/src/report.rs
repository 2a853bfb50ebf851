//! Coordination report construction.

use crate::device::CoordinationDevice;
use serde::{Deserialize, Serialize};
use std::iter;
use tcc_core::units::Current;

/// Default minimum coordination time interval (s).
pub const DEFAULT_MINIMUM_CTI_S: f64 = 0.2;

/// A device that operates at the fault current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEntry {
    /// Position of the device in the input list
    pub device_index: usize,
    pub name: String,
    pub trip_time_s: f64,
}

/// Grading margin between two devices adjacent in the trip sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingMargin {
    /// Device that trips first
    pub downstream: String,
    /// Device that trips next
    pub upstream: String,
    /// `upstream time − downstream time`, never negative
    pub margin_s: f64,
    /// Margin below the minimum CTI
    pub violation: bool,
}

/// One step of the rendered timeline: a trip followed by the margin to the next trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEntry<'a> {
    Trip(&'a TripEntry),
    Margin(&'a GradingMargin),
}

/// Result of grading a set of devices at one fault current.
///
/// `margins[i]` sits between `sequence[i]` and `sequence[i + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinationReport {
    pub fault_current_a: f64,
    pub minimum_cti_s: f64,
    /// Operating devices, fastest first
    pub sequence: Vec<TripEntry>,
    pub margins: Vec<GradingMargin>,
}

impl CoordinationReport {
    /// No device operates at this current.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// True when no adjacent pair violates the CTI. Vacuously true for empty reports.
    pub fn is_coordinated(&self) -> bool {
        self.margins.iter().all(|m| !m.violation)
    }

    pub fn violations(&self) -> impl Iterator<Item = &GradingMargin> {
        self.margins.iter().filter(|m| m.violation)
    }

    pub fn first_to_trip(&self) -> Option<&TripEntry> {
        self.sequence.first()
    }

    /// Trips interleaved with the margins between them.
    pub fn timeline(&self) -> impl Iterator<Item = TimelineEntry<'_>> {
        self.sequence.iter().enumerate().flat_map(move |(i, entry)| {
            iter::once(TimelineEntry::Trip(entry))
                .chain(self.margins.get(i).map(TimelineEntry::Margin))
        })
    }
}

/// Grade `devices` at `fault_current`.
///
/// Hidden devices and devices that do not operate are excluded. Devices with equal trip
/// times keep their input order.
pub fn build_coordination_report(
    devices: &[CoordinationDevice],
    fault_current: Current,
    minimum_cti_s: f64,
) -> CoordinationReport {
    let mut sequence: Vec<TripEntry> = devices
        .iter()
        .enumerate()
        .filter(|(_, device)| device.visible)
        .filter_map(|(device_index, device)| {
            device
                .setting
                .trip_time(fault_current)
                .seconds()
                .map(|trip_time_s| TripEntry {
                    device_index,
                    name: device.name.clone(),
                    trip_time_s,
                })
        })
        .collect();

    // Stable: ties keep input order
    sequence.sort_by(|a, b| a.trip_time_s.total_cmp(&b.trip_time_s));

    let margins = sequence
        .windows(2)
        .map(|pair| {
            let margin_s = pair[1].trip_time_s - pair[0].trip_time_s;
            GradingMargin {
                downstream: pair[0].name.clone(),
                upstream: pair[1].name.clone(),
                margin_s,
                violation: margin_s < minimum_cti_s,
            }
        })
        .collect();

    CoordinationReport {
        fault_current_a: fault_current.value,
        minimum_cti_s,
        sequence,
        margins,
    }
}
