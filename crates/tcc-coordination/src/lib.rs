//! tcc-coordination: grading analysis between protection devices.
//!
//! Evaluates every visible device at one fault current, ranks the devices that operate by
//! trip time and checks each adjacent pair against a minimum coordination time interval (CTI).
//!
//! The analysis is pure and recomputed on every call; a study with no operating device
//! produces an empty report rather than an error.

pub mod device;
pub mod report;

pub use device::CoordinationDevice;
pub use report::{
    CoordinationReport, DEFAULT_MINIMUM_CTI_S, GradingMargin, TimelineEntry, TripEntry,
    build_coordination_report,
};
