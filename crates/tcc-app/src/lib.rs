//! Shared application service layer for the protection toolkit.
//!
//! Gives CLI and GUI front ends one interface for loading studies, sampling device
//! curves, grading devices at a fault current and exporting results.

pub mod analysis;
pub mod error;
pub mod export;
pub mod study_service;

// Re-export key types for convenience
pub use analysis::{
    CoordinateOptions, DeviceCurve, GradingRow, coordinate, device_curve, device_curves,
    grading_scan, trip_time,
};
pub use error::{AppError, AppResult};
pub use study_service::{
    DeviceSummary, get_device, list_devices, load_study, save_study, validate_study,
};
