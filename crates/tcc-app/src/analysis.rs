//! Curve sampling and grading analysis over a loaded study.

use rayon::prelude::*;
use tcc_coordination::{CoordinationReport, build_coordination_report};
use tcc_core::numeric::ensure_finite;
use tcc_core::units::amps;
use tcc_curves::{CurvePoint, CurveSweep, TripTime, sample_curve};
use tcc_study::schema::{DeviceDef, Study};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::study_service::get_device;

/// Sampled curve of one device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCurve {
    pub id: String,
    pub name: String,
    /// Operating points only, ascending current
    pub points: Vec<CurvePoint>,
}

/// Overrides applied on top of the study defaults when grading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinateOptions {
    pub fault_current_a: Option<f64>,
    pub minimum_cti_s: Option<f64>,
}

/// Grading outcome at one fault current of a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradingRow {
    pub fault_current_a: f64,
    /// Visible devices that operate
    pub operating: usize,
    /// Smallest adjacent margin, if at least two devices operate
    pub min_margin_s: Option<f64>,
    pub violations: usize,
}

impl GradingRow {
    pub fn is_coordinated(&self) -> bool {
        self.violations == 0
    }
}

fn checked_cti(minimum_cti_s: f64) -> AppResult<f64> {
    if ensure_finite(minimum_cti_s, "minimum CTI")? < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "minimum CTI must be non-negative, got {minimum_cti_s}"
        )));
    }
    Ok(minimum_cti_s)
}

fn curve_for(device: &DeviceDef, sweep: &CurveSweep) -> DeviceCurve {
    let points = sample_curve(&device.setting(), sweep);
    debug!(device = %device.id, points = points.len(), "sampled curve");
    if points.is_empty() {
        warn!(device = %device.id, "device never operates inside {}", sweep);
    }
    DeviceCurve {
        id: device.id.clone(),
        name: device.name.clone(),
        points,
    }
}

/// Curves of all visible devices, in study order.
///
/// Uses the study's plot range unless `sweep` is given.
pub fn device_curves(study: &Study, sweep: Option<CurveSweep>) -> AppResult<Vec<DeviceCurve>> {
    let sweep = match sweep {
        Some(sweep) => sweep,
        None => study.sweep()?,
    };

    let curves: Vec<DeviceCurve> = study
        .devices
        .par_iter()
        .filter(|device| device.visible)
        .map(|device| curve_for(device, &sweep))
        .collect();

    info!(curves = curves.len(), "generated device curves over {}", sweep);
    Ok(curves)
}

/// Curve of one device, hidden or not.
pub fn device_curve(
    study: &Study,
    device_id: &str,
    sweep: Option<CurveSweep>,
) -> AppResult<DeviceCurve> {
    let device = get_device(study, device_id)?;
    let sweep = match sweep {
        Some(sweep) => sweep,
        None => study.sweep()?,
    };
    Ok(curve_for(device, &sweep))
}

/// Operating time of one device at `current_a`.
pub fn trip_time(study: &Study, device_id: &str, current_a: f64) -> AppResult<TripTime> {
    let device = get_device(study, device_id)?;
    let result = device.setting().trip_time(amps(current_a));
    debug!(device = %device_id, current_a, %result, "evaluated trip time");
    Ok(result)
}

/// Grade the visible devices at one fault current.
///
/// Option values win over the study's `fault_current_a` and `minimum_cti_s`.
pub fn coordinate(study: &Study, options: &CoordinateOptions) -> AppResult<CoordinationReport> {
    let fault_current_a = options
        .fault_current_a
        .or(study.fault_current_a)
        .ok_or_else(|| {
            AppError::InvalidInput("no fault current given and none set in the study".to_string())
        })?;
    if ensure_finite(fault_current_a, "fault current")? <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "fault current must be positive, got {fault_current_a}"
        )));
    }

    let minimum_cti_s = checked_cti(options.minimum_cti_s.unwrap_or(study.minimum_cti_s))?;

    let devices = study.coordination_devices();
    let report = build_coordination_report(&devices, amps(fault_current_a), minimum_cti_s);

    info!(
        fault_current_a,
        operating = report.sequence.len(),
        violations = report.violations().count(),
        "built coordination report"
    );
    Ok(report)
}

/// Grade the study at every current of `sweep`.
pub fn grading_scan(
    study: &Study,
    sweep: &CurveSweep,
    minimum_cti_s: Option<f64>,
) -> AppResult<Vec<GradingRow>> {
    let minimum_cti_s = checked_cti(minimum_cti_s.unwrap_or(study.minimum_cti_s))?;

    let devices = study.coordination_devices();
    let rows: Vec<GradingRow> = sweep
        .currents()
        .into_par_iter()
        .map(|fault| {
            let report = build_coordination_report(&devices, fault, minimum_cti_s);
            GradingRow {
                fault_current_a: fault.value,
                operating: report.sequence.len(),
                min_margin_s: report
                    .margins
                    .iter()
                    .map(|m| m.margin_s)
                    .min_by(f64::total_cmp),
                violations: report.violations().count(),
            }
        })
        .collect();

    let failing = rows.iter().filter(|row| !row.is_coordinated()).count();
    info!(points = rows.len(), failing, "finished grading scan");
    Ok(rows)
}
