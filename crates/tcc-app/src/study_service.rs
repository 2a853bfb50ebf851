//! Study loading, saving, validation, and introspection.

use std::path::Path;
use tcc_curves::CurveFamily;
use tcc_study::StudyError;
use tcc_study::schema::{DeviceDef, Study};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Summary of a device for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSummary {
    pub id: String,
    pub name: String,
    pub curve: CurveFamily,
    pub pickup_a: f64,
    pub time_multiplier: f64,
    pub instantaneous_a: Option<f64>,
    pub visible: bool,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a study from YAML, or JSON when the extension is `.json`.
pub fn load_study(path: &Path) -> AppResult<Study> {
    let loaded = if is_json(path) {
        tcc_study::load_json(path)
    } else {
        tcc_study::load_yaml(path)
    };

    let study = loaded.map_err(|e| match e {
        StudyError::Io(source) => AppError::StudyFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })?;

    info!(
        study = %study.name,
        devices = study.devices.len(),
        "loaded study from {}",
        path.display()
    );
    Ok(study)
}

/// Save a study; the format follows the extension as in [`load_study`].
pub fn save_study(path: &Path, study: &Study) -> AppResult<()> {
    let saved = if is_json(path) {
        tcc_study::save_json(path, study)
    } else {
        tcc_study::save_yaml(path, study)
    };

    saved.map_err(|e| match e {
        StudyError::Io(source) => AppError::StudyFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })?;

    info!(study = %study.name, "saved study to {}", path.display());
    Ok(())
}

/// Validate study structure and device settings.
pub fn validate_study(study: &Study) -> AppResult<()> {
    tcc_study::validate_study(study)?;
    Ok(())
}

/// List all devices in the study with summaries.
pub fn list_devices(study: &Study) -> Vec<DeviceSummary> {
    study
        .devices
        .iter()
        .map(|device| DeviceSummary {
            id: device.id.clone(),
            name: device.name.clone(),
            curve: device.curve,
            pickup_a: device.pickup_a,
            time_multiplier: device.time_multiplier,
            instantaneous_a: device.instantaneous_a,
            visible: device.visible,
        })
        .collect()
}

/// Get a specific device by ID.
pub fn get_device<'a>(study: &'a Study, device_id: &str) -> AppResult<&'a DeviceDef> {
    study
        .device(device_id)
        .ok_or_else(|| AppError::DeviceNotFound(device_id.to_string()))
}
