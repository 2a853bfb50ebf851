//! Study validation logic.

use crate::schema::{DeviceDef, LATEST_VERSION, PlotDef, Study};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Empty value: {field}")]
    Empty { field: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_study(study: &Study) -> Result<(), ValidationError> {
    if study.version == 0 || study.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    if study.name.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: "name".to_string(),
        });
    }

    if !study.minimum_cti_s.is_finite() || study.minimum_cti_s < 0.0 {
        return Err(invalid(
            "minimum_cti_s",
            study.minimum_cti_s,
            "must be finite and non-negative",
        ));
    }

    if let Some(fault) = study.fault_current_a {
        if !fault.is_finite() || fault <= 0.0 {
            return Err(invalid("fault_current_a", fault, "must be positive"));
        }
    }

    if let Some(plot) = &study.plot {
        validate_plot(plot)?;
    }

    let mut ids = HashSet::new();
    for device in &study.devices {
        if !ids.insert(&device.id) {
            return Err(ValidationError::DuplicateId {
                id: device.id.clone(),
                context: "devices".to_string(),
            });
        }
        validate_device(device)?;
    }

    Ok(())
}

fn validate_plot(plot: &PlotDef) -> Result<(), ValidationError> {
    if !plot.min_current_a.is_finite() || plot.min_current_a <= 0.0 {
        return Err(invalid("plot.min_current_a", plot.min_current_a, "must be positive"));
    }
    if !plot.max_current_a.is_finite() || plot.max_current_a <= plot.min_current_a {
        return Err(invalid(
            "plot.max_current_a",
            plot.max_current_a,
            "must be above min_current_a",
        ));
    }
    if plot.points < 2 {
        return Err(ValidationError::InvalidValue {
            field: "plot.points".to_string(),
            value: plot.points.to_string(),
            reason: "need at least 2 points".to_string(),
        });
    }
    Ok(())
}

fn validate_device(device: &DeviceDef) -> Result<(), ValidationError> {
    if device.id.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: "device id".to_string(),
        });
    }
    if device.name.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: format!("device '{}' name", device.id),
        });
    }

    if !device.pickup_a.is_finite() || device.pickup_a <= 0.0 {
        return Err(invalid(
            format!("device '{}' pickup_a", device.id),
            device.pickup_a,
            "must be positive",
        ));
    }

    if !device.time_multiplier.is_finite() || device.time_multiplier < 0.0 {
        return Err(invalid(
            format!("device '{}' time_multiplier", device.id),
            device.time_multiplier,
            "must be finite and non-negative",
        ));
    }

    if let Some(threshold) = device.instantaneous_a {
        // The pickup gate runs first, so a threshold at or below pickup would never be reached
        if !threshold.is_finite() || threshold <= device.pickup_a {
            return Err(invalid(
                format!("device '{}' instantaneous_a", device.id),
                threshold,
                "must be above pickup_a",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcc_curves::CurveFamily;

    fn study() -> Study {
        let mut study = Study::new("Grading");
        study.devices = vec![
            DeviceDef::new("f1", "Feeder", 200.0, 0.15, CurveFamily::IecStandardInverse),
            DeviceDef::new("inc", "Incomer", 600.0, 0.4, CurveFamily::IecVeryInverse),
        ];
        study
    }

    #[test]
    fn valid_study_passes() {
        validate_study(&study()).unwrap();
        validate_study(&Study::new("Empty")).unwrap();
    }

    #[test]
    fn duplicate_device_id() {
        let mut s = study();
        s.devices[1].id = "f1".to_string();
        assert!(matches!(
            validate_study(&s),
            Err(ValidationError::DuplicateId { id, .. }) if id == "f1"
        ));
    }

    #[test]
    fn version_out_of_range() {
        for version in [0, LATEST_VERSION + 1] {
            let mut s = study();
            s.version = version;
            assert_eq!(
                validate_study(&s),
                Err(ValidationError::UnsupportedVersion { version })
            );
        }
    }

    #[test]
    fn bad_device_values() {
        let cases: [fn(&mut DeviceDef); 5] = [
            |d| d.pickup_a = 0.0,
            |d| d.pickup_a = f64::NAN,
            |d| d.time_multiplier = -0.1,
            |d| d.instantaneous_a = Some(150.0),
            |d| d.instantaneous_a = Some(200.0),
        ];
        for mutate in cases {
            let mut s = study();
            mutate(&mut s.devices[0]);
            assert!(matches!(
                validate_study(&s),
                Err(ValidationError::InvalidValue { .. })
            ));
        }
    }

    #[test]
    fn zero_multiplier_is_allowed() {
        let mut s = study();
        s.devices[0].time_multiplier = 0.0;
        validate_study(&s).unwrap();
    }

    #[test]
    fn blank_names() {
        let mut s = study();
        s.devices[0].name = "  ".to_string();
        assert!(matches!(validate_study(&s), Err(ValidationError::Empty { .. })));

        let mut s = study();
        s.name = String::new();
        assert!(matches!(validate_study(&s), Err(ValidationError::Empty { .. })));
    }

    #[test]
    fn study_level_values() {
        let mut s = study();
        s.minimum_cti_s = -0.2;
        assert!(validate_study(&s).is_err());

        let mut s = study();
        s.fault_current_a = Some(0.0);
        assert!(validate_study(&s).is_err());

        let mut s = study();
        s.plot = Some(PlotDef {
            min_current_a: 100.0,
            max_current_a: 10.0,
            points: 50,
        });
        assert!(validate_study(&s).is_err());

        s.plot = Some(PlotDef {
            points: 1,
            ..PlotDef::default()
        });
        assert!(validate_study(&s).is_err());
    }
}
