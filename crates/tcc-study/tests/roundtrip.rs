use tcc_curves::CurveFamily;
use tcc_study::schema::*;
use tcc_study::{StudyError, ValidationError, load_json, load_yaml, save_json, save_yaml, validate_study};

fn grading_study() -> Study {
    let mut incomer = DeviceDef::new("inc", "Incomer", 600.0, 0.4, CurveFamily::IecVeryInverse);
    incomer.instantaneous_a = Some(12_000.0);
    let mut bus = DeviceDef::new("bus", "Bus", 1500.0, 1.5, CurveFamily::DefiniteTime);
    bus.visible = false;

    Study {
        version: LATEST_VERSION,
        name: "Roundtrip".to_string(),
        minimum_cti_s: 0.3,
        fault_current_a: Some(5000.0),
        plot: Some(PlotDef {
            min_current_a: 20.0,
            max_current_a: 50_000.0,
            points: 120,
        }),
        devices: vec![
            DeviceDef::new("f1", "Feeder", 200.0, 0.15, CurveFamily::IecStandardInverse),
            incomer,
            bus,
        ],
    }
}

#[test]
fn roundtrip_yaml_empty_study() {
    let study = Study::new("Empty Study");
    validate_study(&study).unwrap();

    let path = std::env::temp_dir().join("tcc_study_roundtrip_empty.yaml");
    save_yaml(&path, &study).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(study, loaded);
}

#[test]
fn roundtrip_yaml_grading_study() {
    let study = grading_study();

    let path = std::env::temp_dir().join("tcc_study_roundtrip_grading.yaml");
    save_yaml(&path, &study).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(study, loaded);
}

#[test]
fn roundtrip_json_grading_study() {
    let study = grading_study();

    let path = std::env::temp_dir().join("tcc_study_roundtrip_grading.json");
    save_json(&path, &study).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(study, loaded);
}

#[test]
fn yaml_uses_canonical_curve_names() {
    let study = grading_study();
    let text = serde_yaml::to_string(&study).unwrap();
    assert!(text.contains("IEC_STANDARD_INVERSE"));
    assert!(text.contains("DEFINITE_TIME"));
}

#[test]
fn save_rejects_invalid_study() {
    let mut study = grading_study();
    study.devices[0].pickup_a = -1.0;

    let path = std::env::temp_dir().join("tcc_study_invalid.yaml");
    let err = save_yaml(&path, &study).unwrap_err();
    assert!(matches!(
        err,
        StudyError::Validation(ValidationError::InvalidValue { .. })
    ));
}

#[test]
fn load_rejects_duplicate_ids() {
    let text = r#"
version: 1
name: Dupes
devices:
  - { id: a, name: A, pickup_a: 100.0, time_multiplier: 0.1, curve: IEC_SI }
  - { id: a, name: B, pickup_a: 200.0, time_multiplier: 0.2, curve: IEC_VI }
"#;
    let path = std::env::temp_dir().join("tcc_study_dupes.yaml");
    std::fs::write(&path, text).unwrap();

    let err = load_yaml(&path).unwrap_err();
    assert!(matches!(
        err,
        StudyError::Validation(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn load_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("tcc_study_does_not_exist.yaml");
    assert!(matches!(load_yaml(&path), Err(StudyError::Io(_))));
}
