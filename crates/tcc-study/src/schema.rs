//! Study schema definitions.

use serde::{Deserialize, Serialize};
use tcc_coordination::{CoordinationDevice, DEFAULT_MINIMUM_CTI_S};
use tcc_core::units::amps;
use tcc_curves::sweep::DEFAULT_SWEEP_POINTS;
use tcc_curves::{CurveFamily, CurveResult, CurveSweep, DeviceSetting};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Study {
    pub version: u32,
    pub name: String,
    #[serde(default = "default_minimum_cti")]
    pub minimum_cti_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_current_a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<PlotDef>,
    #[serde(default)]
    pub devices: Vec<DeviceDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeviceDef {
    pub id: String,
    pub name: String,
    pub pickup_a: f64,
    pub time_multiplier: f64,
    pub curve: CurveFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instantaneous_a: Option<f64>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Current axis of the plotted curves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PlotDef {
    pub min_current_a: f64,
    pub max_current_a: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_minimum_cti() -> f64 {
    DEFAULT_MINIMUM_CTI_S
}

fn default_visible() -> bool {
    true
}

fn default_points() -> usize {
    DEFAULT_SWEEP_POINTS
}

impl Default for PlotDef {
    fn default() -> Self {
        let sweep = CurveSweep::default();
        Self {
            min_current_a: sweep.start().value,
            max_current_a: sweep.end().value,
            points: sweep.points(),
        }
    }
}

impl PlotDef {
    pub fn sweep(&self) -> CurveResult<CurveSweep> {
        CurveSweep::new(
            amps(self.min_current_a),
            amps(self.max_current_a),
            self.points,
        )
    }
}

impl DeviceDef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pickup_a: f64,
        time_multiplier: f64,
        curve: CurveFamily,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pickup_a,
            time_multiplier,
            curve,
            instantaneous_a: None,
            visible: true,
        }
    }

    pub fn setting(&self) -> DeviceSetting {
        let setting = DeviceSetting::new(amps(self.pickup_a), self.time_multiplier, self.curve);
        match self.instantaneous_a {
            Some(threshold) => setting.with_instantaneous(amps(threshold)),
            None => setting,
        }
    }

    pub fn coordination_device(&self) -> CoordinationDevice {
        CoordinationDevice {
            name: self.name.clone(),
            setting: self.setting(),
            visible: self.visible,
        }
    }
}

impl Study {
    /// Empty study at the latest version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            minimum_cti_s: DEFAULT_MINIMUM_CTI_S,
            fault_current_a: None,
            plot: None,
            devices: Vec::new(),
        }
    }

    pub fn device(&self, id: &str) -> Option<&DeviceDef> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// All devices in file order, hidden ones included.
    pub fn coordination_devices(&self) -> Vec<CoordinationDevice> {
        self.devices
            .iter()
            .map(DeviceDef::coordination_device)
            .collect()
    }

    /// Plot sweep, falling back to the default range.
    pub fn sweep(&self) -> CurveResult<CurveSweep> {
        self.plot.unwrap_or_default().sweep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
version: 1
name: Minimal
devices:
  - id: f1
    name: Feeder
    pickup_a: 200.0
    time_multiplier: 0.15
    curve: IEC_SI
"#;

    #[test]
    fn defaults_fill_optional_fields() {
        let study: Study = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(study.minimum_cti_s, DEFAULT_MINIMUM_CTI_S);
        assert_eq!(study.fault_current_a, None);
        assert_eq!(study.plot, None);

        let device = &study.devices[0];
        assert_eq!(device.curve, CurveFamily::IecStandardInverse);
        assert!(device.visible);
        assert_eq!(device.instantaneous_a, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = MINIMAL.replace("name: Minimal", "name: Minimal\ncolour: red");
        assert!(serde_yaml::from_str::<Study>(&text).is_err());
    }

    #[test]
    fn unknown_curve_is_rejected() {
        let text = MINIMAL.replace("IEC_SI", "IEC_BOGUS");
        assert!(serde_yaml::from_str::<Study>(&text).is_err());
    }

    #[test]
    fn device_setting_carries_instantaneous() {
        let mut def = DeviceDef::new("f1", "Feeder", 200.0, 0.15, CurveFamily::IecVeryInverse);
        assert_eq!(def.setting().instantaneous, None);

        def.instantaneous_a = Some(4000.0);
        let setting = def.setting();
        assert_eq!(setting.instantaneous.map(|i| i.value), Some(4000.0));
        assert_eq!(setting.pickup.value, 200.0);
    }

    #[test]
    fn coordination_devices_keep_visibility() {
        let mut study = Study::new("s");
        let mut hidden = DeviceDef::new("b", "Bus", 800.0, 0.3, CurveFamily::DefiniteTime);
        hidden.visible = false;
        study.devices = vec![
            DeviceDef::new("a", "Feeder", 200.0, 0.1, CurveFamily::IecStandardInverse),
            hidden,
        ];

        let devices = study.coordination_devices();
        assert_eq!(devices.len(), 2);
        assert!(devices[0].visible);
        assert!(!devices[1].visible);
        assert_eq!(devices[1].name, "Bus");
        assert_eq!(study.device("b").map(|d| d.pickup_a), Some(800.0));
        assert!(study.device("zz").is_none());
    }

    #[test]
    fn sweep_defaults_to_full_range() {
        let study = Study::new("s");
        assert_eq!(study.sweep().unwrap(), CurveSweep::default());

        let custom = Study {
            plot: Some(PlotDef {
                min_current_a: 50.0,
                max_current_a: 5000.0,
                points: 20,
            }),
            ..Study::new("s")
        };
        let sweep = custom.sweep().unwrap();
        assert_eq!(sweep.points(), 20);
        assert_eq!(sweep.start().value, 50.0);
    }
}
