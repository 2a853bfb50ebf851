//! Devices taking part in a coordination study.

use tcc_curves::DeviceSetting;

/// A named device with its setting and plot visibility.
///
/// Hidden devices stay in the study but are left out of the analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinationDevice {
    pub name: String,
    pub setting: DeviceSetting,
    pub visible: bool,
}

impl CoordinationDevice {
    /// Create a visible device.
    pub fn new(name: impl Into<String>, setting: DeviceSetting) -> Self {
        Self {
            name: name.into(),
            setting,
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
