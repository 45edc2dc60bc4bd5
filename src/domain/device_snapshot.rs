use crate::domain::device_state::DeviceState;
use serde::Serialize;

/// The flat device representation handed to the presentation layer.
#[derive(PartialEq, Debug, Serialize)]
pub struct DeviceSnapshot {
    pub is_on: bool,
    pub rgb_color: (u8, u8, u8),
    pub brightness: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_speed: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_temp_kelvin: Option<u32>,
    pub device_type_name: String,
}

impl From<&DeviceState> for DeviceSnapshot {
    fn from(state: &DeviceState) -> Self {
        DeviceSnapshot {
            is_on: state.is_on(),
            rgb_color: state.color().rgb().into(),
            brightness: state.brightness(),
            effect: state.effect().map(|effect| effect.id()),
            effect_speed: state.effect().map(|effect| effect.speed()),
            color_temp_kelvin: state.color().kelvin(),
            device_type_name: state.device_type_name().to_string(),
        }
    }
}
