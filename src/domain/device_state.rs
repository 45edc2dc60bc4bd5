use crate::domain::color::Rgb;
use std::sync::Arc;

pub const MAX_BRIGHTNESS: u8 = 100;
pub const MAX_EFFECT_SPEED: u8 = 100;
pub const MIN_COLOR_TEMP_KELVIN: u32 = 1_000;
pub const MAX_COLOR_TEMP_KELVIN: u32 = 10_000;

/// The active color source of a light. A device is either showing an RGB color or a white color temperature, never both.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ColorSource {
    Rgb(Rgb),
    Temperature(u32),
}

impl ColorSource {
    pub fn temperature(kelvin: u32) -> Self {
        ColorSource::Temperature(kelvin.clamp(MIN_COLOR_TEMP_KELVIN, MAX_COLOR_TEMP_KELVIN))
    }

    /// Returns the RGB color the light shows, approximated for color temperatures.
    pub fn rgb(&self) -> Rgb {
        match self {
            ColorSource::Rgb(color) => *color,
            ColorSource::Temperature(kelvin) => Rgb::from_kelvin(*kelvin),
        }
    }

    pub fn kelvin(&self) -> Option<u32> {
        match self {
            ColorSource::Rgb(_) => None,
            ColorSource::Temperature(kelvin) => Some(*kelvin),
        }
    }

    fn clamped(self) -> Self {
        match self {
            ColorSource::Rgb(_) => self,
            ColorSource::Temperature(kelvin) => ColorSource::temperature(kelvin),
        }
    }
}

/// A running effect. The speed only exists together with an effect.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Effect {
    id: u32,
    speed: u8,
}

impl Effect {
    pub fn new(id: u32, speed: u8) -> Self {
        Effect {
            id,
            speed: speed.min(MAX_EFFECT_SPEED),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct DeviceState {
    is_on: bool,
    color: ColorSource,
    brightness: u8,
    effect: Option<Effect>,
    device_type_name: Arc<str>,
}

impl DeviceState {
    pub fn new(device_type_name: impl Into<Arc<str>>) -> Self {
        DeviceState {
            is_on: false,
            color: ColorSource::Rgb(Rgb::WHITE),
            brightness: MAX_BRIGHTNESS,
            effect: None,
            device_type_name: device_type_name.into(),
        }
    }

    pub fn with_power(mut self, is_on: bool) -> Self {
        self.is_on = is_on;
        self
    }

    pub fn with_color(mut self, color: ColorSource) -> Self {
        self.color = color.clamped();
        self
    }

    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness.min(MAX_BRIGHTNESS);
        self
    }

    pub fn with_effect(mut self, effect: Option<Effect>) -> Self {
        self.effect = effect;
        self
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn color(&self) -> ColorSource {
        self.color
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn effect(&self) -> Option<Effect> {
        self.effect
    }

    pub fn device_type_name(&self) -> &str {
        &self.device_type_name
    }

    /// Merges a delta into the state. Fields absent from the delta are left untouched and values are clamped to their legal range.
    pub fn apply(&mut self, delta: &DeviceStateDelta) {
        if let Some(is_on) = delta.is_on {
            self.is_on = is_on;
        }
        if let Some(color) = delta.color {
            self.color = color.clamped();
        }
        if let Some(brightness) = delta.brightness {
            self.brightness = brightness.min(MAX_BRIGHTNESS);
        }
        if let Some(effect) = delta.effect {
            self.effect = effect;
        }
    }
}

/// A partial device state update, only the fields that are set will change.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct DeviceStateDelta {
    pub is_on: Option<bool>,
    pub color: Option<ColorSource>,
    pub brightness: Option<u8>,
    /// `Some(None)` stops the running effect.
    pub effect: Option<Option<Effect>>,
}

impl DeviceStateDelta {
    pub fn is_empty(&self) -> bool {
        self.is_on.is_none() && self.color.is_none() && self.brightness.is_none() && self.effect.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> DeviceState {
        DeviceState::new("ELK-BLEDOM").with_power(true).with_brightness(40)
    }

    #[test]
    fn new_state_is_off_and_white() {
        let state = DeviceState::new("ELK-BLEDOM");

        assert!(!state.is_on());
        assert_eq!(state.color(), ColorSource::Rgb(Rgb::WHITE));
        assert_eq!(state.brightness(), 100);
        assert_eq!(state.effect(), None);
        assert_eq!(state.device_type_name(), "ELK-BLEDOM");
    }

    #[test]
    fn apply_leaves_absent_fields_untouched() {
        let mut state = state().with_effect(Some(Effect::new(3, 50)));

        state.apply(&DeviceStateDelta {
            brightness: Some(70),
            ..Default::default()
        });

        assert_eq!(state.brightness(), 70);
        assert!(state.is_on());
        assert_eq!(state.effect(), Some(Effect::new(3, 50)));
    }

    #[test]
    fn apply_clamps_brightness() {
        let mut state = state();

        state.apply(&DeviceStateDelta {
            brightness: Some(250),
            ..Default::default()
        });

        assert_eq!(state.brightness(), MAX_BRIGHTNESS);
    }

    #[test]
    fn apply_clamps_color_temperature() {
        let mut state = state();

        state.apply(&DeviceStateDelta {
            color: Some(ColorSource::Temperature(40_000)),
            ..Default::default()
        });

        assert_eq!(state.color(), ColorSource::Temperature(MAX_COLOR_TEMP_KELVIN));
    }

    #[test]
    fn switching_to_rgb_leaves_temperature_mode() {
        let mut state = state().with_color(ColorSource::temperature(2700));

        state.apply(&DeviceStateDelta {
            color: Some(ColorSource::Rgb(Rgb(10, 20, 30))),
            ..Default::default()
        });

        assert_eq!(state.color().kelvin(), None);
        assert_eq!(state.color().rgb(), Rgb(10, 20, 30));
    }

    #[test]
    fn apply_can_stop_an_effect() {
        let mut state = state().with_effect(Some(Effect::new(3, 50)));

        state.apply(&DeviceStateDelta {
            effect: Some(None),
            ..Default::default()
        });

        assert_eq!(state.effect(), None);
    }

    #[test]
    fn effect_speed_is_clamped() {
        assert_eq!(Effect::new(1, 180).speed(), MAX_EFFECT_SPEED);
    }

    #[test]
    fn empty_delta() {
        assert!(DeviceStateDelta::default().is_empty());
        assert!(
            !DeviceStateDelta {
                effect: Some(None),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
