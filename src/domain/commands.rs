use crate::domain::color::Rgb;
use crate::domain::device_state::{ColorSource, DeviceState, DeviceStateDelta, Effect};
use crate::extensions::unsigned_ints_ext::PercentConversions;

/// Speed of an effect that is started without one.
pub const DEFAULT_EFFECT_SPEED: u8 = 50;

/// A change requested directly by the user, bypassing the audio pipeline.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ManualCommand {
    Power(bool),
    /// Flips the power of the state the command is applied to.
    Toggle,
    SetColor(Rgb),
    /// Brightness in percent.
    SetBrightness(u8),
    /// Changes the effect, its speed in percent, or both. A speed without an effect only applies to a running effect.
    SetEffect { effect: Option<u32>, speed: Option<u8> },
    ClearEffect,
    SetColorTemperature(u32),
    /// Changes only the given channels, `a` is an 8-bit level that maps to the brightness.
    ChangeOnly {
        r: Option<u8>,
        g: Option<u8>,
        b: Option<u8>,
        a: Option<u8>,
    },
}

impl ManualCommand {
    pub fn to_delta(&self, current: &DeviceState) -> DeviceStateDelta {
        match *self {
            ManualCommand::Power(is_on) => DeviceStateDelta {
                is_on: Some(is_on),
                ..Default::default()
            },
            ManualCommand::Toggle => DeviceStateDelta {
                is_on: Some(!current.is_on()),
                ..Default::default()
            },
            ManualCommand::SetColor(color) => DeviceStateDelta {
                color: Some(ColorSource::Rgb(color)),
                effect: Some(None),
                ..Default::default()
            },
            ManualCommand::SetBrightness(brightness) => DeviceStateDelta {
                brightness: Some(brightness),
                ..Default::default()
            },
            ManualCommand::SetEffect { effect, speed } => {
                let running = current.effect();
                let effect = match (effect, running) {
                    (Some(id), _) => Some(Effect::new(id, speed.or(running.map(|e| e.speed())).unwrap_or(DEFAULT_EFFECT_SPEED))),
                    (None, Some(running)) => speed.map(|speed| Effect::new(running.id(), speed)),
                    (None, None) => None,
                };

                DeviceStateDelta {
                    effect: effect.map(Some),
                    ..Default::default()
                }
            }
            ManualCommand::ClearEffect => DeviceStateDelta {
                effect: Some(None),
                ..Default::default()
            },
            ManualCommand::SetColorTemperature(kelvin) => DeviceStateDelta {
                color: Some(ColorSource::temperature(kelvin)),
                effect: Some(None),
                ..Default::default()
            },
            ManualCommand::ChangeOnly { r, g, b, a } => {
                let color = if r.is_some() || g.is_some() || b.is_some() {
                    let Rgb(current_r, current_g, current_b) = current.color().rgb();
                    Some(ColorSource::Rgb(Rgb(r.unwrap_or(current_r), g.unwrap_or(current_g), b.unwrap_or(current_b))))
                } else {
                    None
                };

                DeviceStateDelta {
                    color,
                    brightness: a.map(PercentConversions::level_to_percent),
                    ..Default::default()
                }
            }
        }
    }
}
