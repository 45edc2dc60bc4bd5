use crate::domain::{ConfigError, FrequencyRange, VisualisationMode, VisualizerConfig};
use serde::Deserialize;

/// Unvalidated visualizer settings as received from a client or a configuration file. Missing fields fall back to the defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VisualizerConfigRequest {
    range: FrequencyRange,
    mode: VisualisationMode,
    sensitivity: u32,
    bass_color_trigger: bool,
    mid_brightness_trigger: bool,
    high_effect_trigger: bool,
    update_interval_ms: u32,
    active: bool,
}

impl Default for VisualizerConfigRequest {
    fn default() -> Self {
        let defaults = VisualizerConfig::default();
        VisualizerConfigRequest {
            range: defaults.range(),
            mode: defaults.mode(),
            sensitivity: defaults.sensitivity() as u32,
            bass_color_trigger: defaults.bass_color_trigger(),
            mid_brightness_trigger: defaults.mid_brightness_trigger(),
            high_effect_trigger: defaults.high_effect_trigger(),
            update_interval_ms: defaults.update_interval().as_millis() as u32,
            active: defaults.active(),
        }
    }
}

impl TryFrom<VisualizerConfigRequest> for VisualizerConfig {
    type Error = ConfigError;

    fn try_from(request: VisualizerConfigRequest) -> Result<Self, Self::Error> {
        VisualizerConfig::builder()
            .range(request.range)
            .mode(request.mode)
            .sensitivity(request.sensitivity)
            .triggers(request.bass_color_trigger, request.mid_brightness_trigger, request.high_effect_trigger)
            .update_interval_ms(request.update_interval_ms)
            .active(request.active)
            .build()
    }
}
