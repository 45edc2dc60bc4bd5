use crate::config_loader::VisualizerConfigRequest;
use crate::domain::audio::FrequencyRange;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub enum VisualisationMode {
    /// Frequencies map to colors (bass=red, mid=green, high=blue)
    FrequencyColor,
    /// Sound energy controls brightness
    EnergyBrightness,
    /// Beat detection triggers effects
    BeatEffects,
    /// Spectral flow pattern
    SpectralFlow,
    /// Warm for bass, cool for highs
    EnhancedFrequencyColor,
    /// BPM synchronized effects
    BpmSync,
}

/// Settings of the audio visualizer. A configuration is replaced as a whole, it is never edited in place.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "VisualizerConfigRequest")]
pub struct VisualizerConfig {
    range: FrequencyRange,
    mode: VisualisationMode,
    sensitivity: u8,
    bass_color_trigger: bool,
    mid_brightness_trigger: bool,
    high_effect_trigger: bool,
    update_interval_ms: u32,
    active: bool,
}

impl VisualizerConfig {
    pub fn builder() -> VisualizerConfigBuilder {
        VisualizerConfigBuilder::new()
    }

    /// Parses a configuration sent by a client and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let request = serde_json::from_str::<VisualizerConfigRequest>(json)?;
        VisualizerConfig::try_from(request)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Copy of this configuration with the fields of `update` that are set.
    pub fn updated(&self, update: &ConfigUpdate) -> Self {
        VisualizerConfig {
            mode: update.mode.unwrap_or(self.mode),
            sensitivity: update.sensitivity.unwrap_or(self.sensitivity),
            active: update.active.unwrap_or(self.active),
            ..self.clone()
        }
    }

    pub fn range(&self) -> FrequencyRange {
        self.range
    }

    pub fn mode(&self) -> VisualisationMode {
        self.mode
    }

    pub fn sensitivity(&self) -> u8 {
        self.sensitivity
    }

    /// Linear gain applied to band energies.
    pub fn gain(&self) -> f32 {
        self.sensitivity as f32 / u8::MAX as f32
    }

    pub fn bass_color_trigger(&self) -> bool {
        self.bass_color_trigger
    }

    pub fn mid_brightness_trigger(&self) -> bool {
        self.mid_brightness_trigger
    }

    pub fn high_effect_trigger(&self) -> bool {
        self.high_effect_trigger
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms as u64)
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        VisualizerConfig {
            range: FrequencyRange::Full,
            mode: VisualisationMode::FrequencyColor,
            sensitivity: 128,
            bass_color_trigger: true,
            mid_brightness_trigger: true,
            high_effect_trigger: true,
            update_interval_ms: 50,
            active: false,
        }
    }
}

/// Partial change of the configuration, applied by the store to whatever configuration it holds at that moment.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct ConfigUpdate {
    pub active: Option<bool>,
    pub mode: Option<VisualisationMode>,
    pub sensitivity: Option<u8>,
}

pub struct VisualizerConfigBuilder {
    config: VisualizerConfig,
    sensitivity: u32,
}

impl VisualizerConfigBuilder {
    fn new() -> Self {
        let config = VisualizerConfig::default();
        VisualizerConfigBuilder {
            sensitivity: config.sensitivity as u32,
            config,
        }
    }

    pub fn range(mut self, range: FrequencyRange) -> Self {
        self.config.range = range;
        self
    }

    pub fn mode(mut self, mode: VisualisationMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn sensitivity(mut self, sensitivity: u32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn triggers(mut self, bass_color: bool, mid_brightness: bool, high_effect: bool) -> Self {
        self.config.bass_color_trigger = bass_color;
        self.config.mid_brightness_trigger = mid_brightness;
        self.config.high_effect_trigger = high_effect;
        self
    }

    pub fn update_interval_ms(mut self, update_interval_ms: u32) -> Self {
        self.config.update_interval_ms = update_interval_ms;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.config.active = active;
        self
    }

    pub fn build(mut self) -> Result<VisualizerConfig, ConfigError> {
        if self.config.update_interval_ms == 0 {
            return Err(ConfigError::ZeroUpdateInterval);
        }

        self.config.sensitivity = u8::try_from(self.sensitivity).map_err(|_| ConfigError::SensitivityOutOfRange(self.sensitivity))?;
        Ok(self.config)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("update interval must be greater than 0 ms")]
    ZeroUpdateInterval,
    #[error("sensitivity {0} is out of range, expected 0-255")]
    SensitivityOutOfRange(u32),
    #[error("unknown frequency range {0}")]
    UnknownFrequencyRange(u8),
    #[error("unknown visualisation mode {0}")]
    UnknownVisualisationMode(u8),
    #[error("malformed visualizer configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl TryFrom<u8> for FrequencyRange {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FrequencyRange::Bass),
            1 => Ok(FrequencyRange::Mid),
            2 => Ok(FrequencyRange::High),
            3 => Ok(FrequencyRange::Full),
            _ => Err(ConfigError::UnknownFrequencyRange(value)),
        }
    }
}

impl TryFrom<u8> for VisualisationMode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VisualisationMode::FrequencyColor),
            1 => Ok(VisualisationMode::EnergyBrightness),
            2 => Ok(VisualisationMode::BeatEffects),
            3 => Ok(VisualisationMode::SpectralFlow),
            4 => Ok(VisualisationMode::EnhancedFrequencyColor),
            5 => Ok(VisualisationMode::BpmSync),
            _ => Err(ConfigError::UnknownVisualisationMode(value)),
        }
    }
}
