use crate::domain::VisualizerConfig;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    device: Device,
    #[serde(default)]
    visualizer: VisualizerConfig,
    simulation: Simulation,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("TLED").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn visualizer(&self) -> &VisualizerConfig {
        &self.visualizer
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    command_buffer_size: usize,
    audio_queue_capacity: usize,
}

impl Core {
    pub fn command_buffer_size(&self) -> usize {
        self.command_buffer_size
    }

    pub fn audio_queue_capacity(&self) -> usize {
        self.audio_queue_capacity
    }
}

#[derive(Debug, Deserialize)]
pub struct Device {
    type_name: String,
    brightness: u8,
    color: [u8; 3],
}

impl Device {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }
}

#[derive(Debug, Deserialize)]
pub struct Simulation {
    enabled: bool,
    #[serde(with = "humantime_serde")]
    sample_interval: Duration,
}

impl Simulation {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    command_buffer_size: 1,
                    audio_queue_capacity: 4,
                },
                device: Device {
                    type_name: "ELK-BLEDOM".to_string(),
                    brightness: 100,
                    color: [255, 255, 255],
                },
                visualizer: VisualizerConfig::default(),
                simulation: Simulation {
                    enabled: false,
                    sample_interval: Duration::from_millis(20),
                },
            },
        }
    }

    pub fn device(mut self, type_name: &str, brightness: u8, color: [u8; 3]) -> Self {
        self.config.device = Device {
            type_name: type_name.to_string(),
            brightness,
            color,
        };
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FrequencyRange, VisualisationMode};
    use config::{File, FileFormat};
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
        [core]
        command_buffer_size = 32
        audio_queue_capacity = 8

        [device]
        type_name = "ELK-BLEDOM"
        brightness = 80
        color = [255, 120, 0]

        [visualizer]
        range = "Bass"
        mode = "BeatEffects"
        sensitivity = 200
        update_interval_ms = 40

        [simulation]
        enabled = true
        sample_interval = "25ms"
    "#;

    fn parse(toml: &str) -> Result<AppConfig, ConfigError> {
        Config::builder().add_source(File::from_str(toml, FileFormat::Toml)).build()?.try_deserialize()
    }

    #[test]
    fn parses_every_section() {
        let config = parse(CONFIG).unwrap();

        assert_eq!(config.core().command_buffer_size(), 32);
        assert_eq!(config.core().audio_queue_capacity(), 8);
        assert_eq!(config.device().type_name(), "ELK-BLEDOM");
        assert_eq!(config.device().brightness(), 80);
        assert_eq!(config.device().color(), [255, 120, 0]);
        assert_eq!(config.visualizer().range(), FrequencyRange::Bass);
        assert_eq!(config.visualizer().mode(), VisualisationMode::BeatEffects);
        assert_eq!(config.visualizer().sensitivity(), 200);
        assert_eq!(config.visualizer().update_interval(), Duration::from_millis(40));
        assert!(config.simulation().enabled());
        assert_eq!(config.simulation().sample_interval(), Duration::from_millis(25));
    }

    #[test]
    fn rejects_an_invalid_visualizer_section() {
        let result = parse(&CONFIG.replace("update_interval_ms = 40", "update_interval_ms = 0"));

        assert!(result.unwrap_err().to_string().contains("update interval must be greater than 0 ms"));
    }
}
