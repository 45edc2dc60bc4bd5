pub mod audio;
pub mod color;
pub mod commands;
pub mod device_snapshot;
pub mod device_state;
pub mod events;
pub mod visualizer_config;

pub use audio::{AudioSample, FrequencyRange};
pub use color::Rgb;
pub use commands::{DEFAULT_EFFECT_SPEED, ManualCommand};
pub use device_snapshot::DeviceSnapshot;
pub use device_state::{ColorSource, DeviceState, DeviceStateDelta, Effect};
pub use visualizer_config::{ConfigError, ConfigUpdate, VisualisationMode, VisualizerConfig};
