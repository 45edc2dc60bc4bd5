use crate::domain::commands::ManualCommand;
use crate::domain::device_state::DeviceState;
use crate::domain::visualizer_config::{ConfigUpdate, VisualizerConfig};
use tokio::sync::oneshot::Sender;

/// Requests handled by the store, in the order they arrive.
#[derive(Debug)]
pub enum Event {
    Manual { command: ManualCommand, reply: Sender<DeviceState> },
    ReplaceConfig { config: VisualizerConfig, reply: Sender<()> },
    /// Applies the update to the configuration held by the store and replies with the result.
    UpdateConfig { update: ConfigUpdate, reply: Sender<VisualizerConfig> },
    GetState { reply: Sender<DeviceState> },
    GetConfig { reply: Sender<VisualizerConfig> },
}
