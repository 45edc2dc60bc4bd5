use crate::domain::events::Event;
use crate::domain::{ConfigError, ConfigUpdate, DeviceSnapshot, DeviceState, ManualCommand, Rgb, VisualisationMode, VisualizerConfig};
use thiserror::Error;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("the store is not running")]
    Closed,
    #[error("invalid visualizer configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Cheap to clone entry point for everything that wants to read or change the light.
#[derive(Clone, Debug)]
pub struct LightHandle {
    tx: Sender<Event>,
}

impl LightHandle {
    pub fn new(tx: Sender<Event>) -> Self {
        LightHandle { tx }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, command: ManualCommand) -> Result<DeviceState, StoreError> {
        self.request(|reply| Event::Manual { command, reply }).await
    }

    pub async fn power(&self, is_on: bool) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::Power(is_on)).await
    }

    /// Flips the power of whatever state the store holds when the command is handled.
    pub async fn toggle(&self) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::Toggle).await
    }

    pub async fn set_color(&self, red: u8, green: u8, blue: u8) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::SetColor(Rgb(red, green, blue))).await
    }

    pub async fn set_brightness(&self, brightness: u8) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::SetBrightness(brightness)).await
    }

    /// Changes the effect, its speed in percent, or both.
    pub async fn set_effect(&self, effect: Option<u32>, speed: Option<u8>) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::SetEffect { effect, speed }).await
    }

    pub async fn clear_effect(&self) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::ClearEffect).await
    }

    pub async fn set_color_temperature(&self, kelvin: u32) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::SetColorTemperature(kelvin)).await
    }

    /// Changes only the given channels, `a` is an 8-bit alpha that sets the brightness.
    pub async fn change_only(&self, r: Option<u8>, g: Option<u8>, b: Option<u8>, a: Option<u8>) -> Result<DeviceState, StoreError> {
        self.execute(ManualCommand::ChangeOnly { r, g, b, a }).await
    }

    pub async fn device_get(&self) -> Result<DeviceState, StoreError> {
        self.request(|reply| Event::GetState { reply }).await
    }

    pub async fn snapshot(&self) -> Result<DeviceSnapshot, StoreError> {
        self.device_get().await.map(|state| DeviceSnapshot::from(&state))
    }

    #[instrument(skip(self))]
    pub async fn replace_config(&self, config: VisualizerConfig) -> Result<(), StoreError> {
        self.request(|reply| Event::ReplaceConfig { config, reply }).await
    }

    /// Validates a configuration sent by a client and installs it. Invalid payloads leave the current configuration in place.
    pub async fn configure_from_json(&self, json: &str) -> Result<VisualizerConfig, StoreError> {
        let config = VisualizerConfig::from_json(json)?;
        self.replace_config(config.clone()).await?;
        Ok(config)
    }

    pub async fn visualizer_config(&self) -> Result<VisualizerConfig, StoreError> {
        self.request(|reply| Event::GetConfig { reply }).await
    }

    /// Starts the visualizer, optionally switching its mode and sensitivity. Everything else is kept.
    pub async fn use_audio(&self, mode: Option<VisualisationMode>, sensitivity: Option<u8>) -> Result<VisualizerConfig, StoreError> {
        self.update_config(ConfigUpdate {
            active: Some(true),
            mode,
            sensitivity,
        })
        .await
    }

    pub async fn stop_audio(&self) -> Result<VisualizerConfig, StoreError> {
        self.update_config(ConfigUpdate {
            active: Some(false),
            ..Default::default()
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_config(&self, update: ConfigUpdate) -> Result<VisualizerConfig, StoreError> {
        self.request(|reply| Event::UpdateConfig { update, reply }).await
    }

    async fn request<T>(&self, event: impl FnOnce(oneshot::Sender<T>) -> Event) -> Result<T, StoreError> {
        let (reply, response) = oneshot::channel();
        self.tx.send(event(reply)).await.map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Closed)
    }
}
