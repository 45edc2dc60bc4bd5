use crate::app_config::Device;
use crate::domain::{ColorSource, DeviceState, Rgb};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Connects to a light and reads its current state.
#[async_trait]
pub trait DeviceInitializer: Send + Sync {
    async fn discover(&self) -> Result<DeviceState, InitError>;
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("no device found")]
    NotFound,
}

/// Caches the state of the last successful initialization.
#[derive(Debug)]
pub struct DeviceManager<I> {
    initializer: I,
    cached: Mutex<Option<DeviceState>>,
}

impl<I: DeviceInitializer> DeviceManager<I> {
    pub fn new(initializer: I) -> Self {
        DeviceManager {
            initializer,
            cached: Mutex::new(None),
        }
    }

    /// Returns the cached device state, discovering the device when nothing is cached yet or when `force` is set.
    #[instrument(skip(self))]
    pub async fn init(&self, force: bool) -> Result<DeviceState, InitError> {
        let mut cached = self.cached.lock().await;

        if let Some(state) = cached.as_ref().filter(|_| !force) {
            debug!("🔌 Using cached device '{}'", state.device_type_name());
            return Ok(state.clone());
        }

        info!("🔌 Initializing device...");
        let state = self.initializer.discover().await?;
        info!("🔌 Initializing device... OK, found '{}'", state.device_type_name());

        *cached = Some(state.clone());
        Ok(state)
    }
}

/// A device that is always present, built from the device section of the configuration.
#[derive(Debug)]
pub struct SimulatedDevice {
    initial: DeviceState,
    discoveries: AtomicUsize,
}

impl SimulatedDevice {
    pub fn new(initial: DeviceState) -> Self {
        SimulatedDevice {
            initial,
            discoveries: AtomicUsize::new(0),
        }
    }

    pub fn discoveries(&self) -> usize {
        self.discoveries.load(Ordering::Relaxed)
    }
}

impl From<&Device> for SimulatedDevice {
    fn from(device: &Device) -> Self {
        let [red, green, blue] = device.color();
        SimulatedDevice::new(
            DeviceState::new(device.type_name())
                .with_color(ColorSource::Rgb(Rgb(red, green, blue)))
                .with_brightness(device.brightness()),
        )
    }
}

#[async_trait]
impl DeviceInitializer for SimulatedDevice {
    async fn discover(&self) -> Result<DeviceState, InitError> {
        self.discoveries.fetch_add(1, Ordering::Relaxed);
        Ok(self.initial.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[derive(Debug)]
    struct MissingDevice;

    #[async_trait]
    impl DeviceInitializer for MissingDevice {
        async fn discover(&self) -> Result<DeviceState, InitError> {
            Err(InitError::NotFound)
        }
    }

    fn device() -> DeviceState {
        DeviceState::new("ELK-BLEDOM").with_brightness(60)
    }

    #[test(tokio::test)]
    async fn init_discovers_the_device_once() {
        let manager = DeviceManager::new(SimulatedDevice::new(device()));

        let first = manager.init(false).await.unwrap();
        let second = manager.init(false).await.unwrap();

        assert_eq!(first, device());
        assert_eq!(second, device());
        assert_eq!(manager.initializer.discoveries(), 1);
    }

    #[test(tokio::test)]
    async fn force_discovers_again() {
        let manager = DeviceManager::new(SimulatedDevice::new(device()));

        manager.init(false).await.unwrap();
        manager.init(true).await.unwrap();

        assert_eq!(manager.initializer.discoveries(), 2);
    }

    #[test(tokio::test)]
    async fn failures_are_not_cached() {
        let manager = DeviceManager::new(MissingDevice);

        assert!(matches!(manager.init(false).await, Err(InitError::NotFound)));
        assert!(matches!(manager.init(false).await, Err(InitError::NotFound)));
        assert_eq!(*manager.cached.lock().await, None);
    }

    #[test]
    fn simulated_device_uses_the_configured_state() {
        let config = AppConfigBuilder::new().device("Triones", 40, [255, 0, 0]).build();

        let simulated = SimulatedDevice::from(config.device());

        assert_eq!(
            simulated.initial,
            DeviceState::new("Triones").with_color(ColorSource::Rgb(Rgb(255, 0, 0))).with_brightness(40)
        );
    }
}
