use std::sync::Arc;
use tled::app_config::AppConfig;
use tled::audio::{audio_channel, simulated_audio};
use tled::device::{DeviceManager, LoggingSink, SimulatedDevice};
use tled::domain::events::Event;
use tled::light_handle::LightHandle;
use tled::store::Store;
use tled::store_listener::store_listener;
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let device_manager = DeviceManager::new(SimulatedDevice::from(config.device()));
    let initial = device_manager.init(false).await?;
    info!("✅  Initialized device");

    let (producer, audio_rx) = audio_channel(config.core().audio_queue_capacity());
    let (tx, rx) = mpsc::channel::<Event>(config.core().command_buffer_size());
    let mut store = Store::new(initial, config.visualizer().clone(), rx, audio_rx);
    let notifier_rx = store.notifier();

    let listener_handle = task::spawn(async move {
        store_listener(notifier_rx, Arc::new(LoggingSink)).await;
    });
    info!("✅  Initialized store listener");

    let store_handle = task::spawn(async move {
        store.listen().await;
    });
    info!("✅  Initialized store");

    let light = LightHandle::new(tx);
    light.power(true).await?;

    if config.simulation().enabled() {
        task::spawn(simulated_audio(producer, config.simulation().sample_interval()));
        info!("✅  Started simulated audio");
    }

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down");
    light.power(false).await?;

    drop(light);
    store_handle.await?;
    listener_handle.await?;

    Ok(())
}
