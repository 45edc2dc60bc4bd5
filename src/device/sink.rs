use crate::domain::{DeviceSnapshot, DeviceState};
use crate::extensions::unsigned_ints_ext::PercentConversions;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{info, instrument};

/// Hands device states to the hardware.
#[async_trait]
pub trait DeviceSink: Debug + Send + Sync {
    fn id(&self) -> &'static str;

    async fn apply(&self, state: &DeviceState) -> Result<(), SinkError>;
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("device is unavailable: {0}")]
    Unavailable(String),
    #[error("could not encode the device state: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub const LOGGING_SINK_ID: &str = "logging";

/// Mock hardware that logs every state it receives.
#[derive(Debug, Default)]
pub struct LoggingSink;

#[async_trait]
impl DeviceSink for LoggingSink {
    fn id(&self) -> &'static str {
        LOGGING_SINK_ID
    }

    #[instrument(skip_all)]
    async fn apply(&self, state: &DeviceState) -> Result<(), SinkError> {
        let payload = serde_json::to_string(&DeviceSnapshot::from(state))?;
        let level = state.brightness().percent_to_level();

        info!(device = state.device_type_name(), level, color = %state.color().rgb().to_hex(), "💡 {}", payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test(tokio::test)]
    async fn logging_sink_accepts_every_state() {
        let sink = LoggingSink;
        let state = DeviceState::new("ELK-BLEDOM").with_power(true).with_brightness(30);

        assert!(sink.apply(&state).await.is_ok());
        assert_eq!(sink.id(), "logging");
    }
}
