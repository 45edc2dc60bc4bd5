use crate::device::DeviceSink;
use crate::domain::DeviceState;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::{instrument, warn};

/// Forwards published states to the sink. A slow sink skips intermediate states and only sees the latest one.
#[instrument(skip_all, fields(sink = sink.id()))]
pub async fn store_listener(mut rx: Receiver<DeviceState>, sink: Arc<dyn DeviceSink>) {
    let initial = rx.borrow_and_update().clone();
    apply(&initial, sink.as_ref()).await;

    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        apply(&state, sink.as_ref()).await;
    }
}

async fn apply(state: &DeviceState, sink: &dyn DeviceSink) {
    if let Err(e) = sink.apply(state).await {
        warn!("⚠️ Could not update the device: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SinkError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::time::Duration;
    use test_log::test;
    use tokio::sync::watch;
    use tokio::time::timeout;

    #[derive(Debug, Default)]
    struct RecordingSink {
        fail: bool,
        applied: Mutex<Vec<u8>>,
    }

    #[async_trait]
    impl DeviceSink for RecordingSink {
        fn id(&self) -> &'static str {
            "recording"
        }

        async fn apply(&self, state: &DeviceState) -> Result<(), SinkError> {
            self.applied.lock().unwrap().push(state.brightness());
            if self.fail {
                return Err(SinkError::Unavailable("out of range".to_string()));
            }
            Ok(())
        }
    }

    fn state(brightness: u8) -> DeviceState {
        DeviceState::new("ELK-BLEDOM").with_brightness(brightness)
    }

    #[test(tokio::test)]
    async fn applies_the_initial_and_every_published_state() {
        let (tx, rx) = watch::channel(state(10));
        let sink = Arc::new(RecordingSink::default());
        let handle = tokio::spawn(store_listener(rx, sink.clone()));

        tokio::task::yield_now().await;
        tx.send(state(20)).unwrap();
        tokio::task::yield_now().await;
        drop(tx);

        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
        let applied = sink.applied.lock().unwrap().clone();
        assert_eq!(applied.first(), Some(&10));
        assert_eq!(applied.last(), Some(&20));
    }

    #[test(tokio::test)]
    async fn keeps_listening_after_a_sink_error() {
        let (tx, rx) = watch::channel(state(10));
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let handle = tokio::spawn(store_listener(rx, sink.clone()));

        tokio::task::yield_now().await;
        tx.send(state(30)).unwrap();
        tokio::task::yield_now().await;
        drop(tx);

        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
        assert_eq!(sink.applied.lock().unwrap().last(), Some(&30));
    }
}
