use crate::domain::{DeviceState, DeviceStateDelta, VisualizerConfig};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Throttles pipeline updates and keeps track of the current device state.
#[derive(Debug)]
pub struct UpdateScheduler {
    state: DeviceState,
    interval: Duration,
    active: bool,
    last_emitted_at: Option<Instant>,
}

impl UpdateScheduler {
    pub fn new(state: DeviceState, config: &VisualizerConfig) -> Self {
        UpdateScheduler {
            state,
            interval: config.update_interval(),
            active: config.active(),
            last_emitted_at: None,
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Adopts the interval and the active flag of a new configuration.
    pub fn configure(&mut self, config: &VisualizerConfig) {
        if config.active() && !self.active {
            // The first sample after an activation is never throttled
            self.last_emitted_at = None;
        }

        self.active = config.active();
        self.interval = config.update_interval();
    }

    /// Merges the delta and returns the new state, unless the pipeline is inactive or the last update is too recent.
    pub fn tick(&mut self, delta: &DeviceStateDelta, now: Instant) -> Option<DeviceState> {
        if !self.active || delta.is_empty() {
            return None;
        }

        if let Some(last_emitted_at) = self.last_emitted_at {
            let elapsed = now.saturating_duration_since(last_emitted_at);
            if elapsed < self.interval {
                trace!(elapsed = ?elapsed, "⏱️ Suppressing update, last update was {:?} ago", elapsed);
                return None;
            }
        }

        self.state.apply(delta);
        self.last_emitted_at = Some(now);
        Some(self.state.clone())
    }

    /// Merges a manual change right away, it is neither throttled nor gated and does not delay the next pipeline update.
    pub fn apply_manual(&mut self, delta: &DeviceStateDelta) -> DeviceState {
        self.state.apply(delta);
        self.state.clone()
    }
}
