use crate::domain::events::Event;
use crate::domain::{AudioSample, DeviceState, VisualizerConfig};
use crate::pipeline::{EvaluatorState, MapperState, UpdateScheduler, evaluate, map};
use tokio::sync::broadcast::Receiver as AudioReceiver;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, trace, warn};

/// Owns the device state. Manual commands, configuration changes and audio samples are handled one at a time,
/// every resulting state is published to the notifier.
#[derive(Debug)]
pub struct Store {
    config: VisualizerConfig,
    scheduler: UpdateScheduler,
    evaluator_state: EvaluatorState,
    mapper_state: MapperState,
    rx: Receiver<Event>,
    audio_rx: AudioReceiver<AudioSample>,
    audio_closed: bool,
    notifier_tx: WatchSender<DeviceState>,
    notifier_rx: WatchReceiver<DeviceState>,
}

impl Store {
    pub fn new(initial: DeviceState, config: VisualizerConfig, rx: Receiver<Event>, audio_rx: AudioReceiver<AudioSample>) -> Self {
        let (notifier_tx, notifier_rx) = watch::channel(initial.clone());

        Store {
            scheduler: UpdateScheduler::new(initial, &config),
            config,
            evaluator_state: EvaluatorState::default(),
            mapper_state: MapperState::default(),
            rx,
            audio_rx,
            audio_closed: false,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<DeviceState> {
        self.notifier_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        loop {
            tokio::select! {
                biased;
                event = self.rx.recv() => {
                    let Some(event) = event else {
                        info!("🔵 All handles are gone, stopping the store");
                        break;
                    };
                    debug!("🔵 Received event: {:?}", event);
                    self.handle_event(event);
                }
                result = self.audio_rx.recv(), if !self.audio_closed => match result {
                    Ok(sample) => self.handle_sample(sample),
                    Err(RecvError::Lagged(skipped)) => debug!("⚠️ Audio queue overflowed, dropped {} sample(s)", skipped),
                    Err(RecvError::Closed) => {
                        info!("🎵 Audio queue closed, continuing with manual control only");
                        self.audio_closed = true;
                    }
                },
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Manual { command, reply } => {
                let delta = command.to_delta(self.scheduler.state());
                let state = self.scheduler.apply_manual(&delta);
                info!("🟢 Applied {:?}", command);

                self.publish(state.clone());
                if reply.send(state).is_err() {
                    warn!("⚠️ Could not reply to {:?}, the requester is gone", command);
                }
            }
            Event::ReplaceConfig { config, reply } => {
                self.install_config(config);
                reply.send(()).unwrap_or_default();
            }
            Event::UpdateConfig { update, reply } => {
                let config = self.config.updated(&update);
                self.install_config(config.clone());
                reply.send(config).unwrap_or_default();
            }
            Event::GetState { reply } => {
                reply.send(self.scheduler.state().clone()).unwrap_or_default();
            }
            Event::GetConfig { reply } => {
                reply.send(self.config.clone()).unwrap_or_default();
            }
        }
    }

    fn install_config(&mut self, config: VisualizerConfig) {
        debug!("🔵 Replacing visualizer configuration...");
        self.evaluator_state = EvaluatorState::default();
        self.mapper_state = MapperState::default();
        self.scheduler.configure(&config);

        if !config.active() {
            // Samples queued before the deactivation must not reach the device
            self.audio_rx = self.audio_rx.resubscribe();
        }

        info!(active = config.active(), "🔵 Replacing visualizer configuration... OK, mode is {:?}", config.mode());
        self.config = config;
    }

    fn handle_sample(&mut self, sample: AudioSample) {
        if !self.config.active() {
            trace!("Discarding audio sample, visualizer is inactive");
            return;
        }

        let (triggers, evaluator_state) = evaluate(&sample, &self.config, self.evaluator_state);
        let (delta, mapper_state) = map(&sample, &triggers, &self.config, self.scheduler.state(), self.mapper_state);
        self.evaluator_state = evaluator_state;
        self.mapper_state = mapper_state;

        if !triggers.is_empty() {
            trace!("Triggers: {:?}", triggers);
        }

        if let Some(state) = self.scheduler.tick(&delta, sample.timestamp()) {
            self.publish(state);
        }
    }

    fn publish(&self, state: DeviceState) {
        self.notifier_tx.send(state).unwrap_or_default();
    }
}
