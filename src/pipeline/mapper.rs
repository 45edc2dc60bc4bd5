use crate::domain::{AudioSample, ColorSource, DeviceState, DeviceStateDelta, Effect, FrequencyRange, Rgb, VisualisationMode, VisualizerConfig};
use crate::pipeline::scaled_energy;
use crate::pipeline::trigger_evaluator::{Crossing, TriggerEvent};
use std::time::Duration;
use tokio::time::Instant;

/// Number of built-in effects of the LED controller.
pub const EFFECT_COUNT: u32 = 16;

// Color modes
const NOISE_FLOOR: f32 = 0.02;
const ENHANCED_BIAS: f32 = 0.35;

// Beat effects, golden angle
const BEAT_HUE_STEP: f64 = 137.5;

// Spectral flow
const ENVELOPE_DECAY: f32 = 0.85;
const FLOW_HUE_STEP: f64 = 1.0;
const FLOW_HUE_GAIN: f64 = 12.0;
const FLOW_MIN_BRIGHTNESS: f32 = 20.0;

// BPM sync
const MIN_BEAT_INTERVAL: Duration = Duration::from_millis(250);
const MAX_BEAT_INTERVAL: Duration = Duration::from_millis(2000);
const TEMPO_SMOOTHING: f64 = 0.3;
const MAX_TEMPO_BPM: f64 = 200.0;
const DEFAULT_BPM_EFFECT: u32 = 0;

/// Memory carried between samples by the mapping modes.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct MapperState {
    envelope: f32,
    hue: f64,
    last_bass_onset: Option<Instant>,
    beat_interval_ms: Option<f64>,
}

impl MapperState {
    pub fn tempo_bpm(&self) -> Option<f64> {
        self.beat_interval_ms.map(|interval| 60_000.0 / interval)
    }

    pub fn envelope(&self) -> f32 {
        self.envelope
    }
}

/// Translates one audio sample into the device changes the configured mode asks for.
pub fn map(
    sample: &AudioSample,
    triggers: &[TriggerEvent],
    config: &VisualizerConfig,
    current: &DeviceState,
    prior: MapperState,
) -> (DeviceStateDelta, MapperState) {
    let gain = config.gain();
    match config.mode() {
        VisualisationMode::FrequencyColor => (frequency_color(sample, gain, false), prior),
        VisualisationMode::EnhancedFrequencyColor => (frequency_color(sample, gain, true), prior),
        VisualisationMode::EnergyBrightness => (energy_brightness(sample, config.range(), gain), prior),
        VisualisationMode::BeatEffects => beat_effects(triggers, current, prior),
        VisualisationMode::SpectralFlow => spectral_flow(sample, gain, prior),
        VisualisationMode::BpmSync => bpm_sync(sample, triggers, current, prior),
    }
}

fn frequency_color(sample: &AudioSample, gain: f32, enhanced: bool) -> DeviceStateDelta {
    let bass = scaled_energy(sample, FrequencyRange::Bass, gain);
    let mid = scaled_energy(sample, FrequencyRange::Mid, gain);
    let high = scaled_energy(sample, FrequencyRange::High, gain);

    let total = bass + mid + high;
    if total < NOISE_FLOOR {
        return DeviceStateDelta::default();
    }

    let loudest = bass.max(mid).max(high);
    let (mut red, green, mut blue) = (bass / loudest, mid / loudest, high / loudest);

    if enhanced {
        // Positive when bass dominates, negative when highs dominate
        let dominance = (bass - high) / total;
        red *= 1.0 + ENHANCED_BIAS * dominance;
        blue *= 1.0 - ENHANCED_BIAS * dominance;
    }

    DeviceStateDelta {
        color: Some(ColorSource::Rgb(Rgb::from_unit(red as f64, green as f64, blue as f64))),
        effect: Some(None),
        ..Default::default()
    }
}

fn energy_brightness(sample: &AudioSample, range: FrequencyRange, gain: f32) -> DeviceStateDelta {
    DeviceStateDelta {
        brightness: Some(to_percent(scaled_energy(sample, range, gain))),
        ..Default::default()
    }
}

/// Every band has its own job: bass onsets move the color, mid onsets pulse the brightness and high onsets switch to the
/// next effect.
fn beat_effects(triggers: &[TriggerEvent], current: &DeviceState, prior: MapperState) -> (DeviceStateDelta, MapperState) {
    let mut delta = DeviceStateDelta::default();
    let mut state = prior;

    for trigger in triggers.iter().filter(|trigger| trigger.crossing == Crossing::Onset) {
        match trigger.band {
            FrequencyRange::Bass => {
                state.hue = (state.hue + BEAT_HUE_STEP).rem_euclid(360.0);
                delta.color = Some(ColorSource::Rgb(Rgb::from_hsv(state.hue, 1.0, 1.0)));
            }
            FrequencyRange::Mid => delta.brightness = Some(to_percent(trigger.magnitude)),
            FrequencyRange::High => {
                let next_effect = current.effect().map_or(0, |effect| (effect.id() + 1) % EFFECT_COUNT);
                delta.effect = Some(Some(Effect::new(next_effect, to_percent(trigger.magnitude))));
            }
            FrequencyRange::Full => {}
        }
    }

    (delta, state)
}

fn spectral_flow(sample: &AudioSample, gain: f32, prior: MapperState) -> (DeviceStateDelta, MapperState) {
    let energy = scaled_energy(sample, FrequencyRange::Full, gain);
    let envelope = energy.max(prior.envelope * ENVELOPE_DECAY);
    let hue = (prior.hue + FLOW_HUE_STEP + FLOW_HUE_GAIN * envelope as f64).rem_euclid(360.0);
    let brightness = FLOW_MIN_BRIGHTNESS + (100.0 - FLOW_MIN_BRIGHTNESS) * envelope;

    let delta = DeviceStateDelta {
        color: Some(ColorSource::Rgb(Rgb::from_hsv(hue, 1.0, 1.0))),
        brightness: Some(brightness.round().clamp(0.0, 100.0) as u8),
        effect: Some(None),
        ..Default::default()
    };

    (delta, MapperState { envelope, hue, ..prior })
}

fn bpm_sync(sample: &AudioSample, triggers: &[TriggerEvent], current: &DeviceState, prior: MapperState) -> (DeviceStateDelta, MapperState) {
    let bass_onset = triggers
        .iter()
        .any(|trigger| trigger.band == FrequencyRange::Bass && trigger.crossing == Crossing::Onset);
    if !bass_onset {
        return (DeviceStateDelta::default(), prior);
    }

    let now = sample.timestamp();
    let mut state = MapperState {
        last_bass_onset: Some(now),
        ..prior
    };

    if let Some(last_onset) = prior.last_bass_onset {
        let interval = now.saturating_duration_since(last_onset);
        if (MIN_BEAT_INTERVAL..=MAX_BEAT_INTERVAL).contains(&interval) {
            let interval_ms = interval.as_secs_f64() * 1000.0;
            state.beat_interval_ms = Some(match prior.beat_interval_ms {
                Some(smoothed) => smoothed + TEMPO_SMOOTHING * (interval_ms - smoothed),
                None => interval_ms,
            });
        }
    }

    let Some(bpm) = state.tempo_bpm() else {
        return (DeviceStateDelta::default(), state);
    };

    let speed = (bpm / MAX_TEMPO_BPM * 100.0).round().clamp(0.0, 100.0) as u8;
    let effect = current.effect().map_or(DEFAULT_BPM_EFFECT, |effect| effect.id());
    let delta = DeviceStateDelta {
        effect: Some(Some(Effect::new(effect, speed))),
        ..Default::default()
    };

    (delta, state)
}

fn to_percent(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}
