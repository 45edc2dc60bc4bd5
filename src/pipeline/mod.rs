mod mapper;
mod trigger_evaluator;
mod update_scheduler;

pub use mapper::{EFFECT_COUNT, MapperState, map};
pub use trigger_evaluator::{Crossing, EvaluatorState, ONSET_THRESHOLD, RELEASE_THRESHOLD, TriggerEvent, evaluate};
pub use update_scheduler::UpdateScheduler;

use crate::domain::{AudioSample, FrequencyRange};

/// Band energy after applying the sensitivity gain, clamped to [0, 1].
fn scaled_energy(sample: &AudioSample, band: FrequencyRange, gain: f32) -> f32 {
    (sample.energy(band) * gain.clamp(0.0, 1.0)).clamp(0.0, 1.0)
}
