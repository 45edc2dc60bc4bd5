use crate::domain::{AudioSample, FrequencyRange, VisualizerConfig};
use crate::pipeline::scaled_energy;

pub const ONSET_THRESHOLD: f32 = 0.5;
pub const RELEASE_THRESHOLD: f32 = 0.35;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Crossing {
    Onset,
    Release,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TriggerEvent {
    pub band: FrequencyRange,
    pub crossing: Crossing,
    /// Sensitivity scaled energy of the band at the crossing.
    pub magnitude: f32,
}

/// Per band memory of whether the band is currently above its onset threshold.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct EvaluatorState {
    bass: bool,
    mid: bool,
    high: bool,
}

impl EvaluatorState {
    pub fn is_triggered(&self, band: FrequencyRange) -> bool {
        match band {
            FrequencyRange::Bass => self.bass,
            FrequencyRange::Mid => self.mid,
            FrequencyRange::High => self.high,
            FrequencyRange::Full => false,
        }
    }

    fn set_triggered(&mut self, band: FrequencyRange, triggered: bool) {
        match band {
            FrequencyRange::Bass => self.bass = triggered,
            FrequencyRange::Mid => self.mid = triggered,
            FrequencyRange::High => self.high = triggered,
            FrequencyRange::Full => {}
        }
    }
}

/// Compares the enabled trigger bands against the onset and release thresholds and reports the edges.
/// A band that stays above the release threshold fires only once.
pub fn evaluate(sample: &AudioSample, config: &VisualizerConfig, prior: EvaluatorState) -> (Vec<TriggerEvent>, EvaluatorState) {
    let triggers = [
        (FrequencyRange::Bass, config.bass_color_trigger()),
        (FrequencyRange::Mid, config.mid_brightness_trigger()),
        (FrequencyRange::High, config.high_effect_trigger()),
    ];

    let mut state = prior;
    let mut events = Vec::new();

    for (band, enabled) in triggers {
        if !enabled {
            state.set_triggered(band, false);
            continue;
        }

        let magnitude = scaled_energy(sample, band, config.gain());
        let triggered = state.is_triggered(band);

        let crossing = if !triggered && magnitude >= ONSET_THRESHOLD {
            Some(Crossing::Onset)
        } else if triggered && magnitude < RELEASE_THRESHOLD {
            Some(Crossing::Release)
        } else {
            None
        };

        if let Some(crossing) = crossing {
            state.set_triggered(band, crossing == Crossing::Onset);
            events.push(TriggerEvent { band, crossing, magnitude });
        }
    }

    (events, state)
}
