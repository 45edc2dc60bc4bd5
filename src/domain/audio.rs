use serde::Serialize;
use tokio::time::Instant;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
pub enum FrequencyRange {
    /// 20-250 Hz
    Bass,
    /// 250-2000 Hz
    Mid,
    /// 2000-20000 Hz
    High,
    Full,
}

impl FrequencyRange {
    pub const ALL: [FrequencyRange; 4] = [FrequencyRange::Bass, FrequencyRange::Mid, FrequencyRange::High, FrequencyRange::Full];

    fn index(self) -> usize {
        match self {
            FrequencyRange::Bass => 0,
            FrequencyRange::Mid => 1,
            FrequencyRange::High => 2,
            FrequencyRange::Full => 3,
        }
    }
}

/// Band energies produced by the audio analysis for a single point in time.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct AudioSample {
    energies: [Option<f32>; 4],
    timestamp: Instant,
}

impl AudioSample {
    /// Creates a sample without band data, every band reads as silent until set.
    pub fn new(timestamp: Instant) -> Self {
        AudioSample { energies: [None; 4], timestamp }
    }

    pub fn from_bands(timestamp: Instant, bass: f32, mid: f32, high: f32, full: f32) -> Self {
        AudioSample {
            energies: [Some(bass), Some(mid), Some(high), Some(full)],
            timestamp,
        }
    }

    pub fn with_band(mut self, band: FrequencyRange, energy: f32) -> Self {
        self.energies[band.index()] = Some(energy);
        self
    }

    /// Returns the normalized energy of a band. Missing or invalid values read as 0.0 and the result is clamped to [0, 1].
    pub fn energy(&self, band: FrequencyRange) -> f32 {
        match self.energies[band.index()] {
            Some(energy) if energy.is_finite() => energy.clamp(0.0, 1.0),
            Some(energy) if energy == f32::INFINITY => 1.0,
            _ => 0.0,
        }
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }
}
