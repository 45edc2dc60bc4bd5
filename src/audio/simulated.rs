use crate::audio::queue::AudioProducer;
use crate::domain::{AudioSample, FrequencyRange};
use std::f32::consts::TAU;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tracing::{info, instrument};

// 120 bpm
const BEATS_PER_SECOND: f32 = 2.0;

/// Stands in for the audio analysis by pushing synthetic band energies at a fixed cadence.
#[instrument(skip(producer))]
pub async fn simulated_audio(producer: AudioProducer, cadence: Duration) {
    let mut interval = time::interval(cadence.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let start = Instant::now();
    let mut ticks = IntervalStream::new(interval);

    info!("🎵 Streaming simulated audio every {:?}", cadence);
    while let Some(now) = ticks.next().await {
        let seconds = now.saturating_duration_since(start).as_secs_f32();
        if !producer.push(synthesize(now, seconds)) {
            info!("🎵 Audio queue has no consumer, stopping simulated audio");
            break;
        }
    }
}

/// A kick on every beat that decays quickly, over a slowly drifting mid band and shimmering highs.
pub fn synthesize(timestamp: Instant, seconds: f32) -> AudioSample {
    let phase = (seconds * BEATS_PER_SECOND).fract();
    let bass = (1.0 - phase).powi(3);
    let mid = 0.4 + 0.3 * (TAU * 0.25 * seconds).sin();
    let high = 0.2 + 0.6 * (TAU * 0.7 * seconds).sin().abs().powi(4);

    AudioSample::new(timestamp)
        .with_band(FrequencyRange::Bass, bass)
        .with_band(FrequencyRange::Mid, mid)
        .with_band(FrequencyRange::High, high)
        .with_band(FrequencyRange::Full, (bass + mid + high) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::queue::audio_channel;
    use crate::pipeline::{ONSET_THRESHOLD, RELEASE_THRESHOLD};
    use test_log::test;

    #[test]
    fn energies_stay_in_range() {
        let now = Instant::now();

        for step in 0..2_000 {
            let sample = synthesize(now, step as f32 * 0.013);
            for band in FrequencyRange::ALL {
                let energy = sample.energy(band);
                assert!((0.0..=1.0).contains(&energy), "{:?} out of range: {}", band, energy);
            }
        }
    }

    #[test]
    fn bass_rises_above_the_onset_and_falls_below_the_release_every_beat() {
        let now = Instant::now();

        assert!(synthesize(now, 0.0).energy(FrequencyRange::Bass) > ONSET_THRESHOLD);
        assert!(synthesize(now, 0.25).energy(FrequencyRange::Bass) < RELEASE_THRESHOLD);
        assert!(synthesize(now, 0.5).energy(FrequencyRange::Bass) > ONSET_THRESHOLD);
    }

    #[test(tokio::test)]
    async fn stops_when_the_queue_has_no_consumer() {
        let (producer, rx) = audio_channel(4);
        drop(rx);

        time::timeout(Duration::from_secs(1), simulated_audio(producer, Duration::from_millis(1)))
            .await
            .expect("simulated audio should stop");
    }

    #[test(tokio::test)]
    async fn pushes_samples_to_the_queue() {
        let (producer, mut rx) = audio_channel(4);
        let handle = tokio::spawn(simulated_audio(producer, Duration::from_millis(5)));

        let sample = time::timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();

        assert!(sample.energy(FrequencyRange::Bass) > 0.0);
        handle.abort();
    }
}
