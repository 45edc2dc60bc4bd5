use crate::domain::AudioSample;
use tokio::sync::broadcast;
use tracing::trace;

/// Creates the bounded audio queue. When the queue is full the oldest sample is overwritten and the consumer
/// observes a lag instead of blocking the producer.
pub fn audio_channel(capacity: usize) -> (AudioProducer, broadcast::Receiver<AudioSample>) {
    let (tx, rx) = broadcast::channel(capacity.max(1));
    (AudioProducer { tx }, rx)
}

/// Capture side of the audio queue, safe to call from any thread.
#[derive(Clone, Debug)]
pub struct AudioProducer {
    tx: broadcast::Sender<AudioSample>,
}

impl AudioProducer {
    /// Queues a sample without waiting. Returns false when nobody consumes the queue anymore.
    pub fn push(&self, sample: AudioSample) -> bool {
        match self.tx.send(sample) {
            Ok(_) => true,
            Err(_) => {
                trace!("Dropping audio sample, no consumer");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FrequencyRange;
    use pretty_assertions::assert_eq;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::Instant;

    fn sample(energy: f32) -> AudioSample {
        AudioSample::new(Instant::now()).with_band(FrequencyRange::Full, energy)
    }

    #[test]
    fn a_full_queue_keeps_the_newest_samples() {
        let (producer, mut rx) = audio_channel(4);

        for i in 1..=10 {
            assert!(producer.push(sample(i as f32 / 10.0)));
        }

        assert_eq!(rx.try_recv(), Err(TryRecvError::Lagged(6)));
        let received: Vec<f32> = std::iter::from_fn(|| rx.try_recv().ok()).map(|s| s.energy(FrequencyRange::Full)).collect();
        assert_eq!(received, vec![0.7, 0.8, 0.9, 1.0]);
    }

    #[test]
    fn push_never_blocks_without_a_reader() {
        let (producer, rx) = audio_channel(1);
        drop(rx);

        assert!(!producer.push(sample(0.5)));
    }

    #[test]
    fn samples_arrive_in_order() {
        let (producer, mut rx) = audio_channel(8);

        producer.push(sample(0.1));
        producer.push(sample(0.2));

        assert_eq!(rx.try_recv().map(|s| s.energy(FrequencyRange::Full)), Ok(0.1));
        assert_eq!(rx.try_recv().map(|s| s.energy(FrequencyRange::Full)), Ok(0.2));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }
}
