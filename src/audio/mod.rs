pub mod queue;
pub mod simulated;

pub use queue::{AudioProducer, audio_channel};
pub use simulated::simulated_audio;
