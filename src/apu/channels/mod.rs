//! APU channel implementations

pub mod noise;
pub mod pulse;
pub mod wave;

pub use noise::NoiseChannel;
pub use pulse::PulseChannel;
pub use wave::WaveChannel;
