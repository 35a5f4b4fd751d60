//! Common APU components used by multiple channels

pub mod envelope;
pub mod frame_sequencer;
pub mod length_counter;
pub mod sweep;
pub mod timer;

pub use envelope::Envelope;
pub use frame_sequencer::FrameSequencer;
pub use length_counter::LengthCounter;
pub use sweep::Sweep;
pub use timer::Timer;
