// Audio module - APU sample output and host playback
//
// This module provides:
// - Linear stereo mixing of the APU's NR50/NR51-resolved sample pair
// - Sample rate conversion (Game Boy master clock to 44.1/48 kHz)
// - Cross-platform audio output using cpal
// - Ring-buffered output with basic flow-control queries
//
// # Usage
//
// ```no_run
// use gb_rs::audio::{AudioSystem, AudioConfig};
// use gb_rs::apu::Apu;
//
// let mut audio_system = AudioSystem::new(AudioConfig::new()).unwrap();
// let mut apu = Apu::new();
// // ... advance apu.tick() once per master-clock cycle ...
// let (left, right) = apu.sample();
// audio_system.process_apu_sample(left, right);
// ```

pub mod mixer;
pub mod output;
pub mod resampler;

pub use mixer::Mixer;
pub use output::{AudioConfig, AudioOutput, AudioOutputBuilder};
pub use resampler::{sample_rates, AudioBuffer, Resampler};

use std::sync::{Arc, Mutex};

/// A sink an emulator pushes raw stereo APU samples into, matching the
/// `VideoSink` pattern on the display side.
pub trait AudioSink {
    fn push_frame(&mut self, left: f32, right: f32);
}

/// Complete audio pipeline for Game Boy emulation: mixer, resampler, and
/// cpal output behind one interface.
pub struct AudioSystem {
    mixer: Mixer,
    resampler: Arc<Mutex<Resampler>>,
    output: AudioOutput,
    samples_processed: u64,
    samples_output: u64,
}

impl AudioSystem {
    pub fn new(config: AudioConfig) -> Result<Self, String> {
        let resampler = if config.sample_rate == 44100 {
            Resampler::new_44_1_khz()
        } else if config.sample_rate == 48000 {
            Resampler::new_48_khz()
        } else {
            Resampler::new(sample_rates::GB_MASTER_CLOCK, config.sample_rate as f64)
        };

        let output = AudioOutput::new(config)?;

        Ok(Self {
            mixer: Mixer::new(),
            resampler: Arc::new(Mutex::new(resampler)),
            output,
            samples_processed: 0,
            samples_output: 0,
        })
    }

    pub fn new_default() -> Result<Self, String> {
        Self::new(AudioConfig::new())
    }

    /// Feed one raw `Apu::sample()` stereo pair. Call once per `Apu::tick()`.
    pub fn process_apu_sample(&mut self, left: i16, right: i16) {
        let mixed = self.mixer.mix(left, right);

        let mut resampler = self.resampler.lock().unwrap();
        resampler.add_input_sample(mixed);
        self.samples_processed += 1;

        while let Some((left, right)) = resampler.get_output_sample() {
            self.output.push_sample(left);
            self.output.push_sample(right);
            self.samples_output += 1;
        }
    }

    /// Feed one pre-mixed stereo sample pair in `[-1.0, 1.0]`, bypassing the
    /// integer mixing stage. Used by `AudioSink` callers that already have
    /// floats (the emulator loop, or a test harness).
    fn push_mixed_sample(&mut self, left: f32, right: f32) {
        let mut resampler = self.resampler.lock().unwrap();
        resampler.add_input_sample((left * self.mixer.volume(), right * self.mixer.volume()));
        self.samples_processed += 1;

        while let Some((left, right)) = resampler.get_output_sample() {
            self.output.push_sample(left);
            self.output.push_sample(right);
            self.samples_output += 1;
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.mixer.set_volume(volume);
    }

    pub fn volume(&self) -> f32 {
        self.mixer.volume()
    }

    pub fn buffer_len(&self) -> usize {
        self.output.buffer_len()
    }

    pub fn buffer_capacity(&self) -> usize {
        self.output.buffer_capacity()
    }

    pub fn is_buffer_nearly_full(&self) -> bool {
        self.output.is_buffer_nearly_full()
    }

    pub fn clear_buffer(&self) {
        self.output.clear_buffer();
    }

    pub fn stats(&self) -> AudioStats {
        AudioStats {
            samples_processed: self.samples_processed,
            samples_output: self.samples_output,
            buffer_len: self.output.buffer_len(),
            buffer_capacity: self.output.buffer_capacity(),
        }
    }

    pub fn reset_stats(&mut self) {
        self.samples_processed = 0;
        self.samples_output = 0;
    }

    pub fn pause(&self) -> Result<(), String> {
        self.output.pause()
    }

    pub fn resume(&self) -> Result<(), String> {
        self.output.resume()
    }
}

impl AudioSink for AudioSystem {
    fn push_frame(&mut self, left: f32, right: f32) {
        self.push_mixed_sample(left, right);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AudioStats {
    pub samples_processed: u64,
    pub samples_output: u64,
    pub buffer_len: usize,
    pub buffer_capacity: usize,
}

impl AudioStats {
    pub fn buffer_fullness(&self) -> f32 {
        if self.buffer_capacity == 0 {
            0.0
        } else {
            self.buffer_len as f32 / self.buffer_capacity as f32
        }
    }

    pub fn resampling_ratio(&self) -> f64 {
        if self.samples_processed == 0 {
            0.0
        } else {
            self.samples_output as f64 / self.samples_processed as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_fullness_is_a_fraction_of_capacity() {
        let stats = AudioStats { samples_processed: 1000, samples_output: 50, buffer_len: 25, buffer_capacity: 100 };
        assert_eq!(stats.buffer_fullness(), 0.25);
        assert_eq!(stats.resampling_ratio(), 0.05);
    }

    #[test]
    fn stats_with_no_samples_report_zero() {
        let stats = AudioStats { samples_processed: 0, samples_output: 0, buffer_len: 0, buffer_capacity: 100 };
        assert_eq!(stats.buffer_fullness(), 0.0);
        assert_eq!(stats.resampling_ratio(), 0.0);
    }

    // AudioSystem construction needs a real output device, so it is left to
    // manual/integration testing rather than this unit test module.
}
