// Audio mixer - converts the APU's stereo integer sample pair to floats
//
// Unlike the NES's non-linear analog mixing network, the Game Boy's NR50
// master-volume stage sums already-digital 4-bit channel outputs linearly,
// so software mixing here is a straight scale-and-clamp rather than a
// logarithmic approximation.

/// Largest magnitude `Apu::sample()` can produce: four channels at full
/// scale (15) summed and multiplied by the maximum NR50 volume factor (8).
const MAX_APU_SAMPLE: f32 = 15.0 * 4.0 * 8.0;

pub struct Mixer {
    volume: f32,
}

impl Mixer {
    pub fn new() -> Self {
        Self { volume: 1.0 }
    }

    pub fn with_volume(volume: f32) -> Self {
        Self { volume: volume.clamp(0.0, 1.0) }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Scale a raw `Apu::sample()` stereo pair into `[-1.0, 1.0]` floats.
    pub fn mix(&self, left: i16, right: i16) -> (f32, f32) {
        let scale = self.volume / MAX_APU_SAMPLE;
        ((left as f32 * scale).clamp(-1.0, 1.0), (right as f32 * scale).clamp(-1.0, 1.0))
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
