// Audio resampler - converts the Game Boy's audio tick rate to standard
// audio rates using linear interpolation.

/// Sample rate constants.
pub mod sample_rates {
    /// Game Boy master clock in Hz; the rate `Apu::tick` is called.
    pub const GB_MASTER_CLOCK: f64 = 4_194_304.0;

    pub const AUDIO_44_1_KHZ: f64 = 44_100.0;
    pub const AUDIO_48_KHZ: f64 = 48_000.0;
}

/// Linear-interpolation resampler for a stereo sample stream.
pub struct Resampler {
    input_rate: f64,
    output_rate: f64,
    time_position: f64,
    prev_sample: (f32, f32),
    current_sample: (f32, f32),
    time_increment: f64,
}

impl Resampler {
    pub fn new(input_rate: f64, output_rate: f64) -> Self {
        Self {
            input_rate,
            output_rate,
            time_position: 0.0,
            prev_sample: (0.0, 0.0),
            current_sample: (0.0, 0.0),
            time_increment: input_rate / output_rate,
        }
    }

    pub fn new_44_1_khz() -> Self {
        Self::new(sample_rates::GB_MASTER_CLOCK, sample_rates::AUDIO_44_1_KHZ)
    }

    pub fn new_48_khz() -> Self {
        Self::new(sample_rates::GB_MASTER_CLOCK, sample_rates::AUDIO_48_KHZ)
    }

    /// Feed one input sample pair. Call once per `Apu::tick()`.
    pub fn add_input_sample(&mut self, sample: (f32, f32)) {
        self.prev_sample = self.current_sample;
        self.current_sample = sample;
        self.time_position += 1.0;
    }

    /// Returns `Some((left, right))` once enough input has accumulated to
    /// produce the next output sample at the target rate.
    pub fn get_output_sample(&mut self) -> Option<(f32, f32)> {
        if self.time_position < self.time_increment {
            return None;
        }

        let frac = ((self.time_position % self.time_increment) / self.time_increment) as f32;
        let left = self.prev_sample.0 + (self.current_sample.0 - self.prev_sample.0) * frac;
        let right = self.prev_sample.1 + (self.current_sample.1 - self.prev_sample.1) * frac;
        self.time_position -= self.time_increment;
        Some((left, right))
    }

    pub fn reset(&mut self) {
        self.time_position = 0.0;
        self.prev_sample = (0.0, 0.0);
        self.current_sample = (0.0, 0.0);
    }

    pub fn input_rate(&self) -> f64 {
        self.input_rate
    }

    pub fn output_rate(&self) -> f64 {
        self.output_rate
    }
}

/// Ring buffer of interleaved stereo samples for the audio output callback.
pub struct AudioBuffer {
    buffer: Vec<f32>,
    read_pos: usize,
    write_pos: usize,
    count: usize,
}

impl AudioBuffer {
    pub fn new(capacity: usize) -> Self {
        Self { buffer: vec![0.0; capacity], read_pos: 0, write_pos: 0, count: 0 }
    }

    pub fn with_duration(milliseconds: u32, sample_rate: f64) -> Self {
        let capacity = ((milliseconds as f64 / 1000.0) * sample_rate) as usize;
        Self::new(capacity)
    }

    pub fn push(&mut self, sample: f32) -> bool {
        if self.count >= self.buffer.len() {
            return false;
        }
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        self.count += 1;
        true
    }

    pub fn pop(&mut self) -> Option<f32> {
        if self.count == 0 {
            return None;
        }
        let sample = self.buffer[self.read_pos];
        self.read_pos = (self.read_pos + 1) % self.buffer.len();
        self.count -= 1;
        Some(sample)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
        self.count = 0;
    }
}
