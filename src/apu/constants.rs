// APU timing tables: length counter reload ceiling, duty-cycle waveforms,
// and the noise channel's divisor lookup.

pub const MAX_LENGTH: u16 = 64;
pub const MAX_WAVE_LENGTH: u16 = 256;

pub const DUTY_PATTERNS: [[u8; 8]; 4] = [
    [0, 0, 0, 0, 0, 0, 0, 1], // 12.5%
    [1, 0, 0, 0, 0, 0, 0, 1], // 25%
    [1, 0, 0, 0, 0, 1, 1, 1], // 50%
    [0, 1, 1, 1, 1, 1, 1, 0], // 75%
];

/// Noise channel's divisor-code lookup (NR43 bits 0-2).
pub const NOISE_DIVISORS: [u16; 8] = [8, 16, 32, 48, 64, 80, 96, 112];

pub const FRAME_SEQUENCER_PERIOD: u32 = 8192; // master-clock ticks per 512 Hz step
