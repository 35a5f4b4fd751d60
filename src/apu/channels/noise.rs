// Noise channel: NR41-NR44. A 15-bit LFSR clocked at a divisor-and-shift
// derived rate; NR43 bit 3 optionally narrows it to 7 bits for a higher
// pitched, more metallic tone.

use crate::apu::components::{Envelope, LengthCounter, Timer};
use crate::apu::constants::NOISE_DIVISORS;

pub struct NoiseChannel {
    enabled: bool,
    envelope: Envelope,
    length_counter: LengthCounter,
    timer: Timer,
    lfsr: u16,
    narrow_mode: bool,
    clock_shift: u8,
    divisor_code: u8,
}

impl NoiseChannel {
    pub fn new() -> Self {
        NoiseChannel {
            enabled: false,
            envelope: Envelope::new(),
            length_counter: LengthCounter::new(64),
            timer: Timer::new(),
            lfsr: 0x7FFF,
            narrow_mode: false,
            clock_shift: 0,
            divisor_code: 0,
        }
    }

    /// NR41: length load only, bits 5-0.
    pub fn write_length(&mut self, value: u8) {
        self.length_counter.load((value & 0x3F) as u16);
    }

    pub fn write_envelope(&mut self, value: u8) {
        self.envelope.write(value);
        if !self.envelope.dac_enabled() {
            self.enabled = false;
        }
    }

    pub fn read_envelope(&self) -> u8 {
        self.envelope.read()
    }

    /// NR43: bits 7-4 clock shift, bit 3 width mode, bits 2-0 divisor code.
    pub fn write_polynomial(&mut self, value: u8) {
        self.clock_shift = value >> 4;
        self.narrow_mode = value & 0x08 != 0;
        self.divisor_code = value & 0x07;
        self.reload_timer();
    }

    pub fn read_polynomial(&self) -> u8 {
        (self.clock_shift << 4) | ((self.narrow_mode as u8) << 3) | self.divisor_code
    }

    fn reload_timer(&mut self) {
        let divisor = NOISE_DIVISORS[self.divisor_code as usize] as u32;
        self.timer.set_period(divisor << self.clock_shift);
    }

    /// NR44: bit 7 trigger, bit 6 length enable.
    pub fn write_control(&mut self, value: u8) {
        self.length_counter.set_enabled(value & 0x40 != 0);
        if value & 0x80 != 0 {
            self.trigger();
        }
    }

    fn trigger(&mut self) {
        if !self.envelope.dac_enabled() {
            return;
        }
        self.enabled = true;
        self.length_counter.trigger();
        self.reload_timer();
        self.envelope.trigger();
        self.lfsr = 0x7FFF;
    }

    pub fn is_active(&self) -> bool {
        self.enabled
    }

    pub fn step_timer(&mut self) {
        if !self.timer.tick() {
            return;
        }
        let feedback = (self.lfsr & 0x01) ^ ((self.lfsr >> 1) & 0x01);
        self.lfsr >>= 1;
        self.lfsr |= feedback << 14;
        if self.narrow_mode {
            self.lfsr &= !(1 << 6);
            self.lfsr |= feedback << 6;
        }
    }

    pub fn step_envelope(&mut self) {
        self.envelope.step();
    }

    pub fn step_length(&mut self) {
        if self.length_counter.step() {
            self.enabled = false;
        }
    }

    pub fn output(&self) -> u8 {
        if !self.enabled {
            return 0;
        }
        if self.lfsr & 0x01 == 0 {
            self.envelope.volume()
        } else {
            0
        }
    }

    pub(crate) fn write_state(&self, w: &mut crate::byte_io::Writer) {
        w.bool(self.enabled);
        self.envelope.write_state(w);
        self.length_counter.write_state(w);
        self.timer.write_state(w);
        w.u16(self.lfsr);
        w.bool(self.narrow_mode);
        w.u8(self.clock_shift);
        w.u8(self.divisor_code);
    }

    pub(crate) fn read_state(
        &mut self,
        r: &mut crate::byte_io::Reader,
    ) -> Result<(), crate::byte_io::UnexpectedEof> {
        self.enabled = r.bool()?;
        self.envelope.read_state(r)?;
        self.length_counter.read_state(r)?;
        self.timer.read_state(r)?;
        self.lfsr = r.u16()?;
        self.narrow_mode = r.bool()?;
        self.clock_shift = r.u8()?;
        self.divisor_code = r.u8()?;
        Ok(())
    }
}

impl Default for NoiseChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_resets_lfsr_to_all_ones() {
        let mut noise = NoiseChannel::new();
        noise.write_envelope(0xF0);
        noise.lfsr = 0;
        noise.write_control(0x80);
        assert_eq!(noise.lfsr, 0x7FFF);
    }

    #[test]
    fn output_is_silent_immediately_after_trigger() {
        let mut noise = NoiseChannel::new();
        noise.write_envelope(0xF0);
        noise.write_control(0x80);
        assert_eq!(noise.output(), 0);
    }

    #[test]
    fn narrow_mode_copies_feedback_into_bit_six() {
        let mut noise = NoiseChannel::new();
        noise.write_envelope(0xF0);
        noise.write_polynomial(0x08); // shift 0, narrow mode, divisor 0
        noise.write_control(0x80);
        noise.step_timer();
        assert_eq!((noise.lfsr >> 6) & 1, (noise.lfsr >> 14) & 1);
    }
}
