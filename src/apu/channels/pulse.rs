// Pulse wave channel: NR10-NR14 (channel 1, with sweep) and NR21-NR24
// (channel 2, sweep-less). Frequency is an 11-bit value `f`; the timer
// period in master-clock ticks is `(2048 - f) * 4`.

use crate::apu::components::{Envelope, LengthCounter, Sweep, Timer};
use crate::apu::constants::DUTY_PATTERNS;

pub struct PulseChannel {
    has_sweep: bool,
    enabled: bool,
    duty: u8,
    duty_position: u8,
    frequency: u16,
    envelope: Envelope,
    sweep: Sweep,
    length_counter: LengthCounter,
    timer: Timer,
}

impl PulseChannel {
    pub fn new(has_sweep: bool) -> Self {
        let mut timer = Timer::new();
        timer.set_period(4);
        PulseChannel {
            has_sweep,
            enabled: false,
            duty: 0,
            duty_position: 0,
            frequency: 0,
            envelope: Envelope::new(),
            sweep: Sweep::new(),
            length_counter: LengthCounter::new(64),
            timer,
        }
    }

    fn reload_timer(&mut self) {
        self.timer.set_period((2048 - self.frequency as u32) * 4);
    }

    /// NR10 (sweep unit), channel 2 ignores writes to this register.
    pub fn write_sweep(&mut self, value: u8) {
        if self.has_sweep {
            self.sweep.write(value);
        }
    }

    pub fn read_sweep(&self) -> u8 {
        if self.has_sweep {
            self.sweep.read()
        } else {
            0xFF
        }
    }

    /// NRx1: bits 7-6 duty, bits 5-0 length load.
    pub fn write_length_duty(&mut self, value: u8) {
        self.duty = value >> 6;
        self.length_counter.load((value & 0x3F) as u16);
    }

    pub fn read_duty(&self) -> u8 {
        self.duty << 6
    }

    /// NRx2: volume envelope.
    pub fn write_envelope(&mut self, value: u8) {
        self.envelope.write(value);
        if !self.envelope.dac_enabled() {
            self.enabled = false;
        }
    }

    pub fn read_envelope(&self) -> u8 {
        self.envelope.read()
    }

    /// NRx3: frequency low byte.
    pub fn write_frequency_low(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x0700) | value as u16;
    }

    /// NRx4: bit 7 trigger, bit 6 length enable, bits 2-0 frequency high.
    pub fn write_frequency_high(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x00FF) | (((value & 0x07) as u16) << 8);
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
        if self.has_sweep {
            self.sweep.trigger(self.frequency);
            if self.sweep.disabled_by_overflow() {
                self.enabled = false;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled
    }

    pub fn step_timer(&mut self) {
        if self.timer.tick() {
            self.duty_position = (self.duty_position + 1) % 8;
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

    pub fn step_sweep(&mut self) {
        if !self.has_sweep {
            return;
        }
        if let Some(new_frequency) = self.sweep.step() {
            self.frequency = new_frequency;
            self.reload_timer();
        }
        if self.sweep.disabled_by_overflow() {
            self.enabled = false;
        }
    }

    pub fn output(&self) -> u8 {
        if !self.enabled {
            return 0;
        }
        let bit = DUTY_PATTERNS[self.duty as usize][self.duty_position as usize];
        if bit == 0 {
            0
        } else {
            self.envelope.volume()
        }
    }

    pub(crate) fn write_state(&self, w: &mut crate::byte_io::Writer) {
        w.bool(self.enabled);
        w.u8(self.duty);
        w.u8(self.duty_position);
        w.u16(self.frequency);
        self.envelope.write_state(w);
        self.sweep.write_state(w);
        self.length_counter.write_state(w);
        self.timer.write_state(w);
    }

    pub(crate) fn read_state(
        &mut self,
        r: &mut crate::byte_io::Reader,
    ) -> Result<(), crate::byte_io::UnexpectedEof> {
        self.enabled = r.bool()?;
        self.duty = r.u8()?;
        self.duty_position = r.u8()?;
        self.frequency = r.u16()?;
        self.envelope.read_state(r)?;
        self.sweep.read_state(r)?;
        self.length_counter.read_state(r)?;
        self.timer.read_state(r)?;
        Ok(())
    }
}
