// Length counter shared by all four channels (NRx1/NRx4).
//
// The wave channel's counter counts down from 256 instead of 64; `max`
// captures that difference so one implementation serves both.

#[derive(Debug, Clone)]
pub struct LengthCounter {
    counter: u16,
    enabled: bool,
    max: u16,
}

impl LengthCounter {
    pub fn new(max: u16) -> Self {
        LengthCounter { counter: 0, enabled: false, max }
    }

    /// Load from NRx1's length field (6 bits, or 8 for the wave channel).
    pub fn load(&mut self, raw: u16) {
        self.counter = self.max - raw;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Trigger reloads an expired counter to its maximum.
    pub fn trigger(&mut self) {
        if self.counter == 0 {
            self.counter = self.max;
        }
    }

    /// Clocked at 256 Hz by the frame sequencer. Returns true the instant
    /// the counter reaches zero, so the caller can silence the channel.
    pub fn step(&mut self) -> bool {
        if !self.enabled || self.counter == 0 {
            return false;
        }
        self.counter -= 1;
        self.counter == 0
    }

    pub(crate) fn write_state(&self, w: &mut crate::byte_io::Writer) {
        w.u16(self.counter);
        w.bool(self.enabled);
    }

    pub(crate) fn read_state(
        &mut self,
        r: &mut crate::byte_io::Reader,
    ) -> Result<(), crate::byte_io::UnexpectedEof> {
        self.counter = r.u16()?;
        self.enabled = r.bool()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_counter_never_expires() {
        let mut lc = LengthCounter::new(64);
        lc.load(63);
        for _ in 0..10 {
            assert!(!lc.step());
        }
    }

    #[test]
    fn enabled_counter_expires_and_signals_once() {
        let mut lc = LengthCounter::new(64);
        lc.load(62); // counter = 2
        lc.set_enabled(true);
        assert!(!lc.step());
        assert!(lc.step());
        assert!(!lc.step());
    }

    #[test]
    fn trigger_reloads_an_expired_counter() {
        let mut lc = LengthCounter::new(256);
        lc.set_enabled(true);
        lc.load(256);
        assert_eq!(lc.counter, 0);
        lc.trigger();
        assert_eq!(lc.counter, 256);
    }
}
