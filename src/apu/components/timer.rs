// Generic frequency divider reused by all four channels to turn their
// period register (NRx3/NRx4 for pulse/wave, NR43 for noise) into a
// waveform-step clock.

#[derive(Debug, Clone)]
pub struct Timer {
    period: u32,
    counter: u32,
}

impl Timer {
    pub fn new() -> Self {
        Timer { period: 1, counter: 1 }
    }

    /// Reload length in master-clock ticks; zero is clamped to 1 to avoid
    /// a stuck divider when a channel's frequency register reads back 0.
    pub fn set_period(&mut self, period: u32) {
        self.period = period.max(1);
    }

    pub fn reload(&mut self) {
        self.counter = self.period;
    }

    /// Advance by one master-clock tick. Returns true each time the divider
    /// reaches zero and reloads, i.e. once per waveform step.
    pub fn tick(&mut self) -> bool {
        if self.counter == 0 {
            self.counter = self.period;
        }
        self.counter -= 1;
        if self.counter == 0 {
            self.counter = self.period;
            true
        } else {
            false
        }
    }

    pub(crate) fn write_state(&self, w: &mut crate::byte_io::Writer) {
        w.u32(self.period);
        w.u32(self.counter);
    }

    pub(crate) fn read_state(
        &mut self,
        r: &mut crate::byte_io::Reader,
    ) -> Result<(), crate::byte_io::UnexpectedEof> {
        self.period = r.u32()?;
        self.counter = r.u32()?;
        Ok(())
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
