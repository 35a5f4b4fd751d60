// 512 Hz frame sequencer, clocked by DIV bit 4 (DIV-APU) rather than
// running as a free counter: a write that resets DIV while that bit is
// set fires one extra sequencer step, which callers model by calling
// `step_on_div_reset` themselves. Here we just track position in the
// 8-step sequence and report which units fire on a given step.
//
// Step: 0   1   2   3   4   5   6   7
// Length:  x       x       x       x
// Sweep:       x           x
// Envelope:                        x  (every 8th step, i.e. 64 Hz)

#[derive(Debug, Clone, Copy, Default)]
pub struct SequencerEvents {
    pub length: bool,
    pub sweep: bool,
    pub envelope: bool,
}

#[derive(Debug, Clone)]
pub struct FrameSequencer {
    step: u8,
}

impl FrameSequencer {
    pub fn new() -> Self {
        FrameSequencer { step: 0 }
    }

    /// Advance to the next step, returning which units fire.
    pub fn step(&mut self) -> SequencerEvents {
        let events = SequencerEvents {
            length: self.step % 2 == 0,
            sweep: self.step % 4 == 2,
            envelope: self.step == 7,
        };
        self.step = (self.step + 1) % 8;
        events
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    pub(crate) fn write_state(&self, w: &mut crate::byte_io::Writer) {
        w.u8(self.step);
    }

    pub(crate) fn read_state(
        &mut self,
        r: &mut crate::byte_io::Reader,
    ) -> Result<(), crate::byte_io::UnexpectedEof> {
        self.step = r.u8()?;
        Ok(())
    }
}

impl Default for FrameSequencer {
    fn default() -> Self {
        Self::new()
    }
}
