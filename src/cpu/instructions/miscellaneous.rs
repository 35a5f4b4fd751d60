// NOP/HALT/STOP/DI/EI and interrupt dispatch.

use crate::bus::Bus;
use crate::cpu::{Cpu, RunState, INTERRUPT_BITS, INTERRUPT_VECTORS};

impl Cpu {
    pub(crate) fn op_halt(&mut self, bus: &Bus) {
        let pending = bus.interrupt_enable() & bus.interrupt_flags() & 0x1F != 0;
        if !self.ime && pending {
            self.request_halt_bug();
        } else {
            self.run_state = RunState::Halted;
        }
    }

    pub(crate) fn op_stop(&mut self, bus: &mut Bus) {
        // A pending speed-switch request (KEY1 bit 0) takes effect on STOP
        // instead of halting execution.
        if bus.take_speed_switch_request() {
            self.double_speed = !self.double_speed;
            bus.set_double_speed(self.double_speed);
        } else {
            self.run_state = RunState::Stopped;
        }
    }

    pub(crate) fn op_di(&mut self) {
        self.ime = false;
    }

    pub(crate) fn op_ei(&mut self) {
        self.schedule_ime_enable();
    }

    /// Highest-priority pending, enabled interrupt, in VBlank > LCD STAT >
    /// Timer > Serial > Joypad order.
    fn pending_interrupt(&self, bus: &Bus) -> Option<usize> {
        let active = bus.interrupt_enable() & bus.interrupt_flags();
        INTERRUPT_BITS.iter().position(|&bit| active & bit != 0)
    }

    /// Services the highest-priority pending interrupt if IME is set,
    /// returning the number of M-cycles consumed (0 if none serviced).
    /// Also wakes a halted CPU even when IME is clear, since HALT only
    /// needs the interrupt to be pending in IE & IF.
    pub(crate) fn service_interrupts(&mut self, bus: &mut Bus) -> u8 {
        let Some(index) = self.pending_interrupt(bus) else {
            return 0;
        };

        if self.run_state == RunState::Halted {
            self.run_state = RunState::Running;
        }
        if self.run_state == RunState::Stopped && bus.interrupt_flags() & INTERRUPT_BITS[4] != 0 {
            self.run_state = RunState::Running;
        }

        if !self.ime {
            return 0;
        }

        self.ime = false;
        bus.clear_interrupt_flag(INTERRUPT_BITS[index]);
        self.internal_delay(bus);
        self.internal_delay(bus);
        self.push(bus, self.pc);
        self.pc = INTERRUPT_VECTORS[index];
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halt_with_ime_set_enters_halted_state() {
        let mut cpu = Cpu::new();
        let bus = Bus::for_tests();
        cpu.ime = true;
        cpu.op_halt(&bus);
        assert_eq!(cpu.run_state, RunState::Halted);
    }

    #[test]
    fn halt_with_ime_clear_and_pending_interrupt_triggers_halt_bug() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();
        bus.write(0xFFFF, 0x01);
        bus.request_interrupt(0x01);
        cpu.ime = false;
        cpu.op_halt(&bus);
        assert!(cpu.take_halt_bug());
        assert_eq!(cpu.run_state, RunState::Running);
    }

    #[test]
    fn servicing_interrupt_clears_if_bit_and_jumps_to_vector() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::for_tests();
        cpu.ime = true;
        cpu.sp = 0xFFFE;
        cpu.pc = 0x0100;
        bus.write(0xFFFF, 0x01);
        bus.request_interrupt(0x01);
        let cycles = cpu.service_interrupts(&mut bus);
        assert_eq!(cycles, 5);
        assert_eq!(cpu.pc, crate::cpu::vectors::VBLANK);
        assert_eq!(bus.interrupt_flags() & 0x01, 0);
        assert!(!cpu.ime);
    }
}
