// Logical operations: AND/OR/XOR/CP, plus CPL/SCF/CCF.

use crate::cpu::flags::{CARRY, HALF_CARRY, SUBTRACT, ZERO};
use crate::cpu::Cpu;

impl Cpu {
    pub(crate) fn alu_and(&mut self, value: u8) {
        self.a &= value;
        self.set_flag(ZERO, self.a == 0);
        self.set_flag(SUBTRACT, false);
        self.set_flag(HALF_CARRY, true);
        self.set_flag(CARRY, false);
    }

    pub(crate) fn alu_or(&mut self, value: u8) {
        self.a |= value;
        self.set_flag(ZERO, self.a == 0);
        self.set_flag(SUBTRACT, false);
        self.set_flag(HALF_CARRY, false);
        self.set_flag(CARRY, false);
    }

    pub(crate) fn alu_xor(&mut self, value: u8) {
        self.a ^= value;
        self.set_flag(ZERO, self.a == 0);
        self.set_flag(SUBTRACT, false);
        self.set_flag(HALF_CARRY, false);
        self.set_flag(CARRY, false);
    }

    pub(crate) fn alu_cp(&mut self, value: u8) {
        self.alu_sub(value, false, false);
    }

    pub(crate) fn cpl(&mut self) {
        self.a = !self.a;
        self.set_flag(SUBTRACT, true);
        self.set_flag(HALF_CARRY, true);
    }

    pub(crate) fn scf(&mut self) {
        self.set_flag(SUBTRACT, false);
        self.set_flag(HALF_CARRY, false);
        self.set_flag(CARRY, true);
    }

    pub(crate) fn ccf(&mut self) {
        self.set_flag(SUBTRACT, false);
        self.set_flag(HALF_CARRY, false);
        self.set_flag(CARRY, !self.flag(CARRY));
    }
}
