// Opcode dispatch.
//
// The Sharp LR35902 opcode map decomposes into `xx yyy zzz` bit fields
// shared by large opcode families (the 0x40-0x7F register-to-register LD
// block, the 0x80-0xBF ALU block, the CB-prefixed bit-operation block).
// `step` decodes those fields once per instruction and dispatches into the
// per-category functions in `instructions/`, rather than writing one
// method per of the 512 base+CB opcodes.

use crate::bus::Bus;
use crate::cpu::{Cpu, RunState};

const RP: [u8; 4] = [0, 1, 2, 3]; // BC DE HL SP, indices into read/write_r16_group1
const RP2_AF: u8 = 3; // AF, distinct from SP at the same position in PUSH/POP

impl Cpu {
    /// Execute exactly one instruction (or one idle tick while halted or
    /// stopped), returning the number of M-cycles consumed.
    pub fn step(&mut self, bus: &mut Bus) -> u8 {
        self.poll_ime_schedule();

        let interrupt_cycles = self.service_interrupts(bus);
        if interrupt_cycles > 0 {
            return interrupt_cycles;
        }

        if self.run_state != RunState::Running {
            self.internal_delay(bus);
            return 1;
        }

        let start_cycles = bus.total_t_cycles();
        let opcode = self.fetch_byte(bus);
        if self.take_halt_bug() {
            self.pc = self.pc.wrapping_sub(1);
        }

        if opcode == 0xCB {
            let cb_opcode = self.fetch_byte(bus);
            self.execute_cb(bus, cb_opcode);
        } else {
            self.execute_base(bus, opcode);
        }

        ((bus.total_t_cycles() - start_cycles) / 4).max(1) as u8
    }

    fn execute_base(&mut self, bus: &mut Bus, opcode: u8) {
        let x = opcode >> 6;
        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;
        let q = y & 1;
        let p = y >> 1;

        match (x, z) {
            (0, 0) => match y {
                0 => {}
                1 => self.op_ld_nn_sp(bus),
                2 => self.op_stop(bus),
                3 => self.op_jr_e8(bus),
                4..=7 => self.op_jr_cc_e8(bus, y - 4),
                _ => unreachable!(),
            },
            (0, 1) => {
                if q == 0 {
                    self.op_ld_r16_nn(bus, RP[p as usize]);
                } else {
                    self.add_hl(self.read_r16_group1(RP[p as usize]));
                    self.internal_delay(bus);
                }
            }
            (0, 2) => self.execute_indirect_load(bus, p, q),
            (0, 3) => {
                let rp = RP[p as usize];
                let value = self.read_r16_group1(rp);
                self.internal_delay(bus);
                if q == 0 {
                    self.write_r16_group1(rp, value.wrapping_add(1));
                } else {
                    self.write_r16_group1(rp, value.wrapping_sub(1));
                }
            }
            (0, 4) => {
                let value = self.read_r8(bus, y);
                let result = self.inc8(value);
                self.write_r8(bus, y, result);
            }
            (0, 5) => {
                let value = self.read_r8(bus, y);
                let result = self.dec8(value);
                self.write_r8(bus, y, result);
            }
            (0, 6) => self.op_ld_r8_n(bus, y),
            (0, 7) => self.execute_accumulator_op(y),
            (1, _) if y == 6 && z == 6 => self.op_halt(bus),
            (1, _) => {
                let value = self.read_r8(bus, z);
                self.write_r8(bus, y, value);
            }
            (2, _) => {
                let value = self.read_r8(bus, z);
                self.execute_alu(y, value);
            }
            (3, 0) => match y {
                0..=3 => self.op_ret_cc(bus, y),
                4 => self.op_ldh_n_a(bus),
                5 => self.op_add_sp_e8(bus),
                6 => self.op_ldh_a_n(bus),
                7 => self.op_ld_hl_sp_e8(bus),
                _ => unreachable!(),
            },
            (3, 1) => {
                if q == 0 {
                    self.op_pop(bus, p);
                } else {
                    match p {
                        0 => self.op_ret(bus),
                        1 => self.op_reti(bus),
                        2 => self.op_jp_hl(),
                        _ => self.op_ld_sp_hl(bus),
                    }
                }
            }
            (3, 2) => match y {
                0..=3 => self.op_jp_cc_nn(bus, y),
                4 => self.op_ldh_c_a(bus),
                5 => self.op_ld_nn_a(bus),
                6 => self.op_ldh_a_c(bus),
                7 => self.op_ld_a_nn(bus),
                _ => unreachable!(),
            },
            (3, 3) => match y {
                0 => self.op_jp_nn(bus),
                6 => self.op_di(),
                7 => self.op_ei(),
                _ => {} // 1 (CB) handled before dispatch; 2-5 unused, treated as NOP
            },
            (3, 4) => {
                if y <= 3 {
                    self.op_call_cc_nn(bus, y);
                } else {
                    self.fetch_word(bus); // unused opcode, still consumes its operand bytes
                }
            }
            (3, 5) => {
                if q == 0 {
                    self.op_push(bus, if p == RP2_AF { 3 } else { p });
                } else if p == 0 {
                    self.op_call_nn(bus);
                }
            }
            (3, 6) => {
                let value = self.fetch_byte(bus);
                self.execute_alu(y, value);
            }
            (3, 7) => self.op_rst(bus, y * 8),
            _ => {}
        }
    }

    fn execute_indirect_load(&mut self, bus: &mut Bus, p: u8, q: u8) {
        match (p, q) {
            (0, 0) => {
                let addr = self.bc();
                self.op_ld_indirect_a(bus, addr);
            }
            (0, 1) => {
                let addr = self.bc();
                self.op_ld_a_indirect(bus, addr);
            }
            (1, 0) => {
                let addr = self.de();
                self.op_ld_indirect_a(bus, addr);
            }
            (1, 1) => {
                let addr = self.de();
                self.op_ld_a_indirect(bus, addr);
            }
            (2, 0) => self.op_ld_hl_inc_a(bus),
            (2, 1) => self.op_ld_a_hl_inc(bus),
            (3, 0) => self.op_ld_hl_dec_a(bus),
            _ => self.op_ld_a_hl_dec(bus),
        }
    }

    fn execute_accumulator_op(&mut self, y: u8) {
        match y {
            0 => self.rlca(),
            1 => self.rrca(),
            2 => self.rla(),
            3 => self.rra(),
            4 => self.daa(),
            5 => self.cpl(),
            6 => self.scf(),
            _ => self.ccf(),
        }
    }

    fn execute_alu(&mut self, op: u8, value: u8) {
        match op {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false, true),
            3 => self.alu_sub(value, true, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    fn execute_cb(&mut self, bus: &mut Bus, opcode: u8) {
        let x = opcode >> 6;
        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;

        let value = self.read_r8(bus, z);
        match x {
            0 => {
                let result = match y {
                    0 => self.cb_rlc(value),
                    1 => self.cb_rrc(value),
                    2 => self.cb_rl(value),
                    3 => self.cb_rr(value),
                    4 => self.cb_sla(value),
                    5 => self.cb_sra(value),
                    6 => self.cb_swap(value),
                    _ => self.cb_srl(value),
                };
                self.write_r8(bus, z, result);
            }
            1 => self.cb_bit(value, y),
            2 => {
                let result = self.cb_res(value, y);
                self.write_r8(bus, z, result);
            }
            _ => {
                let result = self.cb_set(value, y);
                self.write_r8(bus, z, result);
            }
        }
    }
}
