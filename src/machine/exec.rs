//! The instruction cycle: decode, register validation, effective address,
//! dispatch, stack check.

use std::io::{BufRead, Write};

use crate::constants;
use crate::disasm::{self, Decoded};
use crate::insn::{Form, Mnemonic};
use crate::words;

use super::{Machine, StepResult, Trap};

impl Machine {
    /// Executes exactly one instruction. Supervisor calls read from `input`
    /// and write to `output`; console failures are not machine faults, so
    /// they are ignored.
    pub fn step<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> StepResult {
        let (mnemonic, form, gr, xr, adr) = match disasm::decode(&self.memory, self.pr) {
            Decoded::Inst {
                mnemonic,
                form,
                gr,
                xr,
                adr,
            } => (mnemonic, form, gr, xr, adr),
            Decoded::Data(word) => {
                return StepResult::Trap(Trap::UndefinedInstruction {
                    addr: self.pr,
                    word,
                })
            }
        };

        if gr > 7 || xr > 7 {
            return StepResult::Trap(Trap::InvalidRegister {
                addr: self.pr,
                gr,
                xr,
            });
        }

        let g = gr as usize;
        let eadr = if xr == 0 {
            adr
        } else {
            adr.wrapping_add(self.gr[xr as usize])
        };

        // Operand value for the instructions that exist in both the
        // register-register and the memory form.
        let val = match form {
            Form::R1R2 => self.gr[xr as usize],
            _ => self.memory.get(eadr),
        };

        let mut next = self.pr.wrapping_add(form.size());

        match mnemonic {
            Mnemonic::NOP => {}

            Mnemonic::LD => {
                self.gr[g] = val;
                self.flags_sz(val);
                self.of = false;
            }

            Mnemonic::ST => {
                self.memory.set(eadr, self.gr[g]);
            }

            Mnemonic::LAD => {
                self.gr[g] = eadr;
            }

            Mnemonic::ADDA => {
                let result = i32::from(words::to_signed(self.gr[g]))
                    + i32::from(words::to_signed(val));
                self.of = words::signed_overflow(result);
                self.store(g, result as u16);
            }

            Mnemonic::SUBA => {
                let result = i32::from(words::to_signed(self.gr[g]))
                    - i32::from(words::to_signed(val));
                self.of = words::signed_overflow(result);
                self.store(g, result as u16);
            }

            Mnemonic::ADDL => {
                let result = u32::from(self.gr[g]) + u32::from(val);
                self.of = words::unsigned_add_overflow(result);
                self.store(g, result as u16);
            }

            Mnemonic::SUBL => {
                let result = i32::from(self.gr[g]) - i32::from(val);
                self.of = words::unsigned_sub_overflow(result);
                self.store(g, result as u16);
            }

            Mnemonic::AND => {
                let result = self.gr[g] & val;
                self.store(g, result);
                self.of = false;
            }

            Mnemonic::OR => {
                let result = self.gr[g] | val;
                self.store(g, result);
                self.of = false;
            }

            Mnemonic::XOR => {
                let result = self.gr[g] ^ val;
                self.store(g, result);
                self.of = false;
            }

            // The comparisons set SF/ZF from the wrapped 16-bit difference
            // and leave OF alone.
            Mnemonic::CPA => {
                let diff = i32::from(words::to_signed(self.gr[g]))
                    - i32::from(words::to_signed(val));
                self.flags_sz(diff as u16);
            }

            // CPL clamps the unsigned difference to the signed range first.
            Mnemonic::CPL => {
                let diff = i32::from(self.gr[g]) - i32::from(val);
                let clamped = diff.max(i32::from(i16::MIN)).min(i32::from(i16::MAX));
                self.flags_sz(clamped as u16);
            }

            Mnemonic::SLA => {
                let (result, shifted_out) = shift_left_arith(self.gr[g], eadr);
                self.store(g, result);
                self.of = shifted_out;
            }

            Mnemonic::SRA => {
                let (result, shifted_out) = shift_right_arith(self.gr[g], eadr);
                self.store(g, result);
                self.of = shifted_out;
            }

            Mnemonic::SLL => {
                let (result, shifted_out) = shift_left_logical(self.gr[g], eadr);
                self.store(g, result);
                self.of = shifted_out;
            }

            Mnemonic::SRL => {
                let (result, shifted_out) = shift_right_logical(self.gr[g], eadr);
                self.store(g, result);
                self.of = shifted_out;
            }

            Mnemonic::JPL => {
                if !self.sf && !self.zf {
                    next = eadr;
                }
            }

            Mnemonic::JMI => {
                if self.sf {
                    next = eadr;
                }
            }

            Mnemonic::JNZ => {
                if !self.zf {
                    next = eadr;
                }
            }

            Mnemonic::JZE => {
                if self.zf {
                    next = eadr;
                }
            }

            Mnemonic::JOV => {
                if self.of {
                    next = eadr;
                }
            }

            Mnemonic::JUMP => {
                next = eadr;
            }

            Mnemonic::PUSH => {
                self.sp = self.sp.wrapping_sub(1);
                self.memory.set(self.sp, eadr);
            }

            Mnemonic::POP => {
                self.gr[g] = self.memory.get(self.sp);
                self.sp = self.sp.wrapping_add(1);
            }

            Mnemonic::CALL => {
                self.sp = self.sp.wrapping_sub(1);
                self.memory.set(self.sp, self.pr.wrapping_add(2));
                next = eadr;
            }

            Mnemonic::RET => {
                if self.sp == constants::STACK_EMPTY {
                    return StepResult::Halted;
                }
                next = self.memory.get(self.sp);
                self.sp = self.sp.wrapping_add(1);
            }

            Mnemonic::SVC => {
                self.svc(eadr, input, output);
                // PR advances past the opcode word only; the address word
                // of the defined calls decodes as NOP.
                next = self.pr.wrapping_add(1);
            }
        }

        self.pr = next;

        if self.sp <= self.end {
            return StepResult::Trap(Trap::StackExhausted { sp: self.sp });
        }

        StepResult::Continue
    }

    fn store(&mut self, g: usize, value: u16) {
        self.gr[g] = value;
        self.flags_sz(value);
    }

    fn flags_sz(&mut self, value: u16) {
        self.zf = value == 0;
        self.sf = value & 0x8000 != 0;
    }

    fn svc<R: BufRead, W: Write>(&mut self, operation: u16, input: &mut R, output: &mut W) {
        match operation {
            constants::SVC_IN => {
                let _ = write!(output, "{}", constants::INPUT_PROMPT);
                let _ = output.flush();
                let mut line = String::new();
                match input.read_line(&mut line) {
                    // EOF writes the sentinel length.
                    Ok(0) | Err(_) => {
                        self.memory.set(self.gr[2], 0xFFFF);
                    }
                    Ok(_) => {
                        let buffer = self.gr[1];
                        let mut length = 0u16;
                        for character in line
                            .trim_end_matches(|c| c == '\n' || c == '\r')
                            .chars()
                            .take(constants::INPUT_LIMIT)
                        {
                            self.memory
                                .set(buffer.wrapping_add(length), (character as u32 & 0xFF) as u16);
                            length += 1;
                        }
                        self.memory.set(self.gr[2], length);
                    }
                }
            }
            constants::SVC_OUT => {
                let _ = write!(output, "{}", constants::OUTPUT_PREFIX);
                let buffer = self.gr[1];
                let count = self.memory.get(self.gr[2]);
                for offset in 0..count {
                    let byte = (self.memory.get(buffer.wrapping_add(offset)) & 0xFF) as u8;
                    let _ = output.write_all(&[byte]);
                }
                let _ = writeln!(output);
                let _ = output.flush();
            }
            _ => {}
        }
    }
}

/// Arithmetic left shift: the sign bit stays put, the low 15 bits shift.
/// The returned flag is the last bit pushed out of position 14.
fn shift_left_arith(value: u16, count: u16) -> (u16, bool) {
    let sign = value & 0x8000;
    let mut low = value & 0x7FFF;
    let mut shifted_out = false;
    for _ in 0..count {
        shifted_out = low & 0x4000 != 0;
        low = (low << 1) & 0x7FFF;
    }
    (sign | low, shifted_out)
}

/// Arithmetic right shift, sign extending; the flag is the last bit shifted
/// off the low end.
fn shift_right_arith(value: u16, count: u16) -> (u16, bool) {
    let mut current = words::to_signed(value);
    let mut shifted_out = false;
    for _ in 0..count {
        shifted_out = current & 1 != 0;
        current >>= 1;
    }
    (words::to_unsigned(current), shifted_out)
}

fn shift_left_logical(value: u16, count: u16) -> (u16, bool) {
    let mut current = value;
    let mut shifted_out = false;
    for _ in 0..count {
        shifted_out = current & 0x8000 != 0;
        current <<= 1;
    }
    (current, shifted_out)
}

fn shift_right_logical(value: u16, count: u16) -> (u16, bool) {
    let mut current = value;
    let mut shifted_out = false;
    for _ in 0..count {
        shifted_out = current & 1 != 0;
        current >>= 1;
    }
    (current, shifted_out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sla_preserves_sign_bit() {
        assert_eq!(shift_left_arith(0x8001, 1), (0x8002, false));
        assert_eq!(shift_left_arith(0x4001, 1), (0x0002, true));
        assert_eq!(shift_left_arith(0xC000, 1), (0x8000, true));
    }

    #[test]
    fn sra_sign_extends() {
        assert_eq!(shift_right_arith(0x8000, 1), (0xC000, false));
        assert_eq!(shift_right_arith(0x8001, 1), (0xC000, true));
        assert_eq!(shift_right_arith(0x0001, 1), (0x0000, true));
    }

    #[test]
    fn sll_shifts_through_sign() {
        assert_eq!(shift_left_logical(0x8000, 1), (0x0000, true));
        assert_eq!(shift_left_logical(0x4000, 1), (0x8000, false));
    }

    #[test]
    fn srl_inserts_zeros() {
        assert_eq!(shift_right_logical(0x8000, 1), (0x4000, false));
        assert_eq!(shift_right_logical(0x0003, 1), (0x0001, true));
    }

    #[test]
    fn shift_by_zero_clears_the_flag() {
        assert_eq!(shift_left_arith(0xFFFF, 0), (0xFFFF, false));
        assert_eq!(shift_right_logical(0xFFFF, 0), (0xFFFF, false));
    }

    #[test]
    fn shift_counts_above_the_width_drain_the_value() {
        assert_eq!(shift_right_logical(0xFFFF, 20), (0x0000, false));
        assert_eq!(shift_right_arith(0x8000, 20), (0xFFFF, true));
    }
}
