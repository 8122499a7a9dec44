//! Decodes one instruction word (plus its address word for the two-word
//! forms) and renders it back as assembly text.

use std::collections::HashMap;

use crate::constants;
use crate::insn::{self, Form, Mnemonic};
use crate::memory::Memory;

/// Address-to-label map built by the object loader, used to annotate
/// disassembled operands.
pub type ReverseLabels = HashMap<u16, String>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Decoded {
    Inst {
        mnemonic: Mnemonic,
        form: Form,
        gr: u8,
        xr: u8,
        adr: u16,
    },
    /// Unknown opcode byte; rendered as a data constant.
    Data(u16),
}

impl Decoded {
    pub fn size(&self) -> u16 {
        match self {
            Decoded::Inst { form, .. } => form.size(),
            Decoded::Data(_) => 1,
        }
    }
}

pub fn decode(memory: &Memory, address: u16) -> Decoded {
    let word = memory.get(address);
    let adr = memory.get(address.wrapping_add(1));
    let code = ((word & constants::OPCODE_MASK) >> constants::OPCODE_OFFSET) as u8;
    let gr = ((word & constants::GR_MASK) >> constants::GR_OFFSET) as u8;
    let xr = ((word & constants::XR_MASK) >> constants::XR_OFFSET) as u8;

    match insn::decode_op(code) {
        Some((mnemonic, form)) => Decoded::Inst {
            mnemonic,
            form,
            gr,
            xr,
            adr,
        },
        None => Decoded::Data(word),
    }
}

fn format_adr(adr: u16, labels: Option<&ReverseLabels>) -> String {
    match labels.and_then(|map| map.get(&adr)) {
        Some(name) => format!("#{:04x} <{}>", adr, name),
        None => format!("#{:04x}", adr),
    }
}

/// Renders the mnemonic and operand columns. The index register is omitted
/// when its nibble is zero.
pub fn render(decoded: &Decoded, labels: Option<&ReverseLabels>) -> (String, String) {
    match decoded {
        Decoded::Data(word) => ("DC".to_string(), format!("#{:04x}", word)),
        Decoded::Inst {
            mnemonic,
            form,
            gr,
            xr,
            adr,
        } => {
            let operands = match form {
                Form::Nopr => String::new(),
                Form::R => format!("GR{}", gr),
                Form::R1R2 => format!("GR{}, GR{}", gr, xr),
                Form::AdrX => {
                    let adr = format_adr(*adr, labels);
                    if *xr == 0 {
                        adr
                    } else {
                        format!("{}, GR{}", adr, xr)
                    }
                }
                Form::RAdrX => {
                    let adr = format_adr(*adr, labels);
                    if *xr == 0 {
                        format!("GR{}, {}", gr, adr)
                    } else {
                        format!("GR{}, {}, GR{}", gr, adr, xr)
                    }
                }
            };
            (mnemonic.to_string(), operands)
        }
    }
}

/// One-line disassembly at `address`; returns the text and the instruction
/// size in words.
pub fn disassemble(memory: &Memory, address: u16, labels: Option<&ReverseLabels>) -> (String, u16) {
    let decoded = decode(memory, address);
    let (mnemonic, operands) = render(&decoded, labels);
    let text = if operands.is_empty() {
        mnemonic
    } else {
        format!("{:<8}{}", mnemonic, operands)
    };
    (text, decoded.size())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::insn::pack;

    fn memory_of(words: &[u16]) -> Memory {
        Memory::from(words)
    }

    #[test]
    fn decode_two_word_form() {
        let memory = memory_of(&[pack(0x10, 1, 2), 0x1234]);
        let decoded = decode(&memory, 0);
        assert_eq!(
            decoded,
            Decoded::Inst {
                mnemonic: Mnemonic::LD,
                form: Form::RAdrX,
                gr: 1,
                xr: 2,
                adr: 0x1234,
            }
        );
        assert_eq!(decoded.size(), 2);
    }

    #[test]
    fn unknown_opcode_decodes_as_data() {
        let memory = memory_of(&[0x1342]);
        let decoded = decode(&memory, 0);
        assert_eq!(decoded, Decoded::Data(0x1342));
        assert_eq!(decoded.size(), 1);
        assert_eq!(render(&decoded, None), ("DC".to_string(), "#1342".to_string()));
    }

    #[test]
    fn render_omits_zero_index_register() {
        let memory = memory_of(&[pack(0x10, 3, 0), 0x0005]);
        let (text, size) = disassemble(&memory, 0, None);
        assert_eq!(text, "LD      GR3, #0005");
        assert_eq!(size, 2);

        let memory = memory_of(&[pack(0x64, 0, 2), 0x0005]);
        let (text, _) = disassemble(&memory, 0, None);
        assert_eq!(text, "JUMP    #0005, GR2");
    }

    #[test]
    fn render_register_forms() {
        let memory = memory_of(&[pack(0x14, 1, 2)]);
        let (text, size) = disassemble(&memory, 0, None);
        assert_eq!(text, "LD      GR1, GR2");
        assert_eq!(size, 1);

        let memory = memory_of(&[pack(0x71, 4, 0)]);
        let (text, _) = disassemble(&memory, 0, None);
        assert_eq!(text, "POP     GR4");

        let memory = memory_of(&[pack(0x81, 0, 0)]);
        let (text, _) = disassemble(&memory, 0, None);
        assert_eq!(text, "RET");
    }

    #[test]
    fn known_address_renders_its_label() {
        let mut labels = ReverseLabels::new();
        labels.insert(0x0005, "LOOP".to_string());
        let memory = memory_of(&[pack(0x64, 0, 0), 0x0005]);
        let (text, _) = disassemble(&memory, 0, Some(&labels));
        assert_eq!(text, "JUMP    #0005 <LOOP>");
    }
}
