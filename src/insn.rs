use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::ToPrimitive;
use util::EnumFromStr;
use util_derive::EnumFromStr;

use crate::constants;

/// Instruction word layout:
///
/// | Form     | Bits 15-8 | Bits 7-4 | Bits 3-0 | Second word |
/// |----------|-----------|----------|----------|-------------|
/// | `nopr`   | opcode    | 0        | 0        | -           |
/// | `r`      | opcode    | GR       | 0        | -           |
/// | `r1_r2`  | opcode    | GR1      | GR2      | -           |
/// | `adr_x`  | opcode    | 0        | XR       | address     |
/// | `r_adr_x`| opcode    | GR       | XR       | address     |
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Form {
    Nopr,
    R,
    R1R2,
    AdrX,
    RAdrX,
}

impl Form {
    /// Instruction length in words.
    pub fn size(self) -> u16 {
        match self {
            Form::Nopr | Form::R | Form::R1R2 => 1,
            Form::AdrX | Form::RAdrX => 2,
        }
    }
}

/// The closed set of operation names known to the machine.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumFromStr)]
pub enum Mnemonic {
    NOP,
    LD,
    ST,
    LAD,
    ADDA,
    SUBA,
    ADDL,
    SUBL,
    AND,
    OR,
    XOR,
    CPA,
    CPL,
    SLA,
    SRA,
    SLL,
    SRL,
    JMI,
    JNZ,
    JZE,
    JUMP,
    JPL,
    JOV,
    PUSH,
    POP,
    CALL,
    RET,
    SVC,
}

/// General purpose registers. `GR0` cannot serve as an index register.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive, EnumFromStr)]
pub enum RegisterId {
    GR0,
    GR1,
    GR2,
    GR3,
    GR4,
    GR5,
    GR6,
    GR7,
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl std::fmt::Display for $e {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(Form);
impl_enum_display!(Mnemonic);
impl_enum_display!(RegisterId);

#[inline]
pub fn register_index(id: RegisterId) -> usize {
    id.to_usize().unwrap_or(0)
}

/// The opcode byte alone determines the mnemonic and addressing form.
pub const OPCODES: &[(u8, Mnemonic, Form)] = &[
    (0x00, Mnemonic::NOP, Form::Nopr),
    (0x10, Mnemonic::LD, Form::RAdrX),
    (0x11, Mnemonic::ST, Form::RAdrX),
    (0x12, Mnemonic::LAD, Form::RAdrX),
    (0x14, Mnemonic::LD, Form::R1R2),
    (0x20, Mnemonic::ADDA, Form::RAdrX),
    (0x21, Mnemonic::SUBA, Form::RAdrX),
    (0x22, Mnemonic::ADDL, Form::RAdrX),
    (0x23, Mnemonic::SUBL, Form::RAdrX),
    (0x24, Mnemonic::ADDA, Form::R1R2),
    (0x25, Mnemonic::SUBA, Form::R1R2),
    (0x26, Mnemonic::ADDL, Form::R1R2),
    (0x27, Mnemonic::SUBL, Form::R1R2),
    (0x30, Mnemonic::AND, Form::RAdrX),
    (0x31, Mnemonic::OR, Form::RAdrX),
    (0x32, Mnemonic::XOR, Form::RAdrX),
    (0x34, Mnemonic::AND, Form::R1R2),
    (0x35, Mnemonic::OR, Form::R1R2),
    (0x36, Mnemonic::XOR, Form::R1R2),
    (0x40, Mnemonic::CPA, Form::RAdrX),
    (0x41, Mnemonic::CPL, Form::RAdrX),
    (0x44, Mnemonic::CPA, Form::R1R2),
    (0x45, Mnemonic::CPL, Form::R1R2),
    (0x50, Mnemonic::SLA, Form::RAdrX),
    (0x51, Mnemonic::SRA, Form::RAdrX),
    (0x52, Mnemonic::SLL, Form::RAdrX),
    (0x53, Mnemonic::SRL, Form::RAdrX),
    (0x61, Mnemonic::JMI, Form::AdrX),
    (0x62, Mnemonic::JNZ, Form::AdrX),
    (0x63, Mnemonic::JZE, Form::AdrX),
    (0x64, Mnemonic::JUMP, Form::AdrX),
    (0x65, Mnemonic::JPL, Form::AdrX),
    (0x66, Mnemonic::JOV, Form::AdrX),
    (0x70, Mnemonic::PUSH, Form::AdrX),
    (0x71, Mnemonic::POP, Form::R),
    (0x80, Mnemonic::CALL, Form::AdrX),
    (0x81, Mnemonic::RET, Form::Nopr),
    (0xF0, Mnemonic::SVC, Form::AdrX),
];

/// Looks up an opcode byte. Unknown bytes decode as data.
pub fn decode_op(code: u8) -> Option<(Mnemonic, Form)> {
    OPCODES
        .iter()
        .find(|(byte, _, _)| *byte == code)
        .map(|(_, mnemonic, form)| (*mnemonic, *form))
}

/// Inverse lookup used by the assembler once the form is inferred.
pub fn encode_op(mnemonic: Mnemonic, form: Form) -> Option<u8> {
    OPCODES
        .iter()
        .find(|(_, m, f)| *m == mnemonic && *f == form)
        .map(|(byte, _, _)| *byte)
}

/// All addressing forms a mnemonic encodes to.
pub fn forms_of(mnemonic: Mnemonic) -> impl Iterator<Item = Form> {
    OPCODES
        .iter()
        .filter(move |(_, m, _)| *m == mnemonic)
        .map(|(_, _, f)| *f)
}

/// Packs the first instruction word; absent fields are zero nibbles.
#[inline]
pub fn pack(opcode: u8, gr: u8, xr: u8) -> u16 {
    (u16::from(opcode) << constants::OPCODE_OFFSET)
        | ((u16::from(gr) << constants::GR_OFFSET) & constants::GR_MASK)
        | (u16::from(xr) & constants::XR_MASK)
}
