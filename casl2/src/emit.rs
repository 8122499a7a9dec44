//! Pass 1: per-form encoders, assembler directives and the macro
//! expansions. Deferred operands stay `Pending` in the image until pass 2.

use comet2::insn::register_index;
use comet2::{encode_op, pack, Form, Mnemonic};
use util::EnumFromStr;

use crate::image::{Image, Payload};
use crate::labels::LabelTable;
use crate::statement::{infer_form, number_value, Operand, OperandKind, Statement};
use crate::Warning;

pub struct Assembler {
    pub image: Image,
    pub labels: LabelTable,
    warnings: Vec<Warning>,
    /// Distinct literal spellings in first-use order.
    literals: Vec<(String, u32)>,
    entry: Option<Payload>,
    in_block: bool,
    started: bool,
}

fn opcode(mnemonic: Mnemonic, form: Form) -> Result<u8, String> {
    encode_op(mnemonic, form).ok_or_else(|| format!("{} has no {} form", mnemonic, form))
}

fn register_of(operand: &Operand) -> Result<u8, String> {
    match operand.kind {
        OperandKind::Register(id) => Ok(register_index(id) as u8),
        _ => Err(format!("register expected, found {}", operand.raw)),
    }
}

fn index_of(operand: &Operand) -> Result<u8, String> {
    let register = register_of(operand)?;
    if register == 0 {
        return Err("GR0 is wired to zero and cannot be an index register".to_string());
    }
    Ok(register)
}

impl Assembler {
    pub fn new() -> Assembler {
        Assembler {
            image: Image::new(),
            labels: LabelTable::new(),
            warnings: Vec::new(),
            literals: Vec::new(),
            entry: None,
            in_block: false,
            started: false,
        }
    }

    /// Processes one statement at the current cursor.
    pub fn statement(&mut self, statement: &Statement, lineno: u32) -> Result<(), String> {
        let op = match statement.op {
            Some(op) => op,
            None => {
                return match statement.label {
                    Some(label) => Err(format!("label {} has no operation", label)),
                    None => Ok(()),
                };
            }
        };

        if op == "START" {
            return self.start(statement, lineno);
        }
        if !self.in_block {
            return Err(format!("{} appears outside a START/END block", op));
        }
        if let Some(label) = statement.label {
            self.define_label(label, self.image.cursor() as u16, lineno)?;
        }

        match op {
            "END" => self.end(statement),
            "DS" => self.reserve(statement, lineno),
            "DC" => self.constants(statement, lineno),
            "RPUSH" => self.rpush(statement, lineno),
            "RPOP" => self.rpop(statement, lineno),
            "IN" => self.in_out(statement, lineno, comet2::constants::SVC_IN),
            "OUT" => self.in_out(statement, lineno, comet2::constants::SVC_OUT),
            _ => self.instruction(op, statement, lineno),
        }
    }

    /// Checks done once the whole source was consumed.
    pub fn finish(&self) -> Result<(), String> {
        if !self.started {
            return Err("no START in the source".to_string());
        }
        if self.in_block {
            return Err("the source ends without END".to_string());
        }
        Ok(())
    }

    pub fn entry(&self) -> Option<&Payload> {
        self.entry.as_ref()
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Gives every pooled literal one word at the cursor and enters its
    /// spelling into the label table. Returns `(spelling, lineno, addr)`
    /// for the listing.
    pub fn allocate_literals(&mut self) -> Result<Vec<(String, u32, u16)>, (u32, String)> {
        let literals = std::mem::take(&mut self.literals);
        let mut allocated = Vec::with_capacity(literals.len());
        for (spelling, lineno) in literals {
            let value = number_value(&spelling[1..])
                .ok_or_else(|| (lineno, format!("literal {} is out of range", spelling)))?;
            let addr = self.image.cursor() as u16;
            self.labels
                .define(&spelling, addr, lineno)
                .map_err(|previous| {
                    (
                        lineno,
                        format!("label {} already defined at line {}", spelling, previous),
                    )
                })?;
            self.image.push(Payload::Resolved(value as u16), lineno);
            allocated.push((spelling, lineno, addr));
        }
        Ok(allocated)
    }

    fn define_label(&mut self, name: &str, addr: u16, lineno: u32) -> Result<(), String> {
        self.labels
            .define(name, addr, lineno)
            .map_err(|previous| format!("label {} already defined at line {}", name, previous))
    }

    fn start(&mut self, statement: &Statement, lineno: u32) -> Result<(), String> {
        if self.started {
            return Err("START appears more than once".to_string());
        }
        let label = match statement.label {
            Some(label) => label,
            None => return Err("START requires a label".to_string()),
        };
        self.started = true;
        self.in_block = true;
        let addr = self.image.cursor() as u16;
        self.define_label(label, addr, lineno)?;
        self.entry = Some(match statement.operands.as_slice() {
            [] => Payload::Resolved(addr),
            [operand] => match &operand.kind {
                OperandKind::Symbol(name) => Payload::Pending((*name).to_string()),
                _ => return Err(format!("START takes a label operand, found {}", operand.raw)),
            },
            _ => return Err("START takes at most one operand".to_string()),
        });
        Ok(())
    }

    fn end(&mut self, statement: &Statement) -> Result<(), String> {
        if !statement.operands.is_empty() {
            return Err("END takes no operand".to_string());
        }
        self.in_block = false;
        Ok(())
    }

    fn reserve(&mut self, statement: &Statement, lineno: u32) -> Result<(), String> {
        let count = match statement.operands.as_slice() {
            [operand] => match operand.kind {
                OperandKind::Number(value) if value >= 0 => value,
                _ => return Err(format!("DS takes a word count, found {}", operand.raw)),
            },
            _ => return Err("DS takes exactly one operand".to_string()),
        };
        for _ in 0..count {
            self.emit(0, lineno);
        }
        Ok(())
    }

    fn constants(&mut self, statement: &Statement, lineno: u32) -> Result<(), String> {
        if statement.operands.is_empty() {
            return Err("DC takes at least one operand".to_string());
        }
        for operand in &statement.operands {
            match &operand.kind {
                OperandKind::Str(text) => {
                    // One character per word, high byte zero.
                    for character in text.chars() {
                        self.emit((character as u32 & 0xFF) as u16, lineno);
                    }
                }
                OperandKind::Number(value) => self.emit(*value as u16, lineno),
                OperandKind::Symbol(name) => {
                    self.image
                        .push(Payload::Pending((*name).to_string()), lineno);
                }
                _ => return Err(format!("bad DC operand {}", operand.raw)),
            }
        }
        Ok(())
    }

    fn rpush(&mut self, statement: &Statement, lineno: u32) -> Result<(), String> {
        if !statement.operands.is_empty() {
            return Err("RPUSH takes no operand".to_string());
        }
        let push = opcode(Mnemonic::PUSH, Form::AdrX)?;
        for register in 1..=7 {
            self.emit(pack(push, 0, register), lineno);
            self.emit(0, lineno);
        }
        Ok(())
    }

    fn rpop(&mut self, statement: &Statement, lineno: u32) -> Result<(), String> {
        if !statement.operands.is_empty() {
            return Err("RPOP takes no operand".to_string());
        }
        let pop = opcode(Mnemonic::POP, Form::R)?;
        for register in (1..=7).rev() {
            self.emit(pack(pop, register, 0), lineno);
        }
        Ok(())
    }

    fn in_out(&mut self, statement: &Statement, lineno: u32, call: u16) -> Result<(), String> {
        let (buffer, length) = match statement.operands.as_slice() {
            [buffer, length] => (buffer, length),
            _ => return Err("expected a buffer and a length operand".to_string()),
        };
        let buffer = self.addr_payload(buffer, lineno)?;
        let length = self.addr_payload(length, lineno)?;

        let push = opcode(Mnemonic::PUSH, Form::AdrX)?;
        let lad = opcode(Mnemonic::LAD, Form::RAdrX)?;
        let svc = opcode(Mnemonic::SVC, Form::AdrX)?;
        let pop = opcode(Mnemonic::POP, Form::R)?;

        self.emit(pack(push, 0, 1), lineno);
        self.emit(0, lineno);
        self.emit(pack(push, 0, 2), lineno);
        self.emit(0, lineno);
        self.emit(pack(lad, 1, 0), lineno);
        self.image.push(buffer, lineno);
        self.emit(pack(lad, 2, 0), lineno);
        self.image.push(length, lineno);
        self.emit(pack(svc, 0, 0), lineno);
        self.emit(call, lineno);
        self.emit(pack(pop, 2, 0), lineno);
        self.emit(pack(pop, 1, 0), lineno);
        Ok(())
    }

    fn instruction(&mut self, op: &str, statement: &Statement, lineno: u32) -> Result<(), String> {
        let mnemonic =
            Mnemonic::from_str(op).map_err(|_| format!("unknown operation {}", op))?;
        let form = infer_form(mnemonic, &statement.operands)?;
        let code = opcode(mnemonic, form)?;
        let operands = &statement.operands;

        match form {
            Form::Nopr => self.emit(pack(code, 0, 0), lineno),
            Form::R => {
                let register = register_of(&operands[0])?;
                self.emit(pack(code, register, 0), lineno);
            }
            Form::R1R2 => {
                let r1 = register_of(&operands[0])?;
                let r2 = register_of(&operands[1])?;
                self.emit(pack(code, r1, r2), lineno);
            }
            Form::AdrX => {
                let index = match operands.len() {
                    2 => index_of(&operands[1])?,
                    _ => 0,
                };
                let address = self.addr_payload(&operands[0], lineno)?;
                self.emit(pack(code, 0, index), lineno);
                self.image.push(address, lineno);
            }
            Form::RAdrX => {
                if mnemonic == Mnemonic::LD && operands.len() == 2 {
                    let raw = operands[1].raw;
                    if !raw.contains(|c: char| c.is_ascii_alphabetic()) && !raw.contains('=') {
                        self.warnings.push(Warning {
                            lineno,
                            message: format!(
                                "operand {} has no label or literal; did you mean LAD?",
                                raw
                            ),
                        });
                    }
                }
                let register = register_of(&operands[0])?;
                let index = match operands.len() {
                    3 => index_of(&operands[2])?,
                    _ => 0,
                };
                let address = self.addr_payload(&operands[1], lineno)?;
                self.emit(pack(code, register, index), lineno);
                self.image.push(address, lineno);
            }
        }
        Ok(())
    }

    fn addr_payload(&mut self, operand: &Operand, lineno: u32) -> Result<Payload, String> {
        match &operand.kind {
            OperandKind::Number(value) => Ok(Payload::Resolved(*value as u16)),
            OperandKind::Symbol(name) => Ok(Payload::Pending((*name).to_string())),
            OperandKind::Literal(spelling) => {
                if !self.literals.iter().any(|(known, _)| known == spelling) {
                    self.literals.push(((*spelling).to_string(), lineno));
                }
                Ok(Payload::Pending((*spelling).to_string()))
            }
            _ => Err(format!("address expected, found {}", operand.raw)),
        }
    }

    fn emit(&mut self, word: u16, lineno: u32) {
        self.image.push(Payload::Resolved(word), lineno);
    }
}

impl Default for Assembler {
    fn default() -> Assembler {
        Assembler::new()
    }
}
