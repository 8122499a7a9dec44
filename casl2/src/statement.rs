//! Turns one parsed source line into a `Statement` and infers the addressing
//! form from the operand count and shapes.

use matches::debug_assert_matches;
use pest::iterators::Pair;
use pest::Parser;

use comet2::{forms_of, Form, Mnemonic, RegisterId};
use util::EnumFromStr;

use crate::parser::{CaslParser, Rule};
use crate::{new_parser_error, ParseError};

#[derive(Clone, Debug, PartialEq)]
pub enum OperandKind<'i> {
    Register(RegisterId),
    Number(i32),
    /// A `=`-prefixed literal, kept under its exact spelling.
    Literal(&'i str),
    Symbol(&'i str),
    /// Quoted string with the `''` escapes already collapsed.
    Str(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Operand<'i> {
    pub raw: &'i str,
    pub kind: OperandKind<'i>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Statement<'i> {
    pub label: Option<&'i str>,
    pub op: Option<&'i str>,
    pub operands: Vec<Operand<'i>>,
}

/// Parses a numeric spelling (decimal or `#hex`) into the value range a
/// single word can express.
pub fn number_value(text: &str) -> Option<i32> {
    let value = match text.strip_prefix('#') {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => text.parse::<i64>().ok()?,
    };
    if (-0x8000..=0xFFFF).contains(&value) {
        Some(value as i32)
    } else {
        None
    }
}

fn process_number(pair: Pair<Rule>) -> Result<i32, ParseError> {
    debug_assert_matches!(pair.as_rule(), Rule::number);
    let span = pair.as_span();
    number_value(pair.as_str())
        .ok_or_else(|| new_parser_error(span, "value outside the 16-bit range".to_string()))
}

fn process_operand(pair: Pair<Rule>) -> Result<Operand, ParseError> {
    debug_assert_matches!(pair.as_rule(), Rule::operand);
    let raw = pair.as_str();
    let inner = pair.into_inner().next().unwrap();
    let kind = match inner.as_rule() {
        Rule::register => {
            let span = inner.as_span();
            let register = RegisterId::from_str(inner.as_str())
                .map_err(|err| new_parser_error(span, format!("{}", err)))?;
            OperandKind::Register(register)
        }
        Rule::number => OperandKind::Number(process_number(inner)?),
        Rule::literal => OperandKind::Literal(inner.as_str()),
        Rule::symbol => OperandKind::Symbol(inner.as_str()),
        Rule::string => {
            let content = inner.into_inner().next().unwrap();
            OperandKind::Str(content.as_str().replace("''", "'"))
        }
        _ => unreachable!(),
    };
    Ok(Operand { raw, kind })
}

/// Parses one physical line. Comments and blank lines come back as an empty
/// statement.
pub fn parse_line(text: &str) -> Result<Statement, ParseError> {
    let pair = CaslParser::parse(Rule::line, text)?.next().unwrap();
    let mut statement = Statement::default();

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::label => statement.label = Some(item.as_str()),
            Rule::operation => {
                let mut parts = item.into_inner();
                statement.op = Some(parts.next().unwrap().as_str());
                if let Some(operands) = parts.next() {
                    for operand in operands.into_inner() {
                        statement.operands.push(process_operand(operand)?);
                    }
                }
            }
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }

    Ok(statement)
}

/// Candidate forms by operand count and shape, intersected with the forms
/// the opcode table lists for the mnemonic. Anything but exactly one
/// survivor is a syntax error.
pub fn infer_form(mnemonic: Mnemonic, operands: &[Operand]) -> Result<Form, String> {
    let candidates: &[Form] = match operands.len() {
        0 => &[Form::Nopr],
        1 => &[Form::R, Form::AdrX],
        2 => match operands[1].kind {
            OperandKind::Register(_) => &[Form::R1R2, Form::AdrX],
            _ => &[Form::RAdrX],
        },
        3 => &[Form::RAdrX],
        _ => return Err(format!("too many operands for {}", mnemonic)),
    };

    let mut survivors = forms_of(mnemonic).filter(|form| candidates.contains(form));
    match (survivors.next(), survivors.next()) {
        (Some(form), None) => Ok(form),
        (None, _) => Err(format!("operands do not fit any form of {}", mnemonic)),
        (Some(_), Some(_)) => Err(format!("ambiguous operands for {}", mnemonic)),
    }
}
