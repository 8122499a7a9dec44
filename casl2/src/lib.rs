//! Two-pass assembler for the COMET II architecture.
//!
//! The entry point is [`assemble`], which takes the CASL source text and
//! returns the textual object ([`cometfile::ObjectFile`]) together with any
//! warnings. Line parsing is implemented with [pest]; the crate's syntax
//! errors are `pest::error::Error` values wrapped with the line number, so
//! the pretty caret formatting is available for free.
//!
//! # The CASL assembly language
//!
//! One statement per physical line:
//!
//! ```text
//! LABEL   OP      OPERAND,OPERAND   ; comment
//! ```
//!
//! The label column starts at column zero and is optional; labels match
//! `[A-Z][0-9A-Za-z]{0,7}`. Operands are comma separated. A `;` starts a
//! comment except inside a quoted string, where `''` stands for a quote.
//!
//! ## Operands
//!
//!  Shape | Meaning | Example
//! -------|---------|--------
//! `GRn`  | general register 0-7 | `GR3`
//! decimal / `#hex` | 16-bit value or address | `-5`, `#00FF`
//! label  | deferred address, resolved in pass 2 | `BUF`
//! `=value` | literal: one pooled word holding the value | `=#000A`
//! `'...'`  | `DC` string, one character per word | `'HELLO'`
//!
//! ## Directives and macros
//!
//!  Operation | Effect
//! -----------|-------
//! `START [label]` | opens the program; the operand overrides the entry point
//! `END`           | closes the program
//! `DS n`          | reserves `n` zero words
//! `DC v,...`      | emits constants (numbers, strings, label references)
//! `RPUSH`/`RPOP`  | pushes `GR1..GR7` / pops `GR7..GR1`
//! `IN buf,len`    | reads one input line through `SVC 1`
//! `OUT buf,len`   | writes a line through `SVC 2`
//!
//! Machine instructions take the five addressing forms of the architecture;
//! the form is inferred from the operand count and shapes, then checked
//! against the opcode table.
//!
//! [pest]: https://docs.rs/pest/

mod emit;
mod image;
mod labels;
mod parser;
mod statement;


use std::fmt;

use pest::Span;

use cometfile::{LabelDef, ObjectFile, Row};

use crate::emit::Assembler;
use crate::image::Payload;
pub use crate::parser::Rule;

/// Syntax-level error of a single line, straight from pest.
pub type ParseError = pest::error::Error<Rule>;

pub(crate) fn new_parser_error(span: Span, message: String) -> ParseError {
    ParseError::new_from_span(pest::error::ErrorVariant::CustomError { message }, span)
}

#[derive(Debug)]
pub enum Error {
    /// The line did not lex.
    Syntax { lineno: u32, source: ParseError },
    /// The line lexed but cannot be assembled.
    Line {
        lineno: u32,
        line: String,
        message: String,
    },
    /// Problems only visible once the whole source was read.
    Eof { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Syntax { lineno, source } => {
                write!(f, "line {}: syntax error\n{}", lineno, source)
            }
            Error::Line {
                lineno,
                line,
                message,
            } => write!(f, "line {}: {}\n  {}", lineno, message, line),
            Error::Eof { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for Error {}

/// Non-fatal diagnostics; the object is still written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub lineno: u32,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.lineno, self.message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

fn line_text(spans: &[(u32, &str, usize, usize)], lineno: u32) -> String {
    spans
        .iter()
        .find(|(line, ..)| *line == lineno)
        .map(|(_, raw, ..)| (*raw).to_string())
        .unwrap_or_default()
}

/// Renders a pass-1 word for the `-d` trace: resolved words as hex, the
/// rest under the name pass 2 will look up.
fn trace_payload(payload: &Payload) -> String {
    match payload {
        Payload::Resolved(value) => format!("{:04x}", value),
        Payload::Pending(name) => name.clone(),
    }
}

/// Assembles one CASL source. `source_name` ends up in the object's listing
/// header and label section.
pub fn assemble(input: &str, source_name: &str) -> Result<(ObjectFile, Vec<Warning>)> {
    assemble_traced(input, source_name, false)
}

/// Like [`assemble`], but with `trace` set every processed line prints an
/// emit record (lineno, cursor, emitted words) to stderr.
pub fn assemble_traced(
    input: &str,
    source_name: &str,
    trace: bool,
) -> Result<(ObjectFile, Vec<Warning>)> {
    let mut assembler = Assembler::new();
    // Per-line shadow: lineno, raw text and the cursor range it emitted.
    let mut spans: Vec<(u32, &str, usize, usize)> = Vec::new();

    // Pass 1: statements to image words, labels registered at the cursor,
    // address operands left pending.
    for (index, raw) in input.lines().enumerate() {
        let lineno = (index + 1) as u32;
        let statement =
            statement::parse_line(raw).map_err(|source| Error::Syntax { lineno, source })?;
        let from = assembler.image.cursor();
        assembler
            .statement(&statement, lineno)
            .map_err(|message| Error::Line {
                lineno,
                line: raw.to_string(),
                message,
            })?;
        if assembler.image.cursor() > comet2::constants::MEMORY_WORDS {
            return Err(Error::Line {
                lineno,
                line: raw.to_string(),
                message: "program exceeds the address space".to_string(),
            });
        }
        if trace {
            let emitted: Vec<String> = assembler.image.words()[from..]
                .iter()
                .map(|word| trace_payload(&word.payload))
                .collect();
            eprintln!("trace: {:>4} #{:04x} {}", lineno, from, emitted.join(" "));
        }
        spans.push((lineno, raw, from, assembler.image.cursor()));
    }

    assembler
        .finish()
        .map_err(|message| Error::Eof { message })?;

    let literals = assembler
        .allocate_literals()
        .map_err(|(lineno, message)| Error::Line {
            lineno,
            line: line_text(&spans, lineno),
            message,
        })?;
    if trace {
        for (spelling, lineno, addr) in &literals {
            eprintln!("trace: {:>4} #{:04x} {}", lineno, addr, spelling);
        }
    }
    if assembler.image.cursor() > comet2::constants::MEMORY_WORDS {
        return Err(Error::Eof {
            message: "literal pool exceeds the address space".to_string(),
        });
    }

    // Pass 2: every pending word resolves through the label table.
    let mut words = Vec::with_capacity(assembler.image.cursor());
    for word in assembler.image.words() {
        let value = match &word.payload {
            Payload::Resolved(value) => *value,
            Payload::Pending(name) => {
                assembler
                    .labels
                    .lookup(name)
                    .ok_or_else(|| Error::Line {
                        lineno: word.lineno,
                        line: line_text(&spans, word.lineno),
                        message: format!("undefined label {}", name),
                    })?
            }
        };
        words.push(value);
    }

    let start = match assembler.entry() {
        Some(Payload::Resolved(addr)) => *addr,
        Some(Payload::Pending(name)) => {
            assembler.labels.lookup(name).ok_or_else(|| Error::Eof {
                message: format!("undefined entry label {}", name),
            })?
        }
        None => 0,
    };

    let mut rows: Vec<Row> = spans
        .iter()
        .map(|(lineno, raw, from, to)| Row {
            lineno: *lineno,
            addr: *from as u16,
            words: words[*from..*to].to_vec(),
            source: (*raw).to_string(),
        })
        .collect();
    for (spelling, lineno, addr) in &literals {
        rows.push(Row {
            lineno: *lineno,
            addr: *addr,
            words: vec![words[*addr as usize]],
            source: spelling.clone(),
        });
    }

    let labels = assembler
        .labels
        .iter()
        .map(|(name, site)| LabelDef {
            file: source_name.to_string(),
            lineno: site.lineno,
            addr: site.addr,
            name: name.to_string(),
        })
        .collect();

    let object = ObjectFile {
        start,
        source_path: source_name.to_string(),
        rows,
        labels,
    };
    Ok((object, assembler.take_warnings()))
}
