//! The textual object format produced by the assembler and consumed by the
//! emulator:
//!
//! ```text
//! COMET <start_hex>
//! CASL LISTING <input_path>
//!   <lineno> <addr> <word>\t<original source line>
//!   ...
//!
//! DEFINED LABELS
//!                <file>:<lineno>\t<addr> <label>
//! ```
//!
//! The listing repeats the address column only for the first word of a
//! source line; lines that generate no words keep both columns blank. The
//! reader is lenient: it inspects the header, the word rows and the label
//! section, and skips anything else.

use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The first line did not carry the `COMET` magic.
    MissingHeader,
    /// The start address was not a 16-bit hex value.
    BadHeader(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{}", err),
            Error::MissingHeader => f.write_str("not a COMET object file (missing header)"),
            Error::BadHeader(start) => write!(f, "bad start address \"{}\" in header", start),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

/// One source line with the words it generated. `addr` is the address of the
/// first word (the emit cursor position for lines that generated none).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub lineno: u32,
    pub addr: u16,
    pub words: Vec<u16>,
    pub source: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelDef {
    pub file: String,
    pub lineno: u32,
    pub addr: u16,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectFile {
    pub start: u16,
    pub source_path: String,
    pub rows: Vec<Row>,
    pub labels: Vec<LabelDef>,
}

impl ObjectFile {
    /// The program image in emission order, starting at address zero.
    pub fn words(&self) -> Vec<u16> {
        self.rows.iter().flat_map(|row| row.words.clone()).collect()
    }
}

pub fn write<W: Write>(writer: &mut W, object: &ObjectFile) -> std::io::Result<()> {
    writeln!(writer, "COMET {:04x}", object.start)?;
    writeln!(writer, "CASL LISTING {}", object.source_path)?;
    for row in &object.rows {
        match row.words.split_first() {
            None => writeln!(writer, "{:>4}{:10}\t{}", row.lineno, "", row.source)?,
            Some((first, rest)) => {
                writeln!(
                    writer,
                    "{:>4} {:04x} {:04x}\t{}",
                    row.lineno, row.addr, first, row.source
                )?;
                for word in rest {
                    writeln!(writer, "{:>4} {:4} {:04x}", row.lineno, "", word)?;
                }
            }
        }
    }
    writeln!(writer)?;
    writeln!(writer, "DEFINED LABELS")?;
    for label in &object.labels {
        writeln!(
            writer,
            "{:15}{}:{}\t{:04x} {}",
            "", label.file, label.lineno, label.addr, label.name
        )?;
    }
    Ok(())
}

fn parse_hex16(text: &str) -> Option<u16> {
    u32::from_str_radix(text, 16)
        .ok()
        .filter(|value| *value <= 0xFFFF)
        .map(|value| value as u16)
}

fn parse_row(line: &str, cursor: u16, rows: &mut Vec<Row>) {
    let mut parts = line.splitn(2, '\t');
    let head = parts.next().unwrap_or("");
    let source = parts.next();
    let fields: Vec<&str> = head.split_whitespace().collect();

    match fields.as_slice() {
        [lineno] => {
            // Listing-only line: no code was generated for it.
            if let (Ok(lineno), Some(source)) = (lineno.parse(), source) {
                rows.push(Row {
                    lineno,
                    addr: cursor,
                    words: Vec::new(),
                    source: source.to_string(),
                });
            }
        }
        [lineno, word] => {
            // Continuation word of the previous source line.
            if let (Ok(_), Some(word)) = (lineno.parse::<u32>(), parse_hex16(word)) {
                if let Some(last) = rows.last_mut() {
                    last.words.push(word);
                }
            }
        }
        [lineno, addr, word] => {
            if let (Ok(lineno), Some(addr), Some(word)) =
                (lineno.parse(), parse_hex16(addr), parse_hex16(word))
            {
                rows.push(Row {
                    lineno,
                    addr,
                    words: vec![word],
                    source: source.unwrap_or("").to_string(),
                });
            }
        }
        _ => {}
    }
}

fn parse_label(line: &str, labels: &mut Vec<LabelDef>) {
    let mut parts = line.trim_start().splitn(2, '\t');
    let location = parts.next().unwrap_or("");
    let rest = match parts.next() {
        Some(rest) => rest,
        None => return,
    };

    let mut location = location.rsplitn(2, ':');
    let lineno = location.next().and_then(|text| text.parse().ok());
    let file = location.next();

    let mut rest = rest.split_whitespace();
    let addr = rest.next().and_then(parse_hex16);
    let name = rest.next();

    if let (Some(lineno), Some(file), Some(addr), Some(name)) = (lineno, file, addr, name) {
        labels.push(LabelDef {
            file: file.to_string(),
            lineno,
            addr,
            name: name.to_string(),
        });
    }
}

pub fn read<R: Read>(reader: &mut R) -> Result<ObjectFile, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut lines = text.lines();

    let header = lines.next().ok_or(Error::MissingHeader)?;
    let start_text = match header.strip_prefix("COMET") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => return Err(Error::MissingHeader),
    };
    let start = parse_hex16(start_text).ok_or_else(|| Error::BadHeader(start_text.to_string()))?;

    let mut source_path = String::new();
    let mut rows: Vec<Row> = Vec::new();
    let mut labels = Vec::new();
    let mut in_labels = false;

    for line in lines {
        if line == "DEFINED LABELS" {
            in_labels = true;
            continue;
        }
        if in_labels {
            parse_label(line, &mut labels);
        } else if let Some(path) = line.strip_prefix("CASL LISTING ") {
            source_path = path.to_string();
        } else if !line.trim().is_empty() {
            let cursor = rows
                .iter()
                .map(|row| row.words.len())
                .sum::<usize>() as u16;
            parse_row(line, cursor, &mut rows);
        }
    }

    Ok(ObjectFile {
        start,
        source_path,
        rows,
        labels,
    })
}

pub trait ReadObjExt: Read + Sized {
    fn read_obj(&mut self) -> Result<ObjectFile, Error> {
        read(self)
    }
}

impl<R: Read + Sized> ReadObjExt for R {}

pub trait WriteObjExt: Write + Sized {
    fn write_obj(&mut self, object: &ObjectFile) -> std::io::Result<()> {
        write(self, object)
    }
}

impl<W: Write + Sized> WriteObjExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<ObjectFile, Error> {
    BufReader::new(File::open(path)?).read_obj()
}

pub fn write_file<P: AsRef<Path>>(path: P, object: &ObjectFile) -> std::io::Result<()> {
    BufWriter::new(File::create(path)?).write_obj(object)
}
