//! Debugger core for the COMET II emulator: object loading, breakpoints and
//! the execution operations the interactive shell dispatches to.

pub mod breakpoints;
pub mod command;
pub mod display;


use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use comet2::{disasm, Machine, Registers, ReverseLabels, StepResult, Trap};
use cometfile::ObjectFile;

use crate::breakpoints::Breakpoints;

#[derive(Debug)]
pub enum Error {
    Object(cometfile::Error),
    /// The image does not fit in the 65536-word memory.
    TooLarge(usize),
    /// `run` without a loaded file.
    NoFile,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Object(err) => write!(f, "{}", err),
            Error::TooLarge(words) => write!(f, "object holds {} words, more than memory", words),
            Error::NoFile => f.write_str("no object file loaded (use file <path>)"),
        }
    }
}

impl std::error::Error for Error {}

impl From<cometfile::Error> for Error {
    fn from(err: cometfile::Error) -> Error {
        Error::Object(err)
    }
}

/// Why an execution operation returned to the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The step count was spent and the program is still running.
    Running,
    Breakpoint { slot: usize, addr: u16 },
    Suspended(Trap),
    /// `RET` on the empty stack.
    Terminated,
    Interrupted,
}

/// Owns the machine and everything a debugging session keeps across loads.
/// Breakpoints deliberately survive `run` and `file`.
pub struct Debugger {
    machine: Machine,
    pub breakpoints: Breakpoints,
    path: Option<PathBuf>,
    labels: Vec<(String, u16)>,
    reverse_labels: ReverseLabels,
    last_shown: Option<Registers>,
    trace: bool,
}

impl Debugger {
    pub fn new(trace: bool) -> Debugger {
        Debugger {
            machine: Machine::new(),
            breakpoints: Breakpoints::new(),
            path: None,
            labels: Vec::new(),
            reverse_labels: ReverseLabels::new(),
            last_shown: None,
            trace,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn labels(&self) -> &[(String, u16)] {
        &self.labels
    }

    pub fn reverse_labels(&self) -> &ReverseLabels {
        &self.reverse_labels
    }

    /// Loads an object into a fresh machine. Memory is zeroed first, so
    /// nothing of the previous program survives a reload.
    pub fn load_object(&mut self, object: &ObjectFile) -> Result<(), Error> {
        let words = object.words();
        if words.len() > comet2::constants::MEMORY_WORDS {
            return Err(Error::TooLarge(words.len()));
        }
        self.machine.load(&words, object.start);
        self.labels.clear();
        self.reverse_labels.clear();
        for label in &object.labels {
            self.labels.push((label.name.clone(), label.addr));
            // First definition wins for disassembly annotation.
            self.reverse_labels
                .entry(label.addr)
                .or_insert_with(|| label.name.clone());
        }
        self.last_shown = None;
        Ok(())
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let object = cometfile::read_file(&path)?;
        self.load_object(&object)?;
        self.path = Some(path.as_ref().to_owned());
        Ok(())
    }

    /// The `run` operation: reload the current file, then continue.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        interrupted: &AtomicBool,
    ) -> Result<Outcome, Error> {
        let path = self.path.clone().ok_or(Error::NoFile)?;
        self.load_file(path)?;
        Ok(self.cont(input, output, interrupted))
    }

    /// Executes until a breakpoint, a trap, termination or a keyboard
    /// interrupt. The interrupt flag is observed between instructions only.
    pub fn cont<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        interrupted: &AtomicBool,
    ) -> Outcome {
        loop {
            if interrupted.swap(false, Ordering::SeqCst) {
                return Outcome::Interrupted;
            }
            match self.step_once(input, output) {
                StepResult::Continue => {
                    if let Some(slot) = self.breakpoints.hit(self.machine.pr()) {
                        return Outcome::Breakpoint {
                            slot,
                            addr: self.machine.pr(),
                        };
                    }
                }
                StepResult::Halted => return Outcome::Terminated,
                StepResult::Trap(trap) => return Outcome::Suspended(trap),
            }
        }
    }

    /// Executes up to `count` single instructions.
    pub fn step_n<R: BufRead, W: Write>(
        &mut self,
        count: usize,
        input: &mut R,
        output: &mut W,
    ) -> Outcome {
        for _ in 0..count {
            match self.step_once(input, output) {
                StepResult::Continue => {}
                StepResult::Halted => return Outcome::Terminated,
                StepResult::Trap(trap) => return Outcome::Suspended(trap),
            }
        }
        Outcome::Running
    }

    fn step_once<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> StepResult {
        if self.trace {
            let (text, _) =
                disasm::disassemble(self.machine.memory(), self.machine.pr(), Some(&self.reverse_labels));
            eprintln!("trace: #{:04x}  {}", self.machine.pr(), text);
        }
        self.machine.step(input, output)
    }

    /// Register snapshot for `print`, paired with the one shown before so
    /// the display can highlight changes.
    pub fn snapshot(&mut self) -> (Registers, Option<Registers>) {
        let current = self.machine.registers();
        let previous = self.last_shown.replace(current);
        (current, previous)
    }
}
