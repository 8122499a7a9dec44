#[macro_use]
extern crate clap;

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Arg;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use comet2_dbg::command::Command;
use comet2_dbg::{display, Debugger, Outcome};

const HISTORY_FILE: &str = ".comet2_history";

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Suppress the startup banner"),
        )
        .arg(
            Arg::with_name("debug")
                .short("d")
                .help("Trace executed instructions to stderr"),
        )
        .arg(
            Arg::with_name("OBJECT")
                .help("Object file to load")
                .index(1),
        )
        .get_matches();

    if !matches.is_present("quiet") {
        println!(
            "COMET II emulator/debugger {} (type help for commands)",
            crate_version!()
        );
    }

    let mut debugger = Debugger::new(matches.is_present("debug"));
    if let Some(path) = matches.value_of("OBJECT") {
        if let Err(err) = debugger.load_file(path) {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
        println!(
            "loaded {} (entry #{:04x}, last word #{:04x})",
            path,
            debugger.machine().start_addr(),
            debugger.machine().end_addr()
        );
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        if let Err(err) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            eprintln!("cannot install the interrupt handler: {}", err);
        }
    }

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("cannot open the terminal: {}", err);
            process::exit(1);
        }
    };
    let _ = editor.load_history(HISTORY_FILE);

    let mut last_command: Option<Command> = None;
    let code = loop {
        match editor.readline("comet2> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                let command = match (line.parse(), last_command.clone()) {
                    (Ok(Command::Repeat), Some(command)) => Ok(command),
                    (Ok(Command::Repeat), None) => Err("no last command".into()),
                    (Ok(command), _) => Ok(command),
                    (Err(err), _) => Err(err),
                };
                match command {
                    Ok(Command::Quit) => break 1,
                    Ok(command) => {
                        if let Some(code) = execute(&mut debugger, &command, &interrupted) {
                            break code;
                        }
                        last_command = Some(command);
                    }
                    Err(err) => println!("{}", err.red()),
                }
            }
            Err(ReadlineError::Interrupted) => println!("^C"),
            Err(ReadlineError::Eof) => break 1,
            Err(err) => {
                eprintln!("input error: {}", err);
                break 1;
            }
        }
    };

    let _ = editor.save_history(HISTORY_FILE);
    process::exit(code);
}

/// Runs one command. A `Some` return ends the session with that exit code.
fn execute(debugger: &mut Debugger, command: &Command, interrupted: &AtomicBool) -> Option<i32> {
    let stdin = std::io::stdin();

    match command {
        Command::Run => {
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            match debugger.run(&mut input, &mut output, interrupted) {
                Ok(outcome) => return report(debugger, outcome),
                Err(err) => println!("{}", err.to_string().red()),
            }
        }
        Command::Continue => {
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            let outcome = debugger.cont(&mut input, &mut output, interrupted);
            return report(debugger, outcome);
        }
        Command::Step(count) => {
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            let outcome = debugger.step_n(*count, &mut input, &mut output);
            return report(debugger, outcome);
        }
        Command::Break(addr) => match debugger.breakpoints.add(*addr) {
            Some(slot) => println!("breakpoint {} at #{:04x}", slot, addr),
            None => println!("the breakpoint table is full"),
        },
        Command::Delete(None) => {
            debugger.breakpoints.clear();
            println!("deleted all breakpoints");
        }
        Command::Delete(Some(slot)) => {
            if debugger.breakpoints.delete(*slot) {
                println!("deleted breakpoint {}", slot);
            } else {
                println!("no breakpoint {}", slot);
            }
        }
        Command::Info => display::breakpoints(&debugger.breakpoints),
        Command::Print => {
            let (current, previous) = debugger.snapshot();
            display::registers(&current, previous.as_ref());
        }
        Command::Dump(addr) => {
            let start = addr.unwrap_or_else(|| debugger.machine().pr());
            display::dump(debugger.machine(), start);
        }
        Command::Stack => display::dump(debugger.machine(), debugger.machine().sp()),
        Command::File(path) => match debugger.load_file(path) {
            Ok(()) => println!(
                "loaded {} (entry #{:04x}, last word #{:04x})",
                path,
                debugger.machine().start_addr(),
                debugger.machine().end_addr()
            ),
            Err(err) => println!("{}: {}", path, err.to_string().red()),
        },
        Command::Jump(addr) => {
            debugger.machine_mut().set_pr(*addr);
            show_position(debugger);
        }
        Command::Memory(addr, value) => debugger.machine_mut().memory_mut().set(*addr, *value),
        Command::Disasm(addr) => {
            let start = addr.unwrap_or_else(|| debugger.machine().pr());
            display::listing(debugger.machine(), start, debugger.reverse_labels());
        }
        Command::Label => display::labels(debugger.labels()),
        Command::Help => display::help(),
        Command::Quit | Command::Repeat => unreachable!(),
    }
    None
}

fn show_position(debugger: &Debugger) {
    let machine = debugger.machine();
    let (text, _) =
        comet2::disassemble(machine.memory(), machine.pr(), Some(debugger.reverse_labels()));
    println!("#{:04x}  {}", machine.pr(), text);
}

fn report(debugger: &Debugger, outcome: Outcome) -> Option<i32> {
    match outcome {
        Outcome::Running => show_position(debugger),
        Outcome::Breakpoint { slot, addr } => {
            println!("breakpoint {} at #{:04x}", slot, addr);
            show_position(debugger);
        }
        Outcome::Suspended(trap) => println!("{}", format!("suspended: {}", trap).red()),
        Outcome::Terminated => {
            println!("Program terminated.");
            return Some(0);
        }
        Outcome::Interrupted => {
            println!("interrupted");
            show_position(debugger);
        }
    }
    None
}
