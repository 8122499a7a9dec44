//! Terminal rendering for the shell: registers with change highlighting,
//! memory dumps with an ASCII gutter, disassembly listings.

use colored::Colorize;

use comet2::{disasm, Machine, Registers, ReverseLabels};

use crate::breakpoints::Breakpoints;

fn word(value: u16, changed: bool) -> String {
    let text = format!("#{:04x}", value);
    if changed {
        text.yellow().bold().to_string()
    } else {
        text
    }
}

fn flag(value: bool, changed: bool) -> String {
    let text = if value { "1" } else { "0" };
    if changed {
        text.yellow().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Register dump; values that differ from `previous` are highlighted.
pub fn registers(current: &Registers, previous: Option<&Registers>) {
    let diff = |get: fn(&Registers) -> u16| -> bool {
        previous.map(|p| get(p) != get(current)).unwrap_or(false)
    };
    println!(
        "PR  {}  SP  {}  OF {}  SF {}  ZF {}",
        word(current.pr, diff(|r| r.pr)),
        word(current.sp, diff(|r| r.sp)),
        flag(current.of, previous.map(|p| p.of != current.of).unwrap_or(false)),
        flag(current.sf, previous.map(|p| p.sf != current.sf).unwrap_or(false)),
        flag(current.zf, previous.map(|p| p.zf != current.zf).unwrap_or(false)),
    );
    for row in 0..2 {
        let line: Vec<String> = (0..4)
            .map(|column| {
                let index = row * 4 + column;
                let changed = previous
                    .map(|p| p.gr[index] != current.gr[index])
                    .unwrap_or(false);
                format!("GR{} {}", index, word(current.gr[index], changed))
            })
            .collect();
        println!("{}", line.join("  "));
    }
}

/// 16 rows of 8 words starting at `start`, with an ASCII gutter built from
/// the low bytes.
pub fn dump(machine: &Machine, start: u16) {
    for row in 0..16u16 {
        let base = start.wrapping_add(row * 8);
        let mut cells = Vec::with_capacity(8);
        let mut gutter = String::with_capacity(8);
        for column in 0..8u16 {
            let value = machine.memory().get(base.wrapping_add(column));
            cells.push(format!("{:04x}", value));
            let byte = (value & 0xFF) as u8;
            gutter.push(if (0x20..0x7F).contains(&byte) {
                byte as char
            } else {
                '.'
            });
        }
        println!(
            "{} {} |{}|",
            format!("#{:04x}:", base).blue(),
            cells.join(" "),
            gutter
        );
    }
}

/// 16 instructions starting at `start`. Addresses that carry a label are
/// annotated on their own line.
pub fn listing(machine: &Machine, start: u16, labels: &ReverseLabels) {
    let mut addr = start;
    for _ in 0..16 {
        if let Some(name) = labels.get(&addr) {
            println!("{}:", name.green());
        }
        let (text, size) = disasm::disassemble(machine.memory(), addr, Some(labels));
        let words: Vec<String> = (0..size)
            .map(|offset| format!("{:04x}", machine.memory().get(addr.wrapping_add(offset))))
            .collect();
        println!(
            "{} {:<10} {}",
            format!("#{:04x}", addr).blue(),
            words.join(" "),
            text
        );
        addr = addr.wrapping_add(size);
    }
}

pub fn breakpoints(breakpoints: &Breakpoints) {
    if breakpoints.is_empty() {
        println!("no breakpoints set");
        return;
    }
    for (slot, addr) in breakpoints.iter() {
        println!("{:>3}: #{:04x}", slot, addr);
    }
}

pub fn labels(labels: &[(String, u16)]) {
    if labels.is_empty() {
        println!("no labels loaded");
        return;
    }
    for (name, addr) in labels {
        println!("#{:04x} {}", addr, name);
    }
}

pub fn help() {
    println!("run (r)            reload the current object and run it");
    println!("continue (c)       resume execution");
    println!("step [n] (s)       execute n instructions (default 1)");
    println!("break a (b)        set a breakpoint at address a");
    println!("del [n] (d)        delete breakpoint n, or all of them");
    println!("info (i)           list breakpoints");
    println!("print (p)          show registers, highlighting changes");
    println!("dump [a] (du)      dump memory around a (default PR)");
    println!("stack (st)         dump memory at SP");
    println!("file path (f)      load an object file");
    println!("jump a (j)         set PR to a");
    println!("memory a v (m)     write v at address a");
    println!("disasm [a] (di)    disassemble 16 instructions (default PR)");
    println!("label (l)          list loaded labels");
    println!("help (h)           this text");
    println!("quit (q)           leave the debugger");
    println!("addresses are decimal or #hex; empty input repeats the last command");
}
