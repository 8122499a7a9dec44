use std::borrow::Cow;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run,
    Continue,
    Step(usize),
    Break(u16),
    Delete(Option<usize>),
    Info,
    Print,
    Dump(Option<u16>),
    Stack,
    File(String),
    Jump(u16),
    Memory(u16, u16),
    Disasm(Option<u16>),
    Label,
    Help,
    Quit,
    /// Empty input; the shell substitutes the last command.
    Repeat,
}

/// Addresses and values are decimal or `#hex`, like in the assembler.
fn parse_word(text: &str) -> Result<u16, Cow<'static, str>> {
    let value = match text.strip_prefix('#') {
        Some(hex) => u32::from_str_radix(hex, 16).map_err(|err| err.to_string())?,
        None => text.parse::<u32>().map_err(|err| err.to_string())?,
    };
    if value > 0xFFFF {
        return Err(format!("{} does not fit in a word", text).into());
    }
    Ok(value as u16)
}

fn required_word<'i, I>(iter: &mut I, what: &'static str) -> Result<u16, Cow<'static, str>>
where
    I: Iterator<Item = &'i str>,
{
    match iter.next() {
        Some(text) => parse_word(text),
        None => Err(format!("missing {}", what).into()),
    }
}

fn optional_word<'i, I>(iter: &mut I) -> Result<Option<u16>, Cow<'static, str>>
where
    I: Iterator<Item = &'i str>,
{
    match iter.next() {
        Some(text) => parse_word(text).map(Some),
        None => Ok(None),
    }
}

impl FromStr for Command {
    type Err = Cow<'static, str>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut iter = s.split_whitespace();
        match iter.next() {
            None => Ok(Command::Repeat),
            Some("run") | Some("r") => Ok(Command::Run),
            Some("continue") | Some("c") => Ok(Command::Continue),
            Some("step") | Some("s") => {
                let count = match iter.next() {
                    Some(text) => text.parse::<usize>().map_err(|err| err.to_string())?,
                    None => 1,
                };
                Ok(Command::Step(count))
            }
            Some("break") | Some("b") => Ok(Command::Break(required_word(
                &mut iter,
                "breakpoint address",
            )?)),
            Some("del") | Some("d") => {
                let slot = match iter.next() {
                    Some(text) => Some(text.parse::<usize>().map_err(|err| err.to_string())?),
                    None => None,
                };
                Ok(Command::Delete(slot))
            }
            Some("info") | Some("i") => Ok(Command::Info),
            Some("print") | Some("p") => Ok(Command::Print),
            Some("dump") | Some("du") => Ok(Command::Dump(optional_word(&mut iter)?)),
            Some("stack") | Some("st") => Ok(Command::Stack),
            Some("file") | Some("f") => {
                let path = iter.next().ok_or("missing file name")?;
                Ok(Command::File(path.to_string()))
            }
            Some("jump") | Some("j") => Ok(Command::Jump(required_word(&mut iter, "address")?)),
            Some("memory") | Some("m") => {
                let addr = required_word(&mut iter, "address")?;
                let value = required_word(&mut iter, "value")?;
                Ok(Command::Memory(addr, value))
            }
            Some("disasm") | Some("di") => Ok(Command::Disasm(optional_word(&mut iter)?)),
            Some("label") | Some("l") => Ok(Command::Label),
            Some("help") | Some("h") | Some("?") => Ok(Command::Help),
            Some("quit") | Some("q") | Some("exit") => Ok(Command::Quit),
            Some(command) => Err(format!("unknown command {:?} (try help)", command).into()),
        }
    }
}
