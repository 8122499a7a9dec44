#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use clap::Arg;

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Casl(PathBuf, casl2::Error),
    Io(std::io::Error, IOErrorContext, PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => write!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Casl(path, err) => write!(f, "{}: {}", path.display(), err),
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("listing")
                .short("a")
                .help("Print the assembly listing to stdout"),
        )
        .arg(
            Arg::with_name("show_version")
                .short("v")
                .help("Print version information and exit"),
        )
        .arg(
            Arg::with_name("debug")
                .short("d")
                .help("Print assembly trace information to stderr"),
        )
        .arg(
            Arg::with_name("FILE")
                .help("CASL source files to assemble")
                .multiple(true),
        )
        .get_matches();

    if matches.is_present("show_version") {
        println!("casl2 {}", crate_version!());
        return;
    }

    let files = match matches.values_of("FILE") {
        Some(files) => files,
        None => {
            eprintln!("casl2: no input files");
            process::exit(1);
        }
    };

    let listing = matches.is_present("listing");
    let debug = matches.is_present("debug");

    for file in files {
        if let Err(err) = assemble_file(file, listing, debug) {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

fn assemble_file(input: &str, listing: bool, debug: bool) -> Result<(), Error> {
    let input_path = Path::new(input);

    let file = File::open(input_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;
    let mut source = String::new();
    BufReader::new(file)
        .read_to_string(&mut source)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;

    let (object, warnings) = casl2::assemble_traced(&source, input, debug)
        .map_err(|err| Error::Casl(input_path.to_owned(), err))?;

    for warning in &warnings {
        eprintln!("{}: warning: {}", input, warning);
    }

    if debug {
        eprintln!(
            "{}: {} words, entry #{:04x}, {} labels",
            input,
            object.words().len(),
            object.start,
            object.labels.len()
        );
    }

    let output_path = input_path.with_extension("obj");
    cometfile::write_file(&output_path, &object)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, output_path))?;

    if listing {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        cometfile::write(&mut handle, &object)
            .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, input_path.to_owned()))?;
    }

    Ok(())
}
