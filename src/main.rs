extern crate clap;
#[macro_use] extern crate log;
#[macro_use] extern crate lazy_static;
extern crate fern;
extern crate chrono;
extern crate regex;
extern crate term_grid;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use assembler::error::{AsmError, ErrorKind};
use assembler::interpreter::{Assembly, Interpreter};
use assembler::lexer::{self, Token};

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Settings taken from the command line.
#[derive(Clone, Debug)]
struct Config {
    input:       Option<String>,
    output_dir:  PathBuf,
    object:      String,
    symbols:     String,
    registers:   String,
    verbosity:   u64,
    print_debug: bool,
}

impl Config {
    fn from_matches(args: &ArgMatches) -> Self {
        Config {
            input:       args.value_of("INPUT").map(str::to_string),
            output_dir:  PathBuf::from(args.value_of("output-dir").unwrap_or(".")),
            object:      args.value_of("object").unwrap_or("object.txt").to_string(),
            symbols:     args.value_of("symbols").unwrap_or("symboltable.txt").to_string(),
            registers:   args.value_of("registers").unwrap_or("registers.txt").to_string(),
            verbosity:   args.occurrences_of("verbose"),
            print_debug: args.is_present("print-debug"),
        }
    }
}

fn main() {
    let config = Config::from_matches(&process_arguments());
    initialize_logging(config.verbosity);

    debug!("Arguments:\n\tVerbosity: {}\n\tPrint Debug: {}\n\tOutput Dir: {}\n\tInfile: {}",
        level_for(config.verbosity).to_string(),
        config.print_debug,
        config.output_dir.display(),
        config.input.as_deref().unwrap_or("None")
    );

    let ifile = match &config.input {
        Some(name) => name.clone(),
        None => prompt_for_input().unwrap_or_else(|err| {
            error!("unable to read the input file name: {}", err);
            String::new()
        }),
    };

    let assembly = Interpreter::new(read_tokens(Path::new(&ifile))).run();

    if config.print_debug {
        print_debug(&assembly);
    }

    let written = write_artifacts(&config, &assembly);

    if assembly.halted.is_some() || !written {
        std::process::exit(1);
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("miniasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use; prompts for one when omitted")
            .required(false)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output-dir")
            .short("o")
            .long("output-dir")
            .takes_value(true)
            .default_value(".")
            .help("directory the result files are written to"))
        .arg(Arg::with_name("object")
            .long("object")
            .takes_value(true)
            .default_value("object.txt")
            .help("name of the encoded instructions file"))
        .arg(Arg::with_name("symbols")
            .long("symbols")
            .takes_value(true)
            .default_value("symboltable.txt")
            .help("name of the symbol table file"))
        .arg(Arg::with_name("registers")
            .long("registers")
            .takes_value(true)
            .default_value("registers.txt")
            .help("name of the final register values file"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the encoded instructions and final state to STDOUT"))
        .get_matches()
}

fn level_for(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_for(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}

fn prompt_for_input() -> io::Result<String> {
    print!("Enter the name of the file containing assembly code: ");
    io::stdout().flush()?;
    let mut name = String::new();
    io::stdin().read_line(&mut name)?;
    Ok(name.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// An unreadable input is reported and treated as an empty program.
fn read_tokens(ipath: &Path) -> Vec<Token> {
    match File::open(ipath) {
        Err(err) => {
            let err = AsmError::new(ErrorKind::InputUnavailable, 0, 0,
                format!("`{}`: {}", ipath.display(), err));
            error!("{}", err);
            Vec::new()
        },
        Ok(file) => lexer::tokenize(Box::new(file)),
    }
}

fn print_debug(assembly: &Assembly) {
    println!("{}", debug_grid(assembly));
    print!("{}", assembly.symbols);
    print!("{}", assembly.registers);
}

/// One row per encoded line, keyed by the index of its mnemonic token.
fn debug_grid(assembly: &Assembly) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for line in assembly.lines.iter() {
        grid.add(Cell::from(format!("0x{:04X}:", line.index)));
        grid.add(Cell::from(format!("{} {}, {}", line.mnemonic, line.operand1, line.operand2)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(line.code.clone()));
    }

    grid.fit_into_columns(4).to_string()
}

/// Writes the three result files. Returns false if any of them failed.
fn write_artifacts(config: &Config, assembly: &Assembly) -> bool {
    if let Err(err) = fs::create_dir_all(&config.output_dir) {
        error!("fatal: unable to create output directory `{}`: {}", config.output_dir.display(), err);
        return false;
    }

    let artifacts = [
        (&config.object, assembly.object_code()),
        (&config.symbols, assembly.symbols.to_string()),
        (&config.registers, assembly.registers.to_string()),
    ];

    let mut written = true;
    for (name, contents) in artifacts.iter() {
        let opath = config.output_dir.join(name);
        match File::create(&opath).and_then(|mut ofile| ofile.write_all(contents.as_bytes())) {
            Err(err) => {
                error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
                written = false;
            },
            Ok(()) => info!("Wrote {}", opath.display()),
        }
    }
    written
}
