//! Command-line interface for kiwi
//! This binary lexes and parses kiwi files and prints the result in one of
//! several formats.
//!
//! Usage:
//!   kiwi process `<path>` [--format `<format>`] [--config `<file>`]  - Process a kiwi file
//!   kiwi list-formats                                            - List all available formats
//!
//! `--verbose` (`-v`) prints log records to stderr. A `kiwi.toml` in the
//! working directory is read when present.

use clap::{Arg, ArgAction, ArgMatches, Command};
use kiwi::kiwi::config::{KiwiConfig, Loader};
use kiwi::kiwi::processor::{available_formats, process_file, ProcessingSpec};
use log::{LevelFilter, Log, Metadata, Record};

/// Writes every enabled record to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Picked up from the working directory when it exists
const LOCAL_CONFIG: &str = "kiwi.toml";

fn main() {
    let matches = Command::new("kiwi")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for lexing and parsing kiwi files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Print log records to stderr (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("process")
                .about("Process a kiwi file")
                .arg(
                    Arg::new("path")
                        .help("Path to the kiwi file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'token-simple', 'ast-treeviz')")
                        .default_value("ast-treeviz"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("TOML file layered over the defaults and ./kiwi.toml"),
                )
                .arg(
                    Arg::new("no-spans")
                        .long("no-spans")
                        .help("Leave spans out of treeviz output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("process", process_matches)) => handle_process_command(process_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Handle the process command
fn handle_process_command(matches: &ArgMatches) {
    let Some(path) = matches.get_one::<String>("path") else {
        fail("missing path");
    };
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("ast-treeviz");

    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| fail(&e.to_string()));
    let config = load_config(matches).unwrap_or_else(|e| fail(&format!("Config error: {}", e)));

    match process_file(path, &spec, &config) {
        Ok(output) => print!("{}", output),
        Err(e) => fail(&e.to_string()),
    }
}

/// Defaults, then `./kiwi.toml` if present, then `--config`, then flags
fn load_config(matches: &ArgMatches) -> Result<KiwiConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("no-spans") {
        loader = loader.set_override("inspect.show_spans", false)?;
    }
    loader.build()
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
