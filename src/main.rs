mod cli_util;
mod config;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use brainfucked::trace::{TABLE_HEADER, TABLE_RULE};
use brainfucked::{TapeMachine, Utf8Input, Utf8Output};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli_util::print_machine_error;
use crate::config::{ColorMode, Settings};

const LOG_ENV: &str = "BRAINFUCKED_LOG";

/// Run a Brainfuck program from a file or from the command line.
///
/// With neither --file nor --instructions, nothing is run.
#[derive(Parser, Debug)]
#[command(name = "brainfucked", version)]
struct Cli {
    /// Path to a Brainfuck file (takes precedence over --instructions)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<String>,

    /// String of instructions to interpret
    #[arg(short = 'i', long = "instructions", value_name = "CODE", allow_hyphen_values = true)]
    instructions: Option<String>,

    /// Print a step-by-step table of operations to stderr while executing
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Colour error reports (fallback BRAINFUCKED_COLOR; default auto)
    #[arg(long = "color", value_name = "WHEN", value_enum)]
    color: Option<ColorMode>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(program: &str, cli: Cli) -> i32 {
    let settings = Settings::load(cli.color);

    // Empty values count as not given
    let code: Vec<u8> = if let Some(path) = cli.file.filter(|s| !s.is_empty()).map(PathBuf::from) {
        match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("{program}: failed to read {}: {e}", path.display());
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else if let Some(instructions) = cli.instructions.filter(|s| !s.is_empty()) {
        instructions.into_bytes()
    } else {
        tracing::debug!("no program given; nothing to do");
        return 0;
    };

    let mut bf = match TapeMachine::new(code) {
        Ok(bf) => bf,
        Err(err) => {
            print_machine_error(program, &[], &err, &settings);
            return 1;
        }
    };

    // Unlocked handles so the ctrl+c handler can still flush them
    let mut input = Utf8Input::new(io::stdin());
    let mut output = Utf8Output::new(io::stdout());

    let result = if cli.debug {
        eprintln!("{TABLE_HEADER}");
        eprintln!("{TABLE_RULE}");
        bf.run_traced(&mut input, &mut output, |step| eprintln!("{}", step.table_row()))
    } else {
        bf.run(&mut input, &mut output)
    };
    let _ = io::stdout().flush();

    if let Err(err) = result {
        print_machine_error(program, bf.program(), &err, &settings);
        return 1;
    }

    0
}

fn main() {
    // Program name is used to prefix error reports
    let program = std::env::args().next().unwrap_or_else(|| String::from("brainfucked"));

    let cli = Cli::parse();
    init_logging();

    // Install SIGINT (ctrl+c) handler to flush partial program output and exit(0)
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        tracing::warn!("failed to set ctrl+c handler: {e}");
    }

    let code = run(&program, cli);
    std::process::exit(code);
}
