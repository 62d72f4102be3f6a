use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vehicle_shell::config::{DATA_FILE_ENV, DEFAULT_MAX_SCRIPT_DEPTH};
use vehicle_shell::{CommandInterpreter, DataFile, Flow, ReaderSource, ShellConfig};

/// Exit status when the data file cannot be loaded.
const LOAD_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "vehicle_shell")]
#[command(about = "Interactive shell over a persisted vehicle collection")]
struct Cli {
    /// Data file to load at startup and write on `save`
    #[arg(short, long, env = DATA_FILE_ENV)]
    file: Option<PathBuf>,

    /// Maximum nesting depth of execute_script
    #[arg(long, default_value_t = DEFAULT_MAX_SCRIPT_DEPTH)]
    max_script_depth: usize,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Fatal: {:#}", err);
            ExitCode::from(LOAD_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut console = ReaderSource::console(io::stdin().lock());
    let mut stdout = io::stdout();

    let config = ShellConfig::resolve(cli.file, &mut console, &mut stdout)
        .context("failed to resolve the data file path")?
        .max_script_depth(cli.max_script_depth);

    let collection = DataFile::new(&config.data_file)
        .load()
        .with_context(|| format!("failed to load '{}'", config.data_file.display()))?;

    let mut interpreter = CommandInterpreter::new(&config, collection, stdout);
    match interpreter.run(&mut console) {
        Ok(Flow::Exit) => Ok(ExitCode::SUCCESS),
        Ok(Flow::Continue) => {
            tracing::info!("end of input, leaving without saving");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("Fatal: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vehicle_shell=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
