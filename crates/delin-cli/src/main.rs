mod transport;

use anyhow::Result;
use clap::{Parser, Subcommand};
use delin_lib::{
    analyze_request, io::records::read_payload, DelineationError, ErrorClass, PipelineConfig,
};
use env_logger::Env;
use log::{error, info};
use serde::Serialize;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "delin",
    version,
    about = "Premature beat counts and heart-rate extrema from P/QRS delineation files"
)]
struct Cli {
    /// Logging verbosity (e.g., debug, info, warn)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Optional TOML file with pipeline settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one delineation CSV read from --input or stdin
    Analyze {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Recording start, "YYYY-MM-DD HH:MM:SS" (defaults to local now)
        #[arg(long)]
        start_datetime: Option<String>,
    },
    /// Answer line-delimited JSON requests on stdin/stdout
    Serve,
}

/// Error output printed on stdout when the pipeline rejects a request.
#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: String,
    status: u16,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let cfg = match cli.config.as_deref() {
        Some(path) => PipelineConfig::from_toml_path(path)?,
        None => PipelineConfig::default(),
    };
    match cli.command {
        Commands::Analyze {
            input,
            start_datetime,
        } => cmd_analyze(input.as_deref(), start_datetime.as_deref(), &cfg)?,
        Commands::Serve => transport::run_stdio(&cfg)?,
    }
    Ok(())
}

/// File contents, or stdin when no path is given. Empty stdin counts as no payload.
fn read_input(input: Option<&Path>) -> Result<Option<Vec<u8>>> {
    match input {
        Some(path) => Ok(Some(read_payload(path)?)),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok((!buf.is_empty()).then_some(buf))
        }
    }
}

fn cmd_analyze(
    input: Option<&Path>,
    start_datetime: Option<&str>,
    cfg: &PipelineConfig,
) -> Result<()> {
    let payload = read_input(input)?;
    let now = chrono::Local::now().naive_local();
    match analyze_request(payload.as_deref(), start_datetime, now, cfg) {
        Ok(result) => {
            info!("analysis finished");
            println!("{}", serde_json::to_string(&result.report())?);
            Ok(())
        }
        Err(err) => {
            error!("analysis failed: {}", err);
            println!("{}", serde_json::to_string(&error_output(&err))?);
            std::process::exit(exit_code(&err));
        }
    }
}

fn error_output(err: &DelineationError) -> ErrorOutput {
    ErrorOutput {
        error: err.body().error,
        status: err.status_code(),
    }
}

fn exit_code(err: &DelineationError) -> i32 {
    match err.class() {
        ErrorClass::Client => 1,
        ErrorClass::Server => 2,
    }
}
