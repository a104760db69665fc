//! podseq - sequential containers for Kubernetes workloads
//!
//! Rewrites Pod, Job and CronJob manifests so their containers run one
//! after another, and reports the active step of a converted pod.
//!
//! ## Usage
//!
//! ```sh
//! podseq convert -f workload.yaml | kubectl apply -f -
//! kubectl get pod mypod -o yaml | podseq status -f -
//! podseq version
//! ```
//!
//! Logs go to stderr; set `PODSEQ_LOG=debug` for more detail.

use clap::{Parser, Subcommand};
use podseq::{Sequencer, SequencerConfig, document};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Constants
// =============================================================================

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PODSEQ_LOG";

/// Input path meaning "read standard input".
const STDIN_PATH: &str = "-";

// =============================================================================
// CLI Parsing
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "podseq", about = "Run the containers of Kubernetes workloads sequentially")]
struct Cli {
    /// Sequencer config file (YAML) overriding the built-in wire contract.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert every Pod, Job and CronJob in a manifest stream.
    Convert {
        /// Path to YAML file or - (stdin).
        #[arg(short = 'f', long = "filename")]
        file: String,
    },
    /// Print the active step of a converted pod.
    Status {
        /// Path to the pod's YAML (with status) or - (stdin).
        #[arg(short = 'f', long = "filename")]
        file: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show version info.
    Version,
}

// =============================================================================
// Input
// =============================================================================

fn read_input(file: &str) -> Result<String, String> {
    if file == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("cannot read stdin: {}", e))?;
        return Ok(content);
    }

    std::fs::read_to_string(file).map_err(|e| format!("cannot open file {}: {}", file, e))
}

fn load_sequencer(config: Option<PathBuf>) -> Result<Sequencer, String> {
    let config = match config {
        Some(path) => SequencerConfig::load(&path)
            .map_err(|e| format!("cannot load config {}: {}", path.display(), e))?,
        None => SequencerConfig::default(),
    };
    Ok(Sequencer::new(config))
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_convert(sequencer: &Sequencer, file: &str) -> Result<(), String> {
    let input = read_input(file)?;
    let output = document::convert_documents(&input, sequencer)
        .map_err(|e| format!("cannot convert: {}", e))?;
    print!("{}", output);
    Ok(())
}

fn cmd_status(sequencer: &Sequencer, file: &str, json: bool) -> Result<(), String> {
    let input = read_input(file)?;
    let pod = document::read_pod(&input).map_err(|e| e.to_string())?;

    let state = match sequencer.active_step(&pod) {
        Ok(state) => state,
        Err(e) if e.is_terminal() => {
            tracing::info!(pod = ?pod.metadata.name, "pod reached a terminal phase");
            return Err(e.to_string());
        }
        Err(e) => return Err(e.to_string()),
    };

    if json {
        let value = serde_json::json!({
            "pod": pod.metadata.name,
            "running": state.running(),
            "finished": state.running().is_none(),
        });
        let rendered = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
        println!("{}", rendered);
    } else {
        println!("{}", state);
    }
    Ok(())
}

fn cmd_version(sequencer: &Sequencer) {
    println!("podseq version {}", env!("CARGO_PKG_VERSION"));
    println!("entrypoint: {}", sequencer.config().entrypoint_image);
}

// =============================================================================
// Main
// =============================================================================

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = load_sequencer(cli.config).and_then(|sequencer| match cli.command {
        Command::Convert { file } => cmd_convert(&sequencer, &file),
        Command::Status { file, json } => cmd_status(&sequencer, &file, json),
        Command::Version => {
            cmd_version(&sequencer);
            Ok(())
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
