//! Signature Cards CLI
//!
//! Renders one PNG per CSV row and prints a JSON run report to stdout.
//! Exit codes: 0 ok (skips included), 1 fatal batch error, 2 some rows failed to write.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use sigcards_core::{
    init_logging, BatchRunner, FontSet, LoggingConfig, RenderConfig, SignatureRenderer,
    DEFAULT_INPUT_FILE,
};

#[derive(Parser)]
#[command(name = "sigcards-cli")]
#[command(about = "Signature Cards - render logo + contact cards from a CSV table")]
struct Cli {
    /// CSV table with Name, Position, Email Address, Phone Number, Mailing Address, Logo Filename
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// JSON file overriding render constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the logo files
    #[arg(short, long)]
    logos: Option<PathBuf>,

    /// Directory receiving the rendered cards
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Font file (defaults to `<family>.ttf`)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    error!("{}", message);
    let output = serde_json::json!({
        "success": false,
        "error": message.to_string(),
    });
    println!("{}", output);
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&LoggingConfig {
        level: cli.log_level.clone(),
        json: cli.json_logs,
    });

    let mut config = match &cli.config {
        Some(path) => match RenderConfig::from_json_file(path) {
            Ok(c) => c,
            Err(e) => return fail(e),
        },
        None => RenderConfig::default(),
    };
    if let Some(dir) = cli.logos {
        config.logo_dir = dir;
    }
    if let Some(dir) = cli.output {
        config.output_dir = dir;
    }
    if let Some(font) = cli.font {
        config.font_path = Some(font);
    }
    if let Err(e) = config.validate() {
        return fail(e);
    }

    let fonts = FontSet::load(&config);
    let runner = BatchRunner::new(SignatureRenderer::new(config, fonts));

    match runner.run_file(&cli.input) {
        Ok(report) => {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => return fail(e),
            }
            if report.has_failures() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => fail(e),
    }
}
