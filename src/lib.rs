#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! fluxgen: typed TypeScript API client generation from OpenAPI documents.
//!
//! The pipeline per configured job:
//! 1. Load: fetch/read the spec, dereference `$ref`s, normalize Swagger 2.0
//! 2. Extract: one immutable operation context per path/method pair
//! 3. Emit: types module (plain or schema-validated), client module,
//!    optional SWR / React Query hook modules
//! 4. Write: fixed-name files under the job's output directory
//!
//! Generated code calls a user-supplied fetch transport; this crate only
//! produces source text.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod config;
pub mod emitters;
pub mod error;
pub mod ir;
pub mod openapi;
pub mod orchestrator;

pub use config::{HookFlavor, JobConfig, TransportContract, TypeStyle};
pub use error::Error;
pub use orchestrator::{run_job, run_jobs, BatchSummary};

#[derive(Parser)]
#[command(
    name = "fluxgen",
    version,
    about = "Generate typed TypeScript API clients from OpenAPI documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client modules from the configured jobs
    Generate(cli::generate::GenerateArgs),
    /// Scaffold a starter config file
    Init(cli::init::InitArgs),
}

/// Parse CLI arguments and run the selected command, returning the
/// process exit code.
pub async fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(generate_args)) => cli::generate::run(generate_args).await,
            Some(Commands::Init(init_args)) => cli::init::run(init_args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn is_plain_level(value: &str) -> bool {
    matches!(value, "trace" | "debug" | "info" | "warn" | "error")
}

/// Initialize tracing output.
///
/// FLUXGEN_LOG controls the log level: "trace", "debug", "info", "warn",
/// "error", or a full tracing filter spec like "fluxgen=debug".
pub fn init_tracing() {
    let crate_root = module_path!().to_string();

    let filter = match std::env::var("FLUXGEN_LOG") {
        Ok(level) if is_plain_level(&level) => format!("{crate_root}={level}"),
        Ok(spec) => spec,
        Err(_) => format!("{crate_root}=warn"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}
