//! `fluxgen generate`: run every configured generation job.

use std::path::PathBuf;

use clap::Args;
use console::style;

use crate::cli::run_cli_async;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        long,
        short = 'c',
        help = "Path to the config file. Defaults to fluxgen.config.json / fluxgen.config.toml in the current directory"
    )]
    pub config: Option<PathBuf>,
}

pub async fn run(args: GenerateArgs) -> i32 {
    run_cli_async(|| async move {
        let cwd = std::env::current_dir()
            .map_err(|err| format!("Failed to resolve working directory: {err}"))?;
        let jobs = crate::config::load_jobs(&cwd, args.config.as_deref())
            .map_err(|err| err.to_string())?;
        println!(
            "{} Config loaded ({} job{})",
            style("✓").green(),
            jobs.len(),
            if jobs.len() == 1 { "" } else { "s" }
        );

        let summary = crate::orchestrator::run_jobs(&jobs).await;
        for outcome in &summary.outcomes {
            match &outcome.result {
                Ok(paths) => println!(
                    "{} {} ({} files)",
                    style("✓").green(),
                    outcome.input,
                    paths.len()
                ),
                Err(err) => println!("{} {}: {err}", style("✗").red(), outcome.input),
            }
        }

        if summary.all_ok() {
            Ok(())
        } else {
            Err(format!(
                "{} of {} job(s) failed",
                summary.failed(),
                summary.outcomes.len()
            ))
        }
    })
    .await
}
