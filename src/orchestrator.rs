//! Job orchestration: sequences the pipeline per configured job.
//!
//! Jobs run sequentially so diagnostic output stays ordered. Within a
//! job any fatal error aborts the remaining steps of that job only; the
//! batch continues with the next job and the summary reports both sides.
//! Emission is complete before the first write, so a failed job leaves
//! no partial module set behind.

use std::path::PathBuf;

use futures_util::future;
use tracing::{error, info};

use crate::config::{HookFlavor, JobConfig, TypeStyle};
use crate::emitters::client::emit_client_module;
use crate::emitters::react_query::emit_react_query_module;
use crate::emitters::swr::emit_swr_module;
use crate::emitters::types::emit_types_module;
use crate::emitters::zod::emit_zod_types_module;
use crate::emitters::{INDEX_FILE, OPERATIONS_FILE, TYPES_FILE};
use crate::error::Error;
use crate::ir::extract_operations;
use crate::openapi::load_document;

/// Result of one job in a batch.
#[derive(Debug)]
pub struct JobOutcome {
    pub input: String,
    pub result: Result<Vec<PathBuf>, Error>,
}

/// Results of a whole batch run.
#[derive(Debug)]
pub struct BatchSummary {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }
}

/// Run every job in order. A failing job is reported and does not stop
/// the jobs after it.
pub async fn run_jobs(jobs: &[JobConfig]) -> BatchSummary {
    let mut outcomes = Vec::new();
    for job in jobs {
        let result = run_job(job).await;
        if let Err(err) = &result {
            error!(input = %job.input, error = %err, "Generation job failed.");
        }
        outcomes.push(JobOutcome {
            input: job.input.clone(),
            result,
        });
    }
    BatchSummary { outcomes }
}

/// Run one job: load, extract, emit every requested module, then write.
pub async fn run_job(job: &JobConfig) -> Result<Vec<PathBuf>, Error> {
    job.validate()?;

    let doc = load_document(&job.input).await?;
    let operations = extract_operations(&doc, &job.methods)?;
    info!(
        input = %job.input,
        operations = operations.len(),
        "Generating client modules."
    );

    let types_source = match job.type_style {
        TypeStyle::Plain => emit_types_module(&operations),
        TypeStyle::SchemaValidated => emit_zod_types_module(&operations),
    };
    let client_source = emit_client_module(&operations, job);

    let out_dir = job.output_dir();
    let mut files = vec![
        (out_dir.join(TYPES_FILE), types_source),
        (out_dir.join(OPERATIONS_FILE), client_source),
    ];
    for flavor in &job.hooks {
        let source = match flavor {
            HookFlavor::Swr => emit_swr_module(&operations, job),
            HookFlavor::ReactQuery => emit_react_query_module(&operations, job),
        };
        files.push((out_dir.join(flavor.file_name()), source));
    }
    files.push((out_dir.join(INDEX_FILE), index_module(job)));

    tokio::fs::create_dir_all(&out_dir)
        .await
        .map_err(|source| Error::Write {
            path: out_dir.clone(),
            source,
        })?;

    let paths: Vec<PathBuf> = files.iter().map(|(path, _)| path.clone()).collect();
    // Distinct paths, so the writes can be issued concurrently.
    future::try_join_all(
        files
            .into_iter()
            .map(|(path, content)| write_generated_file(path, content)),
    )
    .await?;

    Ok(paths)
}

async fn write_generated_file(path: PathBuf, content: String) -> Result<(), Error> {
    tokio::fs::write(&path, content)
        .await
        .map_err(|source| Error::Write { path, source })
}

/// Barrel module re-exporting every generated sibling.
fn index_module(job: &JobConfig) -> String {
    let mut lines = vec![
        "export * from \"./types\";".to_string(),
        "export * from \"./operations\";".to_string(),
    ];
    for flavor in &job.hooks {
        lines.push(format!("export * from \"./{}\";", flavor.module_name()));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
