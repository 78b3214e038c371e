//! Job configuration: schema, validation and file loading.
//!
//! Config files are an external boundary. They are parsed into the fixed
//! [`JobConfig`] schema immediately after load and validated before any
//! I/O happens; nothing downstream ever sees raw config values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::ir::api::HttpMethod;

/// Config file names probed in the current directory, in order of preference.
pub const CONFIG_FILES: &[&str] = &["fluxgen.config.json", "fluxgen.config.toml"];

/// How emitted type declarations are backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TypeStyle {
    /// Plain structural interfaces and type aliases.
    #[default]
    #[serde(rename = "plain")]
    Plain,
    /// Runtime-checkable zod schemas with inferred static types.
    #[serde(rename = "schema-validated")]
    SchemaValidated,
}

/// Optional data-fetching hook module families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HookFlavor {
    #[serde(rename = "swr")]
    Swr,
    #[serde(rename = "react-query")]
    ReactQuery,
}

impl HookFlavor {
    /// Fixed output file name for this hook family.
    pub fn file_name(self) -> &'static str {
        match self {
            HookFlavor::Swr => "swr.ts",
            HookFlavor::ReactQuery => "react-query.ts",
        }
    }

    /// Module specifier used by the index barrel.
    pub fn module_name(self) -> &'static str {
        match self {
            HookFlavor::Swr => "swr",
            HookFlavor::ReactQuery => "react-query",
        }
    }
}

/// Which call contract the configured transport module implements.
///
/// The generator cannot inspect the transport module; if its exported
/// shape does not match the contract selected here, the mismatch only
/// surfaces when the generated code is type-checked. Keeping the two in
/// sync is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportContract {
    /// `(url, init) => Promise<Result<T>>`: errors surfaced as values.
    #[default]
    Result,
    /// `(url, init) => Promise<Response>`-like: non-success throws.
    Throw,
}

/// One configured unit of generation work.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    /// Spec location: filesystem path, or URL when it starts with http(s)://.
    #[serde(default)]
    pub input: String,

    /// Directory the generated modules are written under.
    #[serde(default)]
    pub output: String,

    /// Module reference of the user-supplied fetch transport. Imported by
    /// the generated client module; never inspected by the generator.
    #[serde(default)]
    pub fetch_client: String,

    /// Optional module reference of the user's API error class. When set,
    /// the generated `Result` shape uses it as the default error type.
    #[serde(default)]
    pub api_error: Option<String>,

    #[serde(default)]
    pub type_style: TypeStyle,

    /// Hook module families to emit in addition to types and client.
    #[serde(default)]
    pub hooks: Vec<HookFlavor>,

    #[serde(default)]
    pub transport: TransportContract,

    /// Accepted HTTP methods, in extraction order.
    #[serde(default = "HttpMethod::accepted")]
    pub methods: Vec<HttpMethod>,

    /// Optional static prefix for every constructed URL.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl JobConfig {
    /// Validate mandatory fields, enumerating everything that is missing.
    pub fn validate(&self) -> Result<(), Error> {
        let mut missing = Vec::new();
        if self.input.trim().is_empty() {
            missing.push("input");
        }
        if self.output.trim().is_empty() {
            missing.push("output");
        }
        if self.fetch_client.trim().is_empty() {
            missing.push("fetchClient");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::missing_config_fields(&missing))
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output)
    }
}

/// Accepted root shapes of a config file: a `jobs` table, a bare array,
/// or a single job object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Jobs { jobs: Vec<JobConfig> },
    Many(Vec<JobConfig>),
    Single(Box<JobConfig>),
}

impl ConfigFile {
    fn into_jobs(self) -> Vec<JobConfig> {
        match self {
            ConfigFile::Jobs { jobs } => jobs,
            ConfigFile::Many(jobs) => jobs,
            ConfigFile::Single(job) => vec![*job],
        }
    }
}

/// Locate a config file: an explicit path wins, otherwise the default
/// names are probed in the given directory.
pub fn find_config_file(dir: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            dir.join(path)
        };
        return resolved.exists().then_some(resolved);
    }
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.exists())
}

/// Load and validate every job from a config file.
pub fn load_jobs(dir: &Path, explicit: Option<&Path>) -> Result<Vec<JobConfig>, Error> {
    let path = find_config_file(dir, explicit).ok_or_else(|| {
        Error::invalid_config(match explicit {
            Some(p) => format!("config file not found: {}", p.display()),
            None => format!(
                "no config file found (looked for {})",
                CONFIG_FILES.join(", ")
            ),
        })
    })?;
    debug!(path = %path.display(), "Loading config file.");

    let raw = std::fs::read_to_string(&path).map_err(|err| {
        Error::invalid_config(format!("failed to read {}: {err}", path.display()))
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed: ConfigFile = if is_toml {
        toml::from_str(&raw).map_err(|err| {
            Error::invalid_config(format!("failed to parse {}: {err}", path.display()))
        })?
    } else {
        serde_json::from_str(&raw).map_err(|err| {
            Error::invalid_config(format!("failed to parse {}: {err}", path.display()))
        })?
    };

    let jobs = parsed.into_jobs();
    if jobs.is_empty() {
        return Err(Error::invalid_config("config declares no jobs"));
    }
    for job in &jobs {
        job.validate()?;
    }
    Ok(jobs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn base_job() -> JobConfig {
        JobConfig {
            input: "./openapi.json".into(),
            output: "./src/api".into(),
            fetch_client: "./src/lib/fetch-client".into(),
            api_error: None,
            type_style: TypeStyle::Plain,
            hooks: Vec::new(),
            transport: TransportContract::Result,
            methods: HttpMethod::accepted(),
            base_url: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(base_job().validate().is_ok());
    }

    #[test]
    fn test_validate_enumerates_all_missing_fields() {
        let mut job = base_job();
        job.input = String::new();
        job.fetch_client = "  ".into();
        let err = job.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("input"));
        assert!(msg.contains("fetchClient"));
        assert!(!msg.contains("output,"));
    }

    #[test]
    fn test_load_json_config_single_job() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fluxgen.config.json"),
            r#"{ "input": "./openapi.json", "output": "./api", "fetchClient": "./client" }"#,
        )
        .unwrap();
        let jobs = load_jobs(dir.path(), None).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].type_style, TypeStyle::Plain);
        assert_eq!(jobs[0].transport, TransportContract::Result);
        assert_eq!(jobs[0].methods.len(), 7);
    }

    #[test]
    fn test_load_json_config_job_array() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fluxgen.config.json"),
            r#"[
              { "input": "a.json", "output": "./a", "fetchClient": "./client",
                "typeStyle": "schema-validated", "hooks": ["swr", "react-query"],
                "transport": "throw" },
              { "input": "b.json", "output": "./b", "fetchClient": "./client" }
            ]"#,
        )
        .unwrap();
        let jobs = load_jobs(dir.path(), None).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].type_style, TypeStyle::SchemaValidated);
        assert_eq!(jobs[0].hooks, vec![HookFlavor::Swr, HookFlavor::ReactQuery]);
        assert_eq!(jobs[0].transport, TransportContract::Throw);
    }

    #[test]
    fn test_load_toml_config_jobs_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fluxgen.config.toml"),
            r#"
[[jobs]]
input = "./openapi.yaml"
output = "./src/api"
fetchClient = "./src/lib/fetch-client"
hooks = ["react-query"]
methods = ["get", "post"]
"#,
        )
        .unwrap();
        let jobs = load_jobs(dir.path(), None).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].methods, vec![HttpMethod::Get, HttpMethod::Post]);
        assert_eq!(jobs[0].hooks, vec![HookFlavor::ReactQuery]);
    }

    #[test]
    fn test_missing_config_file_is_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_jobs(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_job_in_batch_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fluxgen.config.json"),
            r#"[{ "input": "a.json", "output": "./a", "fetchClient": "./c" }, { "input": "b.json" }]"#,
        )
        .unwrap();
        let err = load_jobs(dir.path(), None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("output"));
        assert!(msg.contains("fetchClient"));
    }
}
