//! Spec loading: fetch or read, parse, dereference, normalize to OpenAPI 3.
//!
//! The loader is the only stage that touches the network or the
//! filesystem for input. Everything it hands on is a fully dereferenced
//! [`OpenApiDocument`].

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;
use crate::openapi::convert::{convert_swagger2, is_swagger2};
use crate::openapi::deref::dereference;
use crate::openapi::spec::OpenApiDocument;

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Load, dereference and (if needed) convert the spec at `input`, which
/// is treated as a URL when it carries an http(s) scheme and as a
/// filesystem path otherwise.
pub async fn load_document(input: &str) -> Result<OpenApiDocument, Error> {
    let (raw, base_dir) = read_source(input).await?;
    let parsed = parse_source(&raw, input)?;

    let dereferenced = dereference(&parsed, base_dir.as_deref());

    let normalized = if is_swagger2(&dereferenced) {
        debug!(input, "Converting Swagger 2.0 document to OpenAPI 3.");
        match convert_swagger2(&dereferenced) {
            Ok(converted) => converted,
            Err(err) => {
                warn!(input, error = %err, "Swagger 2.0 conversion failed; using the dereferenced document as-is.");
                dereferenced
            }
        }
    } else {
        dereferenced
    };

    serde_json::from_value(normalized).map_err(|err| Error::spec_parse(input, err))
}

/// Fetch or read the raw spec text plus the base directory external
/// references resolve against (files only).
async fn read_source(input: &str) -> Result<(String, Option<PathBuf>), Error> {
    if is_url(input) {
        let response = reqwest::get(input).await.map_err(|err| Error::SpecFetch {
            url: input.to_string(),
            detail: err.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::SpecFetch {
                url: input.to_string(),
                detail: format!("unexpected status {status}"),
            });
        }
        let body = response.text().await.map_err(|err| Error::SpecFetch {
            url: input.to_string(),
            detail: err.to_string(),
        })?;
        return Ok((body, None));
    }

    let path = Path::new(input);
    if !path.exists() {
        return Err(Error::SpecNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| Error::spec_parse(input, err))?;
    let base_dir = path.parent().map(Path::to_path_buf);
    Ok((raw, base_dir))
}

/// Parse spec text as JSON first, falling back to YAML.
fn parse_source(raw: &str, source_name: &str) -> Result<Value, Error> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(raw)
                .map_err(|yaml_err| {
                    Error::spec_parse(
                        source_name,
                        format!("not valid JSON ({json_err}) nor YAML ({yaml_err})"),
                    )
                })?;
            yaml_to_json(yaml).map_err(|err| Error::spec_parse(source_name, err))
        }
    }
}

/// Convert a YAML value into a JSON value, preserving mapping order.
///
/// YAML documents routinely use non-string mapping keys (`200:` status
/// codes); those are stringified, matching how the rest of the pipeline
/// addresses them.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, String> {
    match value {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("unrepresentable number: {n}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(items) => Ok(Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        )),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = serde_json::Map::new();
            for (key, value) in mapping {
                let key = match key {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported mapping key: {other:?}")),
                };
                map.insert(key, yaml_to_json(value)?);
            }
            Ok(Value::Object(map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
