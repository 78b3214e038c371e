//! `$ref` dereferencing over raw JSON values.
//!
//! Runs before typed deserialization so that no later stage ever sees an
//! unresolved reference. Internal references resolve against the document
//! root; external file references resolve relative to the document's
//! directory. Unresolvable references and reference cycles degrade to an
//! empty schema (which normalizes to the unconstrained type) with a
//! warning instead of failing the job.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

/// Hard ceiling on reference-chain depth. Cycles are caught by the
/// visiting set; this bounds pathological non-cyclic chains.
const MAX_REF_DEPTH: usize = 64;

/// Resolve every `$ref` in `value`, returning a reference-free tree.
///
/// `base_dir` is the directory external file references are resolved
/// against; `None` (URL-loaded documents) degrades external references
/// to the empty schema.
pub fn dereference(value: &Value, base_dir: Option<&Path>) -> Value {
    let mut external_docs: HashMap<PathBuf, Option<Value>> = HashMap::new();
    let mut visiting = Vec::new();
    resolve_node(value, value, base_dir, "", &mut visiting, &mut external_docs)
}

fn resolve_node(
    node: &Value,
    root: &Value,
    base_dir: Option<&Path>,
    doc_tag: &str,
    visiting: &mut Vec<String>,
    external_docs: &mut HashMap<PathBuf, Option<Value>>,
) -> Value {
    match node {
        Value::Object(map) => {
            if let Some(Value::String(target)) = map.get("$ref") {
                return resolve_ref(target, root, base_dir, doc_tag, visiting, external_docs);
            }
            Value::Object(
                map.iter()
                    .map(|(key, child)| {
                        (
                            key.clone(),
                            resolve_node(child, root, base_dir, doc_tag, visiting, external_docs),
                        )
                    })
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_node(item, root, base_dir, doc_tag, visiting, external_docs))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn empty_schema() -> Value {
    Value::Object(Map::new())
}

fn resolve_ref(
    target: &str,
    root: &Value,
    base_dir: Option<&Path>,
    doc_tag: &str,
    visiting: &mut Vec<String>,
    external_docs: &mut HashMap<PathBuf, Option<Value>>,
) -> Value {
    let key = format!("{doc_tag}{target}");
    if visiting.iter().any(|entry| entry == &key) {
        warn!(reference = %target, "Breaking $ref cycle with an empty schema.");
        return empty_schema();
    }
    if visiting.len() >= MAX_REF_DEPTH {
        warn!(reference = %target, "Reference chain too deep; substituting an empty schema.");
        return empty_schema();
    }
    visiting.push(key);

    let resolved = if let Some(pointer) = target.strip_prefix('#') {
        match root.pointer(pointer) {
            Some(found) => {
                resolve_node(found, root, base_dir, doc_tag, visiting, external_docs)
            }
            None => {
                warn!(reference = %target, "Unresolvable $ref; substituting an empty schema.");
                empty_schema()
            }
        }
    } else {
        resolve_external_ref(target, base_dir, visiting, external_docs)
    };

    visiting.pop();
    resolved
}

fn resolve_external_ref(
    target: &str,
    base_dir: Option<&Path>,
    visiting: &mut Vec<String>,
    external_docs: &mut HashMap<PathBuf, Option<Value>>,
) -> Value {
    let Some(dir) = base_dir else {
        warn!(reference = %target, "External $ref without a filesystem base; substituting an empty schema.");
        return empty_schema();
    };

    let (file_part, pointer) = match target.split_once('#') {
        Some((file, ptr)) => (file, Some(ptr)),
        None => (target, None),
    };
    let path = dir.join(file_part);

    let doc = external_docs
        .entry(path.clone())
        .or_insert_with(|| load_external_document(&path))
        .clone();
    let Some(ext_root) = doc else {
        warn!(reference = %target, "Failed to load externally referenced document; substituting an empty schema.");
        return empty_schema();
    };

    let ext_dir = path.parent().map(Path::to_path_buf);
    let doc_tag = path.to_string_lossy().into_owned();
    let node = match pointer {
        Some(ptr) => match ext_root.pointer(ptr) {
            Some(found) => found.clone(),
            None => {
                warn!(reference = %target, "Unresolvable pointer in external document; substituting an empty schema.");
                return empty_schema();
            }
        },
        None => ext_root.clone(),
    };

    resolve_node(
        &node,
        &ext_root,
        ext_dir.as_deref(),
        &doc_tag,
        visiting,
        external_docs,
    )
}

fn load_external_document(path: &Path) -> Option<Value> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw)
        .ok()
        .or_else(|| serde_yaml::from_str::<serde_yaml::Value>(&raw).ok().and_then(|yaml| serde_json::to_value(yaml).ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_internal_ref_is_inlined() {
        let doc = json!({
            "components": { "schemas": { "Item": { "type": "object", "properties": { "id": { "type": "string" } } } } },
            "paths": { "/items": { "get": { "responses": { "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Item" } } } } } } } }
        });
        let resolved = dereference(&doc, None);
        let schema = resolved
            .pointer("/paths/~1items/get/responses/200/content/application~1json/schema")
            .unwrap();
        assert_eq!(schema.pointer("/type").unwrap(), "object");
        assert!(schema.get("$ref").is_none());
    }

    #[test]
    fn test_nested_refs_resolve_transitively() {
        let doc = json!({
            "components": { "schemas": {
                "Inner": { "type": "string" },
                "Outer": { "type": "array", "items": { "$ref": "#/components/schemas/Inner" } }
            } },
            "root": { "$ref": "#/components/schemas/Outer" }
        });
        let resolved = dereference(&doc, None);
        assert_eq!(resolved.pointer("/root/items/type").unwrap(), "string");
    }

    #[test]
    fn test_cycle_terminates_with_empty_schema() {
        let doc = json!({
            "components": { "schemas": {
                "Node": { "type": "object", "properties": { "next": { "$ref": "#/components/schemas/Node" } } }
            } },
            "root": { "$ref": "#/components/schemas/Node" }
        });
        let resolved = dereference(&doc, None);
        // The outer node resolves; the cyclic inner reference collapses to {}.
        assert_eq!(resolved.pointer("/root/type").unwrap(), "object");
        assert_eq!(
            resolved.pointer("/root/properties/next").unwrap(),
            &json!({})
        );
    }

    #[test]
    fn test_unresolvable_ref_degrades_to_empty_schema() {
        let doc = json!({ "root": { "$ref": "#/components/schemas/Nope" } });
        let resolved = dereference(&doc, None);
        assert_eq!(resolved.pointer("/root").unwrap(), &json!({}));
    }

    #[test]
    fn test_external_file_ref_resolves_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("common.json"),
            r#"{ "schemas": { "Id": { "type": "string" } } }"#,
        )
        .unwrap();
        let doc = json!({ "root": { "$ref": "common.json#/schemas/Id" } });
        let resolved = dereference(&doc, Some(dir.path()));
        assert_eq!(resolved.pointer("/root/type").unwrap(), "string");
    }

    #[test]
    fn test_external_ref_without_base_dir_degrades() {
        let doc = json!({ "root": { "$ref": "common.json#/schemas/Id" } });
        let resolved = dereference(&doc, None);
        assert_eq!(resolved.pointer("/root").unwrap(), &json!({}));
    }
}
