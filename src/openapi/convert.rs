//! Best-effort Swagger 2.0 to OpenAPI 3 conversion.
//!
//! Runs on the raw JSON value after dereferencing, so every `$ref` has
//! already been inlined and only structural translation remains:
//! `definitions` move under `components.schemas`, body/formData
//! parameters become request bodies, and response `schema`/`produces`
//! pairs become response `content`. A conversion failure is reported to
//! the caller, which falls back to the dereferenced document unchanged.

use serde_json::{json, Map, Value};

const METHOD_KEYS: &[&str] = &["get", "post", "put", "patch", "delete", "options", "head"];
const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// True when the document declares itself as Swagger 2.0.
pub fn is_swagger2(value: &Value) -> bool {
    value.get("swagger").and_then(Value::as_str) == Some("2.0")
}

/// Convert a dereferenced Swagger 2.0 document into OpenAPI 3 shape.
pub fn convert_swagger2(value: &Value) -> Result<Value, String> {
    let source = value
        .as_object()
        .ok_or_else(|| "document root is not an object".to_string())?;

    let mut out = Map::new();
    out.insert("openapi".into(), json!("3.0.3"));
    if let Some(info) = source.get("info") {
        out.insert("info".into(), info.clone());
    }
    if let Some(servers) = build_servers(source) {
        out.insert("servers".into(), servers);
    }

    let doc_consumes = first_media_type(source.get("consumes"));
    let doc_produces = first_media_type(source.get("produces"));

    let mut paths = Map::new();
    if let Some(source_paths) = source.get("paths") {
        let source_paths = source_paths
            .as_object()
            .ok_or_else(|| "paths is not an object".to_string())?;
        for (path, item) in source_paths {
            paths.insert(
                path.clone(),
                convert_path_item(item, doc_consumes.as_deref(), doc_produces.as_deref())
                    .map_err(|err| format!("path {path}: {err}"))?,
            );
        }
    }
    out.insert("paths".into(), Value::Object(paths));

    if let Some(definitions) = source.get("definitions") {
        out.insert(
            "components".into(),
            json!({ "schemas": definitions.clone() }),
        );
    }

    Ok(Value::Object(out))
}

fn build_servers(source: &Map<String, Value>) -> Option<Value> {
    let host = source.get("host").and_then(Value::as_str)?;
    let base_path = source
        .get("basePath")
        .and_then(Value::as_str)
        .unwrap_or("");
    let scheme = source
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|schemes| schemes.first())
        .and_then(Value::as_str)
        .unwrap_or("https");
    Some(json!([{ "url": format!("{scheme}://{host}{base_path}") }]))
}

fn first_media_type(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn convert_path_item(
    item: &Value,
    doc_consumes: Option<&str>,
    doc_produces: Option<&str>,
) -> Result<Value, String> {
    let item = item
        .as_object()
        .ok_or_else(|| "path item is not an object".to_string())?;

    let mut out = Map::new();
    for (key, value) in item {
        if METHOD_KEYS.contains(&key.as_str()) {
            out.insert(
                key.clone(),
                convert_operation(value, doc_consumes, doc_produces)
                    .map_err(|err| format!("{key}: {err}"))?,
            );
        } else if key == "parameters" {
            let (params, _, _) = split_parameters(value)?;
            out.insert("parameters".into(), Value::Array(params));
        } else {
            out.insert(key.clone(), value.clone());
        }
    }
    Ok(Value::Object(out))
}

fn convert_operation(
    op: &Value,
    doc_consumes: Option<&str>,
    doc_produces: Option<&str>,
) -> Result<Value, String> {
    let op = op
        .as_object()
        .ok_or_else(|| "operation is not an object".to_string())?;

    let consumes = first_media_type(op.get("consumes"))
        .or_else(|| doc_consumes.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());
    let produces = first_media_type(op.get("produces"))
        .or_else(|| doc_produces.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());

    let mut out = Map::new();
    for (key, value) in op {
        match key.as_str() {
            "consumes" | "produces" => {}
            "parameters" => {
                let (params, body_schema, form_fields) = split_parameters(value)?;
                if !params.is_empty() {
                    out.insert("parameters".into(), Value::Array(params));
                }
                if let Some((schema, required)) = body_schema {
                    let mut request_body = Map::new();
                    request_body.insert("required".into(), json!(required));
                    request_body.insert("content".into(), media_content(&consumes, schema));
                    out.insert("requestBody".into(), Value::Object(request_body));
                } else if let Some(form) = form_fields {
                    let mut request_body = Map::new();
                    request_body.insert(
                        "content".into(),
                        media_content("application/x-www-form-urlencoded", form),
                    );
                    out.insert("requestBody".into(), Value::Object(request_body));
                }
            }
            "responses" => {
                out.insert("responses".into(), convert_responses(value, &produces)?);
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(Value::Object(out))
}

/// `{ "<media_type>": { "schema": <schema> } }`
fn media_content(media_type: &str, schema: Value) -> Value {
    let mut media = Map::new();
    media.insert("schema".into(), schema);
    let mut content = Map::new();
    content.insert(media_type.to_string(), Value::Object(media));
    Value::Object(content)
}

type SplitParameters = (Vec<Value>, Option<(Value, bool)>, Option<Value>);

/// Split a Swagger 2.0 parameter list into OpenAPI 3 parameters, an
/// optional body schema and an optional formData object schema.
fn split_parameters(value: &Value) -> Result<SplitParameters, String> {
    let list = value
        .as_array()
        .ok_or_else(|| "parameters is not an array".to_string())?;

    let mut params = Vec::new();
    let mut body_schema = None;
    let mut form_properties = Map::new();
    let mut form_required = Vec::new();

    for param in list {
        let param = param
            .as_object()
            .ok_or_else(|| "parameter is not an object".to_string())?;
        let location = param.get("in").and_then(Value::as_str).unwrap_or_default();
        match location {
            "body" => {
                let schema = param.get("schema").cloned().unwrap_or_else(|| json!({}));
                let required = param
                    .get("required")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                body_schema = Some((schema, required));
            }
            "formData" => {
                let name = param
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| "formData parameter without a name".to_string())?;
                form_properties.insert(name.to_string(), lift_parameter_schema(param));
                if param.get("required").and_then(Value::as_bool) == Some(true) {
                    form_required.push(Value::String(name.to_string()));
                }
            }
            _ => {
                params.push(convert_plain_parameter(param));
            }
        }
    }

    let form_schema = if form_properties.is_empty() {
        None
    } else {
        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(form_properties));
        if !form_required.is_empty() {
            schema.insert("required".into(), Value::Array(form_required));
        }
        Some(Value::Object(schema))
    };

    Ok((params, body_schema, form_schema))
}

/// Keys that describe the parameter's value type inline in Swagger 2.0
/// and belong under `schema` in OpenAPI 3.
const SCHEMA_KEYS: &[&str] = &[
    "type", "items", "enum", "format", "default", "minimum", "maximum", "pattern",
];

fn lift_parameter_schema(param: &Map<String, Value>) -> Value {
    let mut schema = Map::new();
    for key in SCHEMA_KEYS {
        if let Some(value) = param.get(*key) {
            schema.insert((*key).to_string(), value.clone());
        }
    }
    Value::Object(schema)
}

fn convert_plain_parameter(param: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    for (key, value) in param {
        if !SCHEMA_KEYS.contains(&key.as_str()) {
            out.insert(key.clone(), value.clone());
        }
    }
    let schema = lift_parameter_schema(param);
    if !schema.as_object().map(Map::is_empty).unwrap_or(true) {
        out.insert("schema".into(), schema);
    }
    Value::Object(out)
}

fn convert_responses(value: &Value, produces: &str) -> Result<Value, String> {
    let responses = value
        .as_object()
        .ok_or_else(|| "responses is not an object".to_string())?;

    let mut out = Map::new();
    for (status, response) in responses {
        let response = response
            .as_object()
            .ok_or_else(|| format!("response {status} is not an object"))?;
        let mut converted = Map::new();
        for (key, value) in response {
            match key.as_str() {
                "schema" => {
                    converted.insert("content".into(), media_content(produces, value.clone()));
                }
                "headers" | "examples" => {}
                _ => {
                    converted.insert(key.clone(), value.clone());
                }
            }
        }
        out.insert(status.clone(), Value::Object(converted));
    }
    Ok(Value::Object(out))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_swagger2() {
        assert!(is_swagger2(&json!({ "swagger": "2.0" })));
        assert!(!is_swagger2(&json!({ "openapi": "3.1.0" })));
    }

    #[test]
    fn test_converts_body_parameter_to_request_body() {
        let doc = json!({
            "swagger": "2.0",
            "info": { "title": "Legacy", "version": "1.0" },
            "paths": {
                "/users": {
                    "post": {
                        "operationId": "createUser",
                        "parameters": [
                            { "name": "payload", "in": "body", "required": true,
                              "schema": { "type": "object", "properties": { "name": { "type": "string" } } } }
                        ],
                        "responses": { "201": { "description": "Created", "schema": { "type": "object" } } }
                    }
                }
            }
        });
        let converted = convert_swagger2(&doc).unwrap();
        assert_eq!(converted.pointer("/openapi").unwrap(), "3.0.3");
        assert_eq!(
            converted
                .pointer("/paths/~1users/post/requestBody/required")
                .unwrap(),
            &json!(true)
        );
        assert!(converted
            .pointer("/paths/~1users/post/requestBody/content/application~1json/schema/properties/name")
            .is_some());
        assert!(converted
            .pointer("/paths/~1users/post/responses/201/content/application~1json/schema")
            .is_some());
    }

    #[test]
    fn test_lifts_inline_parameter_type_into_schema() {
        let doc = json!({
            "swagger": "2.0",
            "paths": {
                "/users": {
                    "get": {
                        "operationId": "listUsers",
                        "parameters": [
                            { "name": "limit", "in": "query", "type": "integer", "format": "int32" }
                        ],
                        "responses": { "200": { "description": "OK" } }
                    }
                }
            }
        });
        let converted = convert_swagger2(&doc).unwrap();
        let param = converted
            .pointer("/paths/~1users/get/parameters/0")
            .unwrap();
        assert_eq!(param.pointer("/schema/type").unwrap(), "integer");
        assert!(param.get("type").is_none());
    }

    #[test]
    fn test_definitions_move_under_components() {
        let doc = json!({
            "swagger": "2.0",
            "paths": {},
            "definitions": { "User": { "type": "object" } }
        });
        let converted = convert_swagger2(&doc).unwrap();
        assert!(converted
            .pointer("/components/schemas/User")
            .is_some());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(convert_swagger2(&json!({ "paths": "nope" })).is_err());
    }
}
