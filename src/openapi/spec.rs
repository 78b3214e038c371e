//! OpenAPI document structs for serde deserialization.
//!
//! A minimal subset of the OpenAPI 3.x surface: paths, operations,
//! parameters, request bodies, JSON-content responses and schemas.
//! Documents are deserialized only after the loader has dereferenced
//! every `$ref`, so no reference fields appear here. Maps are ordered
//! so declaration order survives into extraction.

// Some fields are parsed for completeness of the OpenAPI shape even
// where emission does not consume them yet.
#![allow(dead_code)]

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ir::api::HttpMethod;

/// Root OpenAPI document, fully dereferenced.
#[derive(Debug, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: Option<String>,
    pub info: Option<Info>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
}

/// Document metadata.
#[derive(Debug, Deserialize)]
pub struct Info {
    pub title: Option<String>,
    pub version: Option<String>,
}

/// Components section containing reusable schemas.
#[derive(Debug, Deserialize)]
pub struct Components {
    pub schemas: Option<IndexMap<String, Schema>>,
}

/// A path entry holding the operations for each HTTP method.
#[derive(Debug, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    /// Path-level parameters shared by all operations of this path.
    pub parameters: Option<Vec<Parameter>>,
}

impl PathItem {
    /// The operation registered for a method, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
        }
    }
}

/// An API operation (endpoint).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// A parameter (path, query, header or cookie).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Schema>,
}

/// A request body definition.
#[derive(Debug, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    pub content: Option<IndexMap<String, MediaType>>,
}

impl RequestBody {
    /// Schema of the JSON media type, if the body declares one.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_media_schema(self.content.as_ref())
    }
}

/// A response definition.
#[derive(Debug, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    pub content: Option<IndexMap<String, MediaType>>,
}

impl Response {
    /// Schema of the JSON media type, if the response declares one.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_media_schema(self.content.as_ref())
    }
}

/// Media type content (e.g. `application/json`).
#[derive(Debug, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// True for `application/json` and structured-syntax `+json` media types.
fn is_json_media_type(media_type: &str) -> bool {
    media_type == "application/json" || media_type.ends_with("+json")
}

fn json_media_schema(content: Option<&IndexMap<String, MediaType>>) -> Option<&Schema> {
    content?
        .iter()
        .find(|(media_type, _)| is_json_media_type(media_type))
        .and_then(|(_, media)| media.schema.as_ref())
}

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<String>,

    /// Properties for object types, in declaration order.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Intersection of member schemas.
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<Schema>>,

    /// Union of member schemas.
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<Schema>>,

    /// Alternative union form; not mapped to a dedicated type shape.
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<Schema>>,

    /// Enum values; emitted structurally as the base type.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Format hint (e.g. date-time, uuid).
    pub format: Option<String>,
}
