//! API-level IR: normalized operations and schema nodes.
//!
//! One [`OperationContext`] exists per (path, HTTP method) pair with an
//! operation object. Contexts are created once during extraction and
//! immutable afterwards; every emitter consumes them read-only.

use serde::Deserialize;

/// HTTP methods the extractor accepts, in fixed extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    /// The default accepted method set, in extraction order.
    pub fn accepted() -> Vec<HttpMethod> {
        vec![
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
        ]
    }

    /// Uppercase wire form, as emitted into request options.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Lowercase form, as used in config files.
    pub fn lower(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }

    /// GET operations map to query hooks; everything else to mutations.
    pub fn is_query(self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

/// Where a parameter appears. Header and cookie parameters are dropped
/// during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

/// Normalized structural schema shape.
///
/// Every OpenAPI corner case is resolved into this closed set during
/// extraction; shapes the generator does not model collapse to
/// [`SchemaNode::Unknown`] rather than failing the emission pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String,
    Number,
    Integer,
    Boolean,
    /// Array with its element shape; a missing `items` yields
    /// `Array(Unknown)`.
    Array(Box<SchemaNode>),
    /// Object with declared properties, in declaration order.
    Object(Vec<ObjectProperty>),
    /// Object without declared properties: a free-form string map.
    Map,
    /// Intersection of member shapes (`allOf`).
    AllOf(Vec<SchemaNode>),
    /// Union of member shapes (`oneOf`).
    OneOf(Vec<SchemaNode>),
    /// Unconstrained value.
    Unknown,
}

/// One declared object property.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub name: String,
    pub schema: SchemaNode,
    /// Listed in the parent schema's `required` array.
    pub required: bool,
}

/// One declared operation parameter.
#[derive(Debug, Clone)]
pub struct ParamContext {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub schema: SchemaNode,
}

/// One declared response status entry.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// Status code as written in the document (e.g. "200", "default").
    pub status: String,
    /// Schema of the JSON content, when the response declares any.
    pub json_schema: Option<SchemaNode>,
}

impl ResponseContext {
    /// Numeric status code; non-numeric keys ("default", "2XX") yield None.
    pub fn numeric_status(&self) -> Option<u16> {
        self.status.parse().ok()
    }
}

/// One normalized operation: the unit every emitter works from.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Stable identifier from the document; presence is enforced by the
    /// extractor.
    pub operation_id: String,
    /// `operation_id` with the first letter uppercased; used for type
    /// symbol names.
    pub fn_name: String,
    pub method: HttpMethod,
    /// Raw path template containing `{param}` placeholders.
    pub path: String,
    /// Path and query parameters, in declaration order.
    pub params: Vec<ParamContext>,
    /// Schema of the JSON request body, when one is declared.
    pub request_body: Option<SchemaNode>,
    /// Declared responses, in document order.
    pub responses: Vec<ResponseContext>,
}

impl OperationContext {
    /// `operation_id` with the first letter lowercased; used for value
    /// symbol names (client functions, schema consts, cache keys).
    pub fn client_fn_name(&self) -> String {
        crate::ir::utils::decapitalize_first(&self.fn_name)
    }

    pub fn path_params(&self) -> Vec<&ParamContext> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Path)
            .collect()
    }

    pub fn query_params(&self) -> Vec<&ParamContext> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Query)
            .collect()
    }

    pub fn has_path_params(&self) -> bool {
        self.params
            .iter()
            .any(|p| p.location == ParamLocation::Path)
    }

    pub fn has_query_params(&self) -> bool {
        self.params
            .iter()
            .any(|p| p.location == ParamLocation::Query)
    }

    pub fn has_request_body(&self) -> bool {
        self.request_body.is_some()
    }

    /// Responses with numeric status codes, ascending. Declaration order
    /// in the document is irrelevant here: ascending numeric order is the
    /// deterministic tie-break for emission.
    pub fn numeric_responses(&self) -> Vec<(u16, &ResponseContext)> {
        let mut numbered: Vec<(u16, &ResponseContext)> = self
            .responses
            .iter()
            .filter_map(|r| r.numeric_status().map(|code| (code, r)))
            .collect();
        numbered.sort_by_key(|(code, _)| *code);
        numbered
    }

    /// The first 2xx status (ascending), whose type the client function
    /// resolves to.
    pub fn success_status(&self) -> Option<u16> {
        self.numeric_responses()
            .iter()
            .map(|(code, _)| *code)
            .find(|code| (200..300).contains(code))
    }
}
