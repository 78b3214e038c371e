//! Extraction: dereferenced document -> normalized operation contexts.
//!
//! Paths are walked in document declaration order and methods in the
//! configured accepted order, so repeated runs over the same input
//! produce identically ordered output.

use tracing::debug;

use crate::error::Error;
use crate::ir::api::{
    HttpMethod, ObjectProperty, OperationContext, ParamContext, ParamLocation, ResponseContext,
    SchemaNode,
};
use crate::ir::utils::capitalize_first;
use crate::openapi::spec::{OpenApiDocument, Operation, Parameter, Schema};

/// Walk every path/method pair and build one context per operation.
pub fn extract_operations(
    doc: &OpenApiDocument,
    methods: &[HttpMethod],
) -> Result<Vec<OperationContext>, Error> {
    let mut operations = Vec::new();
    for (path, item) in &doc.paths {
        for method in methods {
            if let Some(op) = item.operation(*method) {
                operations.push(normalize_operation(
                    path,
                    *method,
                    op,
                    item.parameters.as_deref(),
                )?);
            }
        }
    }
    debug!(count = operations.len(), "Extracted operations.");
    Ok(operations)
}

fn normalize_operation(
    path: &str,
    method: HttpMethod,
    op: &Operation,
    path_level_params: Option<&[Parameter]>,
) -> Result<OperationContext, Error> {
    let operation_id = op
        .operation_id
        .clone()
        .ok_or_else(|| Error::MissingOperationId {
            method: method.as_str().to_string(),
            path: path.to_string(),
        })?;

    let params = normalize_params(path_level_params, op.parameters.as_deref());
    let request_body = op
        .request_body
        .as_ref()
        .and_then(|body| body.json_schema())
        .map(schema_to_node);
    let responses = op
        .responses
        .iter()
        .map(|(status, response)| ResponseContext {
            status: status.clone(),
            json_schema: response.json_schema().map(schema_to_node),
        })
        .collect();

    Ok(OperationContext {
        fn_name: capitalize_first(&operation_id),
        operation_id,
        method,
        path: path.to_string(),
        params,
        request_body,
        responses,
    })
}

/// Merge path-level and operation-level parameters. Operation-level
/// entries override path-level entries of the same name; header and
/// cookie parameters are dropped.
fn normalize_params(
    path_level: Option<&[Parameter]>,
    op_level: Option<&[Parameter]>,
) -> Vec<ParamContext> {
    let mut params: Vec<ParamContext> = Vec::new();

    for p in path_level.unwrap_or_default() {
        if let Some(param) = normalize_param(p) {
            params.push(param);
        }
    }
    for p in op_level.unwrap_or_default() {
        if let Some(param) = normalize_param(p) {
            params.retain(|existing| existing.name != param.name);
            params.push(param);
        }
    }

    params
}

fn normalize_param(p: &Parameter) -> Option<ParamContext> {
    let location = match p.location.as_str() {
        "path" => ParamLocation::Path,
        "query" => ParamLocation::Query,
        _ => return None,
    };
    Some(ParamContext {
        name: p.name.clone(),
        location,
        required: p.required,
        schema: p
            .schema
            .as_ref()
            .map(schema_to_node)
            .unwrap_or(SchemaNode::Unknown),
    })
}

/// Convert an OpenAPI schema into the closed structural node set.
///
/// Composition keywords win over `type`; shapes the generator does not
/// model fall back to [`SchemaNode::Unknown`] rather than erroring, so a
/// single odd schema never aborts an emission pass.
pub fn schema_to_node(schema: &Schema) -> SchemaNode {
    if let Some(all_of) = &schema.all_of {
        return normalize_members(all_of, SchemaNode::AllOf);
    }
    if let Some(one_of) = &schema.one_of {
        return normalize_members(one_of, SchemaNode::OneOf);
    }

    match schema.schema_type.as_deref() {
        Some("string") => SchemaNode::String,
        Some("number") => SchemaNode::Number,
        Some("integer") => SchemaNode::Integer,
        Some("boolean") => SchemaNode::Boolean,
        Some("array") => {
            let items = schema
                .items
                .as_deref()
                .map(schema_to_node)
                .unwrap_or(SchemaNode::Unknown);
            SchemaNode::Array(Box::new(items))
        }
        Some("object") => match &schema.properties {
            Some(properties) => {
                let required = schema.required.clone().unwrap_or_default();
                SchemaNode::Object(
                    properties
                        .iter()
                        .map(|(name, prop)| ObjectProperty {
                            name: name.clone(),
                            schema: schema_to_node(prop),
                            required: required.iter().any(|r| r == name),
                        })
                        .collect(),
                )
            }
            None => SchemaNode::Map,
        },
        _ => SchemaNode::Unknown,
    }
}

fn normalize_members(
    members: &[Schema],
    build: impl FnOnce(Vec<SchemaNode>) -> SchemaNode,
) -> SchemaNode {
    let mut nodes: Vec<SchemaNode> = members.iter().map(schema_to_node).collect();
    match nodes.len() {
        0 => SchemaNode::Unknown,
        1 => nodes.remove(0),
        _ => build(nodes),
    }
}
