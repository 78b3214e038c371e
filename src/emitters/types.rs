//! Plain type-declaration module emitter.
//!
//! One declaration set per operation: path-parameter and query-parameter
//! interfaces (only when such parameters exist), a request-body alias
//! (only for JSON bodies), one response alias per declared numeric
//! status code in ascending order, and the success alias the client
//! functions resolve to.

use crate::emitters::{
    path_params_type_name, query_params_type_name, render_module, request_body_type_name,
    response_type_name, success_type_name,
};
use crate::ir::api::{OperationContext, ParamContext, SchemaNode};
use crate::ir::emit::Emit;
use crate::ir::ts::{TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};

/// Emit the full `types.ts` module for the plain style.
pub fn emit_types_module(ops: &[OperationContext]) -> String {
    let mut blocks = Vec::new();
    for op in ops {
        for def in operation_type_defs(op) {
            blocks.push(def.emit());
        }
    }
    render_module(&[], blocks)
}

fn operation_type_defs(op: &OperationContext) -> Vec<TsTypeDef> {
    let mut defs = Vec::new();

    let path_params = op.path_params();
    if !path_params.is_empty() {
        defs.push(params_interface(path_params_type_name(op), &path_params));
    }

    let query_params = op.query_params();
    if !query_params.is_empty() {
        defs.push(params_interface(query_params_type_name(op), &query_params));
    }

    if let Some(body) = &op.request_body {
        defs.push(TsTypeDef {
            name: request_body_type_name(op),
            kind: TypeDefKind::TypeAlias {
                ty: ts_type_of(body),
            },
        });
    }

    for (status, response) in op.numeric_responses() {
        let ty = response
            .json_schema
            .as_ref()
            .map(ts_type_of)
            .unwrap_or(TsType::Primitive(TsPrimitive::Unknown));
        defs.push(TsTypeDef {
            name: response_type_name(op, status),
            kind: TypeDefKind::TypeAlias { ty },
        });
    }

    defs.push(success_alias(op));
    defs
}

fn params_interface(name: String, params: &[&ParamContext]) -> TsTypeDef {
    TsTypeDef {
        name,
        kind: TypeDefKind::Interface {
            properties: params
                .iter()
                .map(|p| TsProp {
                    name: p.name.clone(),
                    ty: ts_type_of(&p.schema),
                    optional: !p.required,
                })
                .collect(),
        },
    }
}

/// Alias to the first 2xx response type; unconstrained when the
/// operation declares no 2xx response.
fn success_alias(op: &OperationContext) -> TsTypeDef {
    let ty = match op.success_status() {
        Some(status) => TsType::Ref(response_type_name(op, status)),
        None => TsType::Primitive(TsPrimitive::Unknown),
    };
    TsTypeDef {
        name: success_type_name(op),
        kind: TypeDefKind::TypeAlias { ty },
    }
}

/// Structural mapping from schema nodes to TypeScript types.
pub fn ts_type_of(node: &SchemaNode) -> TsType {
    match node {
        SchemaNode::String => TsType::Primitive(TsPrimitive::String),
        SchemaNode::Number | SchemaNode::Integer => TsType::Primitive(TsPrimitive::Number),
        SchemaNode::Boolean => TsType::Primitive(TsPrimitive::Boolean),
        SchemaNode::Array(items) => TsType::Array(Box::new(ts_type_of(items))),
        SchemaNode::Object(props) => TsType::Object(
            props
                .iter()
                .map(|p| TsProp {
                    name: p.name.clone(),
                    ty: ts_type_of(&p.schema),
                    optional: !p.required,
                })
                .collect(),
        ),
        SchemaNode::Map => TsType::Record(Box::new(TsType::Primitive(TsPrimitive::Unknown))),
        SchemaNode::AllOf(members) => {
            TsType::Intersection(members.iter().map(ts_type_of).collect())
        }
        SchemaNode::OneOf(members) => TsType::Union(members.iter().map(ts_type_of).collect()),
        SchemaNode::Unknown => TsType::Primitive(TsPrimitive::Unknown),
    }
}
