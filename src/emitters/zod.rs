//! Schema-validated type-declaration module emitter.
//!
//! Same declaration set as the plain emitter, but every type is backed
//! by a runtime-checkable zod schema the static type is inferred from.
//! Schema const first, inferred type second, always as a pair.

use crate::emitters::{
    path_params_type_name, query_params_type_name, render_module, request_body_type_name,
    response_type_name, schema_const_name, success_type_name,
};
use crate::ir::api::{OperationContext, ParamContext, SchemaNode};
use crate::ir::emit::Emit;
use crate::ir::ts::{
    ImportItem, ImportKind, TsImport, TsPrimitive, TsType, TsTypeDef, TypeDefKind, ZodExpr,
    ZodProp,
};

/// Emit the full `types.ts` module for the schema-validated style.
pub fn emit_zod_types_module(ops: &[OperationContext]) -> String {
    let imports = vec![TsImport {
        kind: ImportKind::Named {
            items: vec![ImportItem::value("z")],
        },
        from: "zod".into(),
    }];

    let mut blocks = Vec::new();
    for op in ops {
        for def in operation_type_defs(op) {
            blocks.push(def.emit());
        }
    }
    render_module(&imports, blocks)
}

fn operation_type_defs(op: &OperationContext) -> Vec<TsTypeDef> {
    let mut defs = Vec::new();

    let path_params = op.path_params();
    if !path_params.is_empty() {
        defs.push(zod_pair(
            path_params_type_name(op),
            params_object_expr(&path_params),
        ));
    }

    let query_params = op.query_params();
    if !query_params.is_empty() {
        defs.push(zod_pair(
            query_params_type_name(op),
            params_object_expr(&query_params),
        ));
    }

    if let Some(body) = &op.request_body {
        defs.push(zod_pair(request_body_type_name(op), zod_expr_of(body)));
    }

    for (status, response) in op.numeric_responses() {
        let expr = response
            .json_schema
            .as_ref()
            .map(zod_expr_of)
            .unwrap_or(ZodExpr::Unknown);
        defs.push(zod_pair(response_type_name(op, status), expr));
    }

    // The success alias stays a plain alias in both styles; it only
    // renames an already-declared response type.
    let ty = match op.success_status() {
        Some(status) => TsType::Ref(response_type_name(op, status)),
        None => TsType::Primitive(TsPrimitive::Unknown),
    };
    defs.push(TsTypeDef {
        name: success_type_name(op),
        kind: TypeDefKind::TypeAlias { ty },
    });

    defs
}

fn zod_pair(type_name: String, expr: ZodExpr) -> TsTypeDef {
    TsTypeDef {
        kind: TypeDefKind::ZodSchema {
            schema_name: schema_const_name(&type_name),
            expr,
        },
        name: type_name,
    }
}

fn params_object_expr(params: &[&ParamContext]) -> ZodExpr {
    ZodExpr::Object(
        params
            .iter()
            .map(|p| ZodProp {
                name: p.name.clone(),
                expr: zod_expr_of(&p.schema),
                optional: !p.required,
            })
            .collect(),
    )
}

/// Structural mapping from schema nodes to zod expressions.
pub fn zod_expr_of(node: &SchemaNode) -> ZodExpr {
    match node {
        SchemaNode::String => ZodExpr::String,
        SchemaNode::Number => ZodExpr::Number,
        SchemaNode::Integer => ZodExpr::Int,
        SchemaNode::Boolean => ZodExpr::Boolean,
        SchemaNode::Array(items) => ZodExpr::Array(Box::new(zod_expr_of(items))),
        SchemaNode::Object(props) => ZodExpr::Object(
            props
                .iter()
                .map(|p| ZodProp {
                    name: p.name.clone(),
                    expr: zod_expr_of(&p.schema),
                    optional: !p.required,
                })
                .collect(),
        ),
        SchemaNode::Map => ZodExpr::Record(Box::new(ZodExpr::Unknown)),
        SchemaNode::AllOf(members) => {
            ZodExpr::Intersection(members.iter().map(zod_expr_of).collect())
        }
        SchemaNode::OneOf(members) => ZodExpr::Union(members.iter().map(zod_expr_of).collect()),
        SchemaNode::Unknown => ZodExpr::Unknown,
    }
}
