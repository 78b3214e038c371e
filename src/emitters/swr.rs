//! SWR hook module emitter.
//!
//! One `use{Fn}` hook per GET operation, wrapping the already-emitted
//! client function. The cache key is derived from the operation's stable
//! name plus the path/query parameter values, so identical parameters
//! always produce an identical key.

use crate::config::{JobConfig, TransportContract};
use crate::emitters::{delegate_call, render_module, success_type_name, ParamSlot, ParamsShape};
use crate::ir::api::OperationContext;
use crate::ir::emit::Emit;
use crate::ir::ts::{ImportKind, TsFunction, TsImport, TsParam, TsStmt};

/// Emit the full `swr.ts` module.
pub fn emit_swr_module(ops: &[OperationContext], job: &JobConfig) -> String {
    let imports = vec![
        TsImport {
            kind: ImportKind::Default {
                name: "useSWR".into(),
                type_only: false,
            },
            from: "swr".into(),
        },
        TsImport {
            kind: ImportKind::Namespace {
                alias: "operations".into(),
                type_only: false,
            },
            from: "./operations".into(),
        },
        TsImport {
            kind: ImportKind::Namespace {
                alias: "types".into(),
                type_only: true,
            },
            from: "./types".into(),
        },
    ];

    let blocks = ops
        .iter()
        .filter(|op| op.method.is_query())
        .map(|op| swr_hook(op, job).emit())
        .collect();
    render_module(&imports, blocks)
}

/// Cache key parts: stable operation name, then each present parameter
/// slot's value.
pub(crate) fn hook_key(op: &OperationContext, shape: Option<&ParamsShape>) -> String {
    let mut parts = vec![format!("\"{}\"", op.client_fn_name())];
    if let Some(shape) = shape {
        let accessor = if shape.optional { "params?." } else { "params." };
        for slot in [ParamSlot::PathParams, ParamSlot::QueryParams] {
            if shape.has(slot) {
                parts.push(format!("{accessor}{}", slot.field_name()));
            }
        }
    }
    format!("[{}]", parts.join(", "))
}

fn swr_hook(op: &OperationContext, job: &JobConfig) -> TsFunction {
    let shape = ParamsShape::of_query_hook(op);
    let success = format!("types.{}", success_type_name(op));

    let mut params = Vec::new();
    if let Some(shape) = &shape {
        params.push(TsParam {
            name: "params".into(),
            ty: shape.object_type(op),
            optional: shape.optional,
        });
    }

    let key = hook_key(op, shape.as_ref());
    let fetcher = delegate_call(
        "()",
        &op.client_fn_name(),
        shape.as_ref().map(|_| "params"),
        job.transport,
    );

    TsFunction {
        name: format!("use{}", op.fn_name),
        params,
        return_type: None,
        body: vec![TsStmt::Raw(format!(
            "return useSWR<{success}>(\n  {key},\n  {fetcher}\n);"
        ))],
        is_async: false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{HookFlavor, TypeStyle};
    use crate::ir::api::{
        HttpMethod, ParamContext, ParamLocation, ResponseContext, SchemaNode,
    };

    fn job(transport: TransportContract) -> JobConfig {
        JobConfig {
            input: "./openapi.json".into(),
            output: "./src/api".into(),
            fetch_client: "./src/lib/fetch-client".into(),
            api_error: None,
            type_style: TypeStyle::Plain,
            hooks: vec![HookFlavor::Swr],
            transport,
            methods: HttpMethod::accepted(),
            base_url: None,
        }
    }

    fn get_room_op() -> OperationContext {
        OperationContext {
            operation_id: "getRoom".into(),
            fn_name: "GetRoom".into(),
            method: HttpMethod::Get,
            path: "/rooms/{roomId}".into(),
            params: vec![ParamContext {
                name: "roomId".into(),
                location: ParamLocation::Path,
                required: true,
                schema: SchemaNode::String,
            }],
            request_body: None,
            responses: vec![ResponseContext {
                status: "200".into(),
                json_schema: Some(SchemaNode::Map),
            }],
        }
    }

    fn delete_room_op() -> OperationContext {
        OperationContext {
            operation_id: "deleteRoom".into(),
            fn_name: "DeleteRoom".into(),
            method: HttpMethod::Delete,
            path: "/rooms/{roomId}".into(),
            params: vec![ParamContext {
                name: "roomId".into(),
                location: ParamLocation::Path,
                required: true,
                schema: SchemaNode::String,
            }],
            request_body: None,
            responses: Vec::new(),
        }
    }

    #[test]
    fn test_only_get_operations_become_hooks() {
        let module = emit_swr_module(&[get_room_op(), delete_room_op()], &job(TransportContract::Throw));
        assert!(module.contains("export function useGetRoom("));
        assert!(!module.contains("useDeleteRoom"));
    }

    #[test]
    fn test_hook_signature_and_key() {
        let module = emit_swr_module(&[get_room_op()], &job(TransportContract::Throw));
        assert!(module.contains(
            "export function useGetRoom(params: { pathParams: types.GetRoomPathParams }) {"
        ));
        assert!(module.contains("[\"getRoom\", params.pathParams],"));
        assert!(module.contains("() => operations.getRoom(params)"));
        assert!(module.contains("return useSWR<types.GetRoomSuccessResponse>("));
    }

    #[test]
    fn test_result_contract_fetcher_unwraps() {
        let module = emit_swr_module(&[get_room_op()], &job(TransportContract::Result));
        assert!(module.contains(
            "() => operations.getRoom(params).then((res) => { if (res.error != null) throw res.error; return res.data; })"
        ));
    }

    #[test]
    fn test_imports_reference_sibling_modules() {
        let module = emit_swr_module(&[get_room_op()], &job(TransportContract::Throw));
        assert!(module.starts_with("import useSWR from \"swr\";\n"));
        assert!(module.contains("import * as operations from \"./operations\";"));
        assert!(module.contains("import type * as types from \"./types\";"));
    }
}
