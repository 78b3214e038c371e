//! React Query hook module emitter.
//!
//! Query hooks wrap GET operations, mutation hooks wrap everything else.
//! Both delegate to the already-emitted client functions; no URL, query
//! or body logic is duplicated here. Imports are conditional so a
//! read-only or write-only API never imports unused symbols.

use crate::config::{JobConfig, TransportContract};
use crate::emitters::swr::hook_key;
use crate::emitters::{delegate_call, render_module, success_type_name, ParamsShape};
use crate::ir::api::OperationContext;
use crate::ir::emit::Emit;
use crate::ir::ts::{ImportItem, ImportKind, TsFunction, TsImport, TsParam, TsStmt, TsType};

/// Emit the full `react-query.ts` module.
pub fn emit_react_query_module(ops: &[OperationContext], job: &JobConfig) -> String {
    let has_queries = ops.iter().any(|op| op.method.is_query());
    let has_mutations = ops.iter().any(|op| !op.method.is_query());

    let mut items = Vec::new();
    if has_queries {
        items.push(ImportItem::value("useQuery"));
    }
    if has_mutations {
        items.push(ImportItem::value("useMutation"));
    }
    if has_queries {
        items.push(ImportItem::type_of("UseQueryOptions"));
    }
    if has_mutations {
        items.push(ImportItem::type_of("UseMutationOptions"));
    }

    let mut imports = Vec::new();
    if !items.is_empty() {
        imports.push(TsImport {
            kind: ImportKind::Named { items },
            from: "@tanstack/react-query".into(),
        });
    }
    imports.push(TsImport {
        kind: ImportKind::Namespace {
            alias: "operations".into(),
            type_only: false,
        },
        from: "./operations".into(),
    });
    imports.push(TsImport {
        kind: ImportKind::Namespace {
            alias: "types".into(),
            type_only: true,
        },
        from: "./types".into(),
    });

    let blocks = ops
        .iter()
        .map(|op| {
            if op.method.is_query() {
                query_hook(op, job).emit()
            } else {
                mutation_hook(op, job).emit()
            }
        })
        .collect();
    render_module(&imports, blocks)
}

fn query_hook(op: &OperationContext, job: &JobConfig) -> TsFunction {
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
    params.push(TsParam {
        name: "options".into(),
        ty: TsType::Ref(format!(
            "Omit<UseQueryOptions<{success}>, \"queryKey\" | \"queryFn\">"
        )),
        optional: true,
    });

    let key = hook_key(op, shape.as_ref());
    let fetcher = delegate_call(
        "()",
        &op.client_fn_name(),
        shape.as_ref().map(|_| "params"),
        job.transport,
    );

    TsFunction {
        name: format!("use{}Query", op.fn_name),
        params,
        return_type: None,
        body: vec![TsStmt::Raw(format!(
            "return useQuery<{success}>({{\n  queryKey: {key},\n  queryFn: {fetcher},\n  ...options,\n}});"
        ))],
        is_async: false,
    }
}

fn mutation_hook(op: &OperationContext, job: &JobConfig) -> TsFunction {
    let shape = ParamsShape::of(op);
    let success = format!("types.{}", success_type_name(op));

    let variables_type = match &shape {
        Some(shape) => shape.object_type(op).emit(),
        None => "void".to_string(),
    };
    let trigger = match &shape {
        Some(_) => delegate_call(
            "(variables)",
            &op.client_fn_name(),
            Some("variables"),
            job.transport,
        ),
        None => delegate_call("()", &op.client_fn_name(), None, job.transport),
    };

    TsFunction {
        name: format!("use{}Mutation", op.fn_name),
        params: vec![TsParam {
            name: "options".into(),
            ty: TsType::Ref(format!(
                "UseMutationOptions<{success}, Error, {variables_type}>"
            )),
            optional: true,
        }],
        return_type: None,
        body: vec![TsStmt::Raw(format!(
            "return useMutation({{\n  mutationFn: {trigger},\n  ...options,\n}});"
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

    fn job() -> JobConfig {
        JobConfig {
            input: "./openapi.json".into(),
            output: "./src/api".into(),
            fetch_client: "./src/lib/fetch-client".into(),
            api_error: None,
            type_style: TypeStyle::Plain,
            hooks: vec![HookFlavor::ReactQuery],
            transport: TransportContract::Throw,
            methods: HttpMethod::accepted(),
            base_url: None,
        }
    }

    fn list_users_op() -> OperationContext {
        OperationContext {
            operation_id: "listUsers".into(),
            fn_name: "ListUsers".into(),
            method: HttpMethod::Get,
            path: "/v1/users".into(),
            params: vec![ParamContext {
                name: "page".into(),
                location: ParamLocation::Query,
                required: false,
                schema: SchemaNode::Integer,
            }],
            request_body: None,
            responses: vec![ResponseContext {
                status: "200".into(),
                json_schema: Some(SchemaNode::Map),
            }],
        }
    }

    fn create_user_op() -> OperationContext {
        OperationContext {
            operation_id: "createUser".into(),
            fn_name: "CreateUser".into(),
            method: HttpMethod::Post,
            path: "/v1/users".into(),
            params: Vec::new(),
            request_body: Some(SchemaNode::Map),
            responses: vec![ResponseContext {
                status: "201".into(),
                json_schema: Some(SchemaNode::Map),
            }],
        }
    }

    #[test]
    fn test_query_and_mutation_hooks() {
        let module = emit_react_query_module(&[list_users_op(), create_user_op()], &job());
        assert!(module.contains(
            "export function useListUsersQuery(params?: { queryParams?: types.ListUsersQueryParams }, options?: Omit<UseQueryOptions<types.ListUsersSuccessResponse>, \"queryKey\" | \"queryFn\">) {"
        ));
        assert!(module.contains("queryKey: [\"listUsers\", params?.queryParams],"));
        assert!(module.contains("queryFn: () => operations.listUsers(params),"));
        assert!(module.contains(
            "export function useCreateUserMutation(options?: UseMutationOptions<types.CreateUserSuccessResponse, Error, { requestBody: types.CreateUserRequestBody }>) {"
        ));
        assert!(module.contains("mutationFn: (variables) => operations.createUser(variables),"));
    }

    #[test]
    fn test_conditional_imports_query_only() {
        let module = emit_react_query_module(&[list_users_op()], &job());
        assert!(module.contains("useQuery"));
        assert!(module.contains("UseQueryOptions"));
        assert!(!module.contains("useMutation"));
        assert!(!module.contains("UseMutationOptions"));
    }

    #[test]
    fn test_conditional_imports_mutation_only() {
        let module = emit_react_query_module(&[create_user_op()], &job());
        assert!(module.contains("useMutation"));
        assert!(module.contains("UseMutationOptions"));
        assert!(!module.contains("useQuery"));
        assert!(!module.contains("UseQueryOptions"));
    }

    #[test]
    fn test_mutation_without_input_takes_void_variables() {
        let mut op = create_user_op();
        op.request_body = None;
        let module = emit_react_query_module(&[op], &job());
        assert!(module.contains(
            "UseMutationOptions<types.CreateUserSuccessResponse, Error, void>"
        ));
        assert!(module.contains("mutationFn: () => operations.createUser(),"));
    }

    #[test]
    fn test_result_contract_unwraps_in_delegates() {
        let mut j = job();
        j.transport = TransportContract::Result;
        let module = emit_react_query_module(&[list_users_op(), create_user_op()], &j);
        assert!(module.contains(
            "queryFn: () => operations.listUsers(params).then((res) => { if (res.error != null) throw res.error; return res.data; }),"
        ));
        assert!(module.contains(
            "mutationFn: (variables) => operations.createUser(variables).then((res) => { if (res.error != null) throw res.error; return res.data; }),"
        ));
    }
}
