//! Client-functions module emitter.
//!
//! One exported async function per operation. Each function builds its
//! URL from the path template, serializes query parameters, delegates to
//! the configured transport and resolves to the operation's declared
//! success type. The request options merge is fixed: caller-supplied
//! `init` spreads first, so caller headers override generator defaults
//! while `method` and `body` stay generator-authoritative.

use crate::config::{JobConfig, TransportContract};
use crate::emitters::{render_module, success_type_name, ParamSlot, ParamsShape};
use crate::ir::api::OperationContext;
use crate::ir::emit::Emit;
use crate::ir::ts::{
    ImportKind, TemplatePart, TsExpr, TsFunction, TsImport, TsParam, TsStmt, TsType,
};
use crate::ir::utils::{escape_js_string, needs_quoting, relative_module_path};

/// Emit the full `operations.ts` module.
pub fn emit_client_module(ops: &[OperationContext], job: &JobConfig) -> String {
    let mut imports = vec![TsImport {
        kind: ImportKind::Default {
            name: "fetchClient".into(),
            type_only: false,
        },
        from: relative_module_path(&job.output, &job.fetch_client),
    }];
    if job.transport == TransportContract::Result {
        if let Some(api_error) = &job.api_error {
            imports.push(TsImport {
                kind: ImportKind::Default {
                    name: "ApiError".into(),
                    type_only: true,
                },
                from: relative_module_path(&job.output, api_error),
            });
        }
    }
    imports.push(TsImport {
        kind: ImportKind::Namespace {
            alias: "types".into(),
            type_only: true,
        },
        from: "./types".into(),
    });

    let mut blocks = Vec::new();
    if job.transport == TransportContract::Result {
        blocks.push(result_type_decl(job));
    }
    for op in ops {
        blocks.push(client_function(op, job).emit());
    }
    render_module(&imports, blocks)
}

/// The `Result` shape the result-contract transport resolves to.
fn result_type_decl(job: &JobConfig) -> String {
    let default_error = if job.api_error.is_some() {
        "ApiError"
    } else {
        "unknown"
    };
    format!(
        "export type Result<T, E = {default_error}> =\n  | {{ data: T; error: null }}\n  | {{ data: null; error: E }};"
    )
}

fn client_function(op: &OperationContext, job: &JobConfig) -> TsFunction {
    let shape = ParamsShape::of(op);
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
        name: "init".into(),
        ty: TsType::Ref("RequestInit".into()),
        optional: true,
    });

    let return_type = match job.transport {
        TransportContract::Result => TsType::Ref(format!("Promise<Result<{success}>>")),
        TransportContract::Throw => TsType::Ref(format!("Promise<{success}>")),
    };

    let mut body = Vec::new();

    if let Some(shape) = &shape {
        let fields: Vec<&str> = shape.slots.iter().map(|s| s.field_name()).collect();
        let source = if shape.optional { "params ?? {}" } else { "params" };
        body.push(TsStmt::Raw(format!(
            "const {{ {} }} = {};",
            fields.join(", "),
            source
        )));
    }

    body.push(TsStmt::ConstDecl {
        name: "url".into(),
        init: url_expr(op, job),
    });

    let has_query = shape
        .as_ref()
        .is_some_and(|s| s.has(ParamSlot::QueryParams));
    if has_query {
        body.push(TsStmt::ConstDecl {
            name: "searchParams".into(),
            init: TsExpr::New {
                callee: Box::new(TsExpr::Ident("URLSearchParams".into())),
                args: Vec::new(),
            },
        });
        body.push(TsStmt::If {
            cond: TsExpr::Ident("queryParams".into()),
            then_body: vec![TsStmt::Raw(
                "Object.entries(queryParams).forEach(([key, value]) => {\n  if (value != null) {\n    searchParams.append(key, String(value));\n  }\n});"
                    .into(),
            )],
        });
        body.push(TsStmt::ConstDecl {
            name: "queryString".into(),
            init: TsExpr::Call {
                callee: Box::new(TsExpr::Member {
                    object: Box::new(TsExpr::Ident("searchParams".into())),
                    prop: "toString".into(),
                }),
                args: Vec::new(),
            },
        });
        body.push(TsStmt::ConstDecl {
            name: "fullUrl".into(),
            init: TsExpr::Ternary {
                cond: Box::new(TsExpr::Ident("queryString".into())),
                then_expr: Box::new(TsExpr::Template(vec![
                    TemplatePart::Dynamic(TsExpr::Ident("url".into())),
                    TemplatePart::Static("?".into()),
                    TemplatePart::Dynamic(TsExpr::Ident("queryString".into())),
                ])),
                else_expr: Box::new(TsExpr::Ident("url".into())),
            },
        });
    }
    let url_var = if has_query { "fullUrl" } else { "url" };

    let options = request_options(op);
    match job.transport {
        TransportContract::Result => {
            body.push(TsStmt::ConstDecl {
                name: "res".into(),
                init: TsExpr::Raw(format!(
                    "await fetchClient<{success}>({url_var}, {{ {options} }})"
                )),
            });
            body.push(TsStmt::Return(Some(TsExpr::Ident("res".into()))));
        }
        TransportContract::Throw => {
            body.push(TsStmt::ConstDecl {
                name: "res".into(),
                init: TsExpr::Raw(format!("await fetchClient({url_var}, {{ {options} }})")),
            });
            body.push(TsStmt::Raw(
                "if (!res.ok) {\n  throw new Error(`HTTP error! status: ${res.status}`);\n}"
                    .into(),
            ));
            body.push(TsStmt::Return(Some(TsExpr::Raw(format!(
                "(await res.json()) as {success}"
            )))));
        }
    }

    TsFunction {
        name: op.client_fn_name(),
        params,
        return_type: Some(return_type),
        body,
        is_async: true,
    }
}

/// Request options literal body. Caller `init` first; `method` always;
/// JSON content type and serialized body only when a request body exists,
/// with caller headers merged on top of the content-type default.
fn request_options(op: &OperationContext) -> String {
    let mut options = format!("...init, method: \"{}\"", op.method.as_str());
    if op.has_request_body() {
        options.push_str(
            ", headers: { \"Content-Type\": \"application/json\", ...init?.headers }, body: JSON.stringify(requestBody)",
        );
    }
    options
}

/// URL expression for the operation: a plain string when the template
/// has no substitutable placeholders, a template literal otherwise.
///
/// Substitution is textual: only placeholders matching a declared path
/// parameter are replaced; anything else stays literal in the output.
fn url_expr(op: &OperationContext, job: &JobConfig) -> TsExpr {
    let declared: Vec<&str> = op.path_params().iter().map(|p| p.name.as_str()).collect();
    let full_path = match &job.base_url {
        Some(base) => format!("{}{}", base, op.path),
        None => op.path.clone(),
    };

    let mut parts: Vec<TemplatePart> = Vec::new();
    let mut current = String::new();
    let mut placeholder = String::new();
    let mut in_placeholder = false;

    for c in full_path.chars() {
        match c {
            '{' if !in_placeholder => {
                in_placeholder = true;
                placeholder.clear();
            }
            '}' if in_placeholder => {
                in_placeholder = false;
                if declared.contains(&placeholder.as_str()) {
                    if !current.is_empty() {
                        parts.push(TemplatePart::Static(std::mem::take(&mut current)));
                    }
                    parts.push(TemplatePart::Dynamic(TsExpr::Raw(path_param_access(
                        &placeholder,
                    ))));
                } else {
                    current.push('{');
                    current.push_str(&placeholder);
                    current.push('}');
                }
            }
            _ if in_placeholder => placeholder.push(c),
            _ => current.push(c),
        }
    }
    if in_placeholder {
        current.push('{');
        current.push_str(&placeholder);
    }
    if !current.is_empty() {
        parts.push(TemplatePart::Static(current));
    }

    let has_dynamic = parts
        .iter()
        .any(|p| matches!(p, TemplatePart::Dynamic(_)));
    if has_dynamic {
        TsExpr::Template(parts)
    } else {
        let text: String = parts
            .into_iter()
            .map(|p| match p {
                TemplatePart::Static(s) => s,
                TemplatePart::Dynamic(_) => String::new(),
            })
            .collect();
        TsExpr::Str(text)
    }
}

fn path_param_access(name: &str) -> String {
    if needs_quoting(name) {
        format!("pathParams[\"{}\"]", escape_js_string(name))
    } else {
        format!("pathParams.{name}")
    }
}
