//! Source emitters: one per generated module.
//!
//! Every emitter is a pure function of the extracted operation list (and
//! job configuration), producing the full text of one output module.
//! Shared declaration naming and module assembly live here so the
//! emitted modules agree on symbol names and layout.

pub mod client;
pub mod react_query;
pub mod swr;
pub mod types;
pub mod zod;

use indexmap::IndexSet;

use crate::ir::api::OperationContext;
use crate::ir::emit::Emit;
use crate::ir::ts::{TsImport, TsProp, TsType};
use crate::ir::utils::decapitalize_first;

/// Fixed output file name of the type-declaration module.
pub const TYPES_FILE: &str = "types.ts";
/// Fixed output file name of the client-functions module.
pub const OPERATIONS_FILE: &str = "operations.ts";
/// Fixed output file name of the re-export barrel.
pub const INDEX_FILE: &str = "index.ts";

pub fn path_params_type_name(op: &OperationContext) -> String {
    format!("{}PathParams", op.fn_name)
}

pub fn query_params_type_name(op: &OperationContext) -> String {
    format!("{}QueryParams", op.fn_name)
}

pub fn request_body_type_name(op: &OperationContext) -> String {
    format!("{}RequestBody", op.fn_name)
}

pub fn response_type_name(op: &OperationContext, status: u16) -> String {
    format!("{}{}Response", op.fn_name, status)
}

/// Alias resolved by client functions: the first 2xx response type.
pub fn success_type_name(op: &OperationContext) -> String {
    format!("{}SuccessResponse", op.fn_name)
}

/// Schema const name for a type symbol (schema-validated style).
pub fn schema_const_name(type_name: &str) -> String {
    format!("{}Schema", decapitalize_first(type_name))
}

/// One slot of a client function's parameter object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSlot {
    PathParams,
    QueryParams,
    RequestBody,
}

impl ParamSlot {
    pub fn field_name(self) -> &'static str {
        match self {
            ParamSlot::PathParams => "pathParams",
            ParamSlot::QueryParams => "queryParams",
            ParamSlot::RequestBody => "requestBody",
        }
    }

    fn type_name(self, op: &OperationContext) -> String {
        match self {
            ParamSlot::PathParams => path_params_type_name(op),
            ParamSlot::QueryParams => query_params_type_name(op),
            ParamSlot::RequestBody => request_body_type_name(op),
        }
    }

    /// Query parameters are the only slot a caller may omit.
    fn is_optional(self) -> bool {
        matches!(self, ParamSlot::QueryParams)
    }
}

/// Shape of the single parameter object of a client function: which
/// slots exist and whether the object as a whole can be omitted.
#[derive(Debug, Clone)]
pub struct ParamsShape {
    pub slots: Vec<ParamSlot>,
    pub optional: bool,
}

impl ParamsShape {
    /// Compute the parameter object for an operation. `None` when the
    /// operation takes no input at all: such functions take no `params`
    /// argument rather than a required empty object.
    pub fn of(op: &OperationContext) -> Option<ParamsShape> {
        let mut slots = Vec::new();
        if op.has_path_params() {
            slots.push(ParamSlot::PathParams);
        }
        if op.has_query_params() {
            slots.push(ParamSlot::QueryParams);
        }
        if op.has_request_body() {
            slots.push(ParamSlot::RequestBody);
        }
        if slots.is_empty() {
            return None;
        }
        let optional = slots.iter().all(|slot| slot.is_optional());
        Some(ParamsShape { slots, optional })
    }

    /// Same as [`ParamsShape::of`] but restricted to path/query slots;
    /// used by query hooks, which never carry a body.
    pub fn of_query_hook(op: &OperationContext) -> Option<ParamsShape> {
        let mut slots = Vec::new();
        if op.has_path_params() {
            slots.push(ParamSlot::PathParams);
        }
        if op.has_query_params() {
            slots.push(ParamSlot::QueryParams);
        }
        if slots.is_empty() {
            return None;
        }
        let optional = slots.iter().all(|slot| slot.is_optional());
        Some(ParamsShape { slots, optional })
    }

    /// Inline object type of the parameter, referencing the types module.
    pub fn object_type(&self, op: &OperationContext) -> TsType {
        TsType::Object(
            self.slots
                .iter()
                .map(|slot| TsProp {
                    name: slot.field_name().to_string(),
                    ty: TsType::Ref(format!("types.{}", slot.type_name(op))),
                    optional: slot.is_optional(),
                })
                .collect(),
        )
    }

    pub fn has(&self, slot: ParamSlot) -> bool {
        self.slots.contains(&slot)
    }
}

/// Arrow function delegating to a generated client function, as used by
/// hook fetchers and mutation triggers. Result-contract jobs unwrap the
/// returned value so hook data types stay the plain success type.
pub(crate) fn delegate_call(
    arrow_params: &str,
    fn_name: &str,
    call_arg: Option<&str>,
    transport: crate::config::TransportContract,
) -> String {
    let call = match call_arg {
        Some(arg) => format!("operations.{fn_name}({arg})"),
        None => format!("operations.{fn_name}()"),
    };
    match transport {
        crate::config::TransportContract::Throw => format!("{arrow_params} => {call}"),
        crate::config::TransportContract::Result => format!(
            "{arrow_params} => {call}.then((res) => {{ if (res.error != null) throw res.error; return res.data; }})"
        ),
    }
}

/// Assemble a module from imports and declaration blocks.
///
/// Blocks are de-duplicated by their emitted text, first occurrence
/// winning, and separated by blank lines. Output is byte-stable for
/// identical input.
pub fn render_module(imports: &[TsImport], blocks: Vec<String>) -> String {
    let unique: IndexSet<String> = blocks.into_iter().collect();

    let mut sections: Vec<String> = Vec::new();
    if !imports.is_empty() {
        sections.push(
            imports
                .iter()
                .map(Emit::emit)
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    sections.extend(unique);

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::api::{HttpMethod, ParamContext, ParamLocation, SchemaNode};

    fn op_with(params: Vec<ParamContext>, body: bool) -> OperationContext {
        OperationContext {
            operation_id: "getRoom".into(),
            fn_name: "GetRoom".into(),
            method: HttpMethod::Get,
            path: "/rooms/{roomId}".into(),
            params,
            request_body: body.then_some(SchemaNode::Map),
            responses: Vec::new(),
        }
    }

    fn param(name: &str, location: ParamLocation) -> ParamContext {
        ParamContext {
            name: name.into(),
            location,
            required: location == ParamLocation::Path,
            schema: SchemaNode::String,
        }
    }

    #[test]
    fn test_params_shape_absent_when_operation_takes_nothing() {
        assert!(ParamsShape::of(&op_with(Vec::new(), false)).is_none());
    }

    #[test]
    fn test_params_shape_optional_only_for_pure_query() {
        let shape = ParamsShape::of(&op_with(vec![param("page", ParamLocation::Query)], false))
            .unwrap();
        assert!(shape.optional);

        let shape = ParamsShape::of(&op_with(
            vec![
                param("roomId", ParamLocation::Path),
                param("page", ParamLocation::Query),
            ],
            false,
        ))
        .unwrap();
        assert!(!shape.optional);

        let shape = ParamsShape::of(&op_with(Vec::new(), true)).unwrap();
        assert!(!shape.optional);
        assert_eq!(shape.slots, vec![ParamSlot::RequestBody]);
    }

    #[test]
    fn test_params_object_type_marks_query_optional() {
        let op = op_with(
            vec![
                param("roomId", ParamLocation::Path),
                param("page", ParamLocation::Query),
            ],
            false,
        );
        let shape = ParamsShape::of(&op).unwrap();
        assert_eq!(
            shape.object_type(&op).emit(),
            "{ pathParams: types.GetRoomPathParams; queryParams?: types.GetRoomQueryParams }"
        );
    }

    #[test]
    fn test_render_module_dedups_preserving_first_seen_order() {
        let rendered = render_module(
            &[],
            vec![
                "export type A = string;".into(),
                "export type B = number;".into(),
                "export type A = string;".into(),
            ],
        );
        assert_eq!(
            rendered,
            "export type A = string;\n\nexport type B = number;\n"
        );
    }
}
