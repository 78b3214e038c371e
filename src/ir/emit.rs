//! TypeScript code emission via the `Emit` trait.
//!
//! Purely mechanical string building from AST nodes. Every emitter
//! renders through these impls, so spacing, quoting and declaration
//! layout cannot drift between output modules.

use super::ts::{
    ImportItem, ImportKind, TemplatePart, TsExpr, TsFunction, TsImport, TsParam, TsPrimitive,
    TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind, ZodExpr, ZodProp,
};
use super::utils::{escape_js_string, quote_if_needed};

/// Convert an AST node to its TypeScript source representation.
pub trait Emit {
    fn emit(&self) -> String;
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Unknown => "unknown".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Composite element types need parentheses.
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types
                .iter()
                .map(Emit::emit)
                .collect::<Vec<_>>()
                .join(" | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit();
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(Emit::emit).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Record(value) => format!("Record<string, {}>", value.emit()),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                let mut output = format!("export interface {} {{\n", self.name);
                for prop in properties {
                    let key = quote_if_needed(&prop.name);
                    let opt = if prop.optional { "?" } else { "" };
                    output.push_str(&format!("  {}{}: {};\n", key, opt, prop.ty.emit()));
                }
                output.push('}');
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("export type {} = {};", self.name, ty.emit())
            }
            TypeDefKind::ZodSchema { schema_name, expr } => format!(
                "export const {} = {};\nexport type {} = z.infer<typeof {}>;",
                schema_name,
                expr.emit(),
                self.name,
                schema_name
            ),
        }
    }
}

impl Emit for ZodExpr {
    fn emit(&self) -> String {
        match self {
            ZodExpr::String => "z.string()".to_string(),
            ZodExpr::Number => "z.number()".to_string(),
            ZodExpr::Int => "z.number().int()".to_string(),
            ZodExpr::Boolean => "z.boolean()".to_string(),
            ZodExpr::Unknown => "z.unknown()".to_string(),
            ZodExpr::Array(inner) => format!("z.array({})", inner.emit()),
            ZodExpr::Object(props) => {
                if props.is_empty() {
                    "z.object({})".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(Emit::emit).collect();
                    format!("z.object({{ {} }})", parts.join(", "))
                }
            }
            ZodExpr::Record(value) => format!("z.record({})", value.emit()),
            ZodExpr::Union(members) => {
                let parts: Vec<_> = members.iter().map(Emit::emit).collect();
                format!("z.union([{}])", parts.join(", "))
            }
            ZodExpr::Intersection(members) => {
                let mut parts = members.iter().map(Emit::emit);
                let first = parts.next().unwrap_or_else(|| "z.unknown()".to_string());
                parts.fold(first, |acc, next| format!("{acc}.and({next})"))
            }
        }
    }
}

impl Emit for ZodProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { ".optional()" } else { "" };
        format!("{}: {}{}", key, self.expr.emit(), opt)
    }
}

impl Emit for ImportItem {
    fn emit(&self) -> String {
        if self.type_only {
            format!("type {}", self.name)
        } else {
            self.name.clone()
        }
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        match &self.kind {
            ImportKind::Default { name, type_only } => {
                let type_keyword = if *type_only { "type " } else { "" };
                format!("import {}{} from \"{}\";", type_keyword, name, self.from)
            }
            ImportKind::Namespace { alias, type_only } => {
                let type_keyword = if *type_only { "type " } else { "" };
                format!(
                    "import {}* as {} from \"{}\";",
                    type_keyword, alias, self.from
                )
            }
            ImportKind::Named { items } => {
                let items_str = items.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("import {{ {} }} from \"{}\";", items_str, self.from)
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", self.name, opt, self.ty.emit())
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Str(value) => format!("\"{}\"", escape_js_string(value)),
            TsExpr::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|part| match part {
                        TemplatePart::Static(s) => s.clone(),
                        TemplatePart::Dynamic(expr) => format!("${{{}}}", expr.emit()),
                    })
                    .collect();
                format!("`{content}`")
            }
            TsExpr::Call { callee, args } => {
                let args_str = args.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("{}({})", callee.emit(), args_str)
            }
            TsExpr::New { callee, args } => {
                let args_str = args.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("new {}({})", callee.emit(), args_str)
            }
            TsExpr::Member { object, prop } => format!("{}.{}", object.emit(), prop),
            TsExpr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => format!(
                "{} ? {} : {}",
                cond.emit(),
                then_expr.emit(),
                else_expr.emit()
            ),
            TsExpr::Raw(code) => code.clone(),
        }
    }
}

impl TsStmt {
    /// Emit with the given indentation level (two spaces per level).
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            TsStmt::ConstDecl { name, init } => {
                format!("{}const {} = {};\n", prefix, name, init.emit())
            }
            TsStmt::If { cond, then_body } => {
                let mut output = format!("{}if ({}) {{\n", prefix, cond.emit());
                for stmt in then_body {
                    output.push_str(&stmt.emit_indented(indent + 1));
                }
                output.push_str(&format!("{prefix}}}\n"));
                output
            }
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{}return {};\n", prefix, e.emit()),
                None => format!("{prefix}return;\n"),
            },
            TsStmt::Raw(code) => code
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        "\n".to_string()
                    } else {
                        format!("{prefix}{line}\n")
                    }
                })
                .collect(),
        }
    }
}

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let async_str = if self.is_async { "async " } else { "" };
        let params_str = self
            .params
            .iter()
            .map(Emit::emit)
            .collect::<Vec<_>>()
            .join(", ");
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();

        let mut output = format!(
            "export {}function {}({}){} {{\n",
            async_str, self.name, params_str, return_type_str
        );
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push('}');
        output
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_primitives() {
        assert_eq!(TsType::Primitive(TsPrimitive::String).emit(), "string");
        assert_eq!(TsType::Primitive(TsPrimitive::Number).emit(), "number");
        assert_eq!(TsType::Primitive(TsPrimitive::Boolean).emit(), "boolean");
        assert_eq!(TsType::Primitive(TsPrimitive::Unknown).emit(), "unknown");
    }

    #[test]
    fn test_emit_array_of_union_is_parenthesized() {
        let ty = TsType::Array(Box::new(TsType::Union(vec![
            TsType::Primitive(TsPrimitive::String),
            TsType::Primitive(TsPrimitive::Number),
        ])));
        assert_eq!(ty.emit(), "(string | number)[]");
    }

    #[test]
    fn test_emit_intersection_with_union_member() {
        let ty = TsType::Intersection(vec![
            TsType::Ref("Base".into()),
            TsType::Union(vec![
                TsType::Primitive(TsPrimitive::String),
                TsType::Primitive(TsPrimitive::Number),
            ]),
        ]);
        assert_eq!(ty.emit(), "Base & (string | number)");
    }

    #[test]
    fn test_emit_inline_object() {
        let ty = TsType::Object(vec![
            TsProp {
                name: "id".into(),
                ty: TsType::Primitive(TsPrimitive::String),
                optional: false,
            },
            TsProp {
                name: "name".into(),
                ty: TsType::Primitive(TsPrimitive::String),
                optional: true,
            },
        ]);
        assert_eq!(ty.emit(), "{ id: string; name?: string }");
    }

    #[test]
    fn test_emit_record() {
        let ty = TsType::Record(Box::new(TsType::Primitive(TsPrimitive::Unknown)));
        assert_eq!(ty.emit(), "Record<string, unknown>");
    }

    #[test]
    fn test_emit_interface() {
        let def = TsTypeDef {
            name: "ListUsersQueryParams".into(),
            kind: TypeDefKind::Interface {
                properties: vec![TsProp {
                    name: "page".into(),
                    ty: TsType::Primitive(TsPrimitive::Number),
                    optional: true,
                }],
            },
        };
        assert_eq!(
            def.emit(),
            "export interface ListUsersQueryParams {\n  page?: number;\n}"
        );
    }

    #[test]
    fn test_emit_interface_quotes_exotic_keys() {
        let def = TsTypeDef {
            name: "Weird".into(),
            kind: TypeDefKind::Interface {
                properties: vec![TsProp {
                    name: "x-request-id".into(),
                    ty: TsType::Primitive(TsPrimitive::String),
                    optional: false,
                }],
            },
        };
        assert!(def.emit().contains("\"x-request-id\": string;"));
    }

    #[test]
    fn test_emit_zod_pair_schema_first() {
        let def = TsTypeDef {
            name: "ListUsersQueryParams".into(),
            kind: TypeDefKind::ZodSchema {
                schema_name: "listUsersQueryParamsSchema".into(),
                expr: ZodExpr::Object(vec![ZodProp {
                    name: "page".into(),
                    expr: ZodExpr::Int,
                    optional: true,
                }]),
            },
        };
        assert_eq!(
            def.emit(),
            "export const listUsersQueryParamsSchema = z.object({ page: z.number().int().optional() });\nexport type ListUsersQueryParams = z.infer<typeof listUsersQueryParamsSchema>;"
        );
    }

    #[test]
    fn test_emit_zod_intersection_chains_and() {
        let expr = ZodExpr::Intersection(vec![ZodExpr::Unknown, ZodExpr::String, ZodExpr::Number]);
        assert_eq!(expr.emit(), "z.unknown().and(z.string()).and(z.number())");
    }

    #[test]
    fn test_emit_imports() {
        let default = TsImport {
            kind: ImportKind::Default {
                name: "fetchClient".into(),
                type_only: false,
            },
            from: "../lib/fetch-client".into(),
        };
        assert_eq!(
            default.emit(),
            "import fetchClient from \"../lib/fetch-client\";"
        );

        let namespace = TsImport {
            kind: ImportKind::Namespace {
                alias: "types".into(),
                type_only: true,
            },
            from: "./types".into(),
        };
        assert_eq!(namespace.emit(), "import type * as types from \"./types\";");

        let named = TsImport {
            kind: ImportKind::Named {
                items: vec![
                    ImportItem::value("useQuery"),
                    ImportItem::type_of("UseQueryOptions"),
                ],
            },
            from: "@tanstack/react-query".into(),
        };
        assert_eq!(
            named.emit(),
            "import { useQuery, type UseQueryOptions } from \"@tanstack/react-query\";"
        );
    }

    #[test]
    fn test_emit_function() {
        let func = TsFunction {
            name: "ping".into(),
            params: vec![TsParam {
                name: "init".into(),
                ty: TsType::Ref("RequestInit".into()),
                optional: true,
            }],
            return_type: Some(TsType::Ref("Promise<void>".into())),
            body: vec![TsStmt::Return(None)],
            is_async: true,
        };
        assert_eq!(
            func.emit(),
            "export async function ping(init?: RequestInit): Promise<void> {\n  return;\n}"
        );
    }

    #[test]
    fn test_emit_if_and_raw_indentation() {
        let stmt = TsStmt::If {
            cond: TsExpr::Ident("queryParams".into()),
            then_body: vec![TsStmt::Raw(
                "Object.entries(queryParams).forEach(([key, value]) => {\n  searchParams.append(key, String(value));\n});".into(),
            )],
        };
        let emitted = stmt.emit_indented(1);
        assert!(emitted.starts_with("  if (queryParams) {\n"));
        assert!(emitted.contains("    Object.entries(queryParams)"));
        assert!(emitted.contains("      searchParams.append"));
        assert!(emitted.ends_with("  }\n"));
    }
}
