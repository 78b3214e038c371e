//! TypeScript AST IR for code generation.
//!
//! Emitters build these trees instead of concatenating strings; the
//! rendering rules live in one place (`emit`), so ordering, quoting and
//! de-duplication behave identically across every emitter.

/// TypeScript type representation.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, unknown.
    Primitive(TsPrimitive),
    /// Array type: `T[]`.
    Array(Box<TsType>),
    /// Union type: `A | B`.
    Union(Vec<TsType>),
    /// Intersection type: `A & B`.
    Intersection(Vec<TsType>),
    /// Inline object type: `{ foo: string; bar?: number }`.
    Object(Vec<TsProp>),
    /// String-keyed map type: `Record<string, V>`.
    Record(Box<TsType>),
    /// Named type reference, emitted verbatim.
    Ref(String),
}

/// TypeScript primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Unknown,
}

/// Object property definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// Top-level type declaration.
#[derive(Debug, Clone)]
pub struct TsTypeDef {
    /// Exported type symbol name.
    pub name: String,
    pub kind: TypeDefKind,
}

/// Type declaration kind.
#[derive(Debug, Clone)]
pub enum TypeDefKind {
    /// `export interface Name { ... }`
    Interface { properties: Vec<TsProp> },
    /// `export type Name = ...;`
    TypeAlias { ty: TsType },
    /// Paired zod declaration, schema const first:
    /// `export const nameSchema = ...;`
    /// `export type Name = z.infer<typeof nameSchema>;`
    ZodSchema { schema_name: String, expr: ZodExpr },
}

/// Runtime-checkable schema expression (zod).
#[derive(Debug, Clone, PartialEq)]
pub enum ZodExpr {
    String,
    Number,
    Int,
    Boolean,
    Unknown,
    Array(Box<ZodExpr>),
    Object(Vec<ZodProp>),
    Record(Box<ZodExpr>),
    Union(Vec<ZodExpr>),
    Intersection(Vec<ZodExpr>),
}

/// One property inside a zod object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ZodProp {
    pub name: String,
    pub expr: ZodExpr,
    pub optional: bool,
}

/// Import statement.
#[derive(Debug, Clone)]
pub struct TsImport {
    pub kind: ImportKind,
    pub from: String,
}

/// Import statement shape.
#[derive(Debug, Clone)]
pub enum ImportKind {
    /// `import name from "m";` / `import type name from "m";`
    Default { name: String, type_only: bool },
    /// `import * as alias from "m";` / `import type * as alias from "m";`
    Namespace { alias: String, type_only: bool },
    /// `import { a, type B } from "m";`
    Named { items: Vec<ImportItem> },
}

/// One item of a named import.
#[derive(Debug, Clone)]
pub struct ImportItem {
    pub name: String,
    pub type_only: bool,
}

impl ImportItem {
    pub fn value(name: impl Into<String>) -> Self {
        ImportItem {
            name: name.into(),
            type_only: false,
        }
    }

    pub fn type_of(name: impl Into<String>) -> Self {
        ImportItem {
            name: name.into(),
            type_only: true,
        }
    }
}

/// Function parameter.
#[derive(Debug, Clone)]
pub struct TsParam {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// Statement in a function body.
#[derive(Debug, Clone)]
pub enum TsStmt {
    /// `const name = init;`
    ConstDecl { name: String, init: TsExpr },
    /// `if (cond) { ... }`
    If { cond: TsExpr, then_body: Vec<TsStmt> },
    /// `return expr;` / `return;`
    Return(Option<TsExpr>),
    /// Raw code lines, re-indented on emission.
    Raw(String),
}

/// TypeScript expression.
#[derive(Debug, Clone)]
pub enum TsExpr {
    /// Identifier: `foo`.
    Ident(String),
    /// Double-quoted string literal.
    Str(String),
    /// Template literal: `` `/items/${id}` ``.
    Template(Vec<TemplatePart>),
    /// Function call: `callee(args)`.
    Call {
        callee: Box<TsExpr>,
        args: Vec<TsExpr>,
    },
    /// Constructor call: `new callee(args)`.
    New {
        callee: Box<TsExpr>,
        args: Vec<TsExpr>,
    },
    /// Member access: `object.prop`.
    Member { object: Box<TsExpr>, prop: String },
    /// Conditional: `cond ? a : b`.
    Ternary {
        cond: Box<TsExpr>,
        then_expr: Box<TsExpr>,
        else_expr: Box<TsExpr>,
    },
    /// Raw code that does not fit the AST.
    Raw(String),
}

/// Template literal part.
#[derive(Debug, Clone)]
pub enum TemplatePart {
    /// Static text.
    Static(String),
    /// Interpolated expression: `${expr}`.
    Dynamic(TsExpr),
}

/// Function definition.
#[derive(Debug, Clone)]
pub struct TsFunction {
    pub name: String,
    pub params: Vec<TsParam>,
    pub return_type: Option<TsType>,
    pub body: Vec<TsStmt>,
    pub is_async: bool,
}
