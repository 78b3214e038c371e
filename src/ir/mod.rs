//! Intermediate representations between the OpenAPI document and the
//! emitted TypeScript source.
//!
//! Two layers:
//! 1. API-level IR (`api`, `normalize`): operations, parameters and
//!    structural schema nodes with every OpenAPI corner case resolved.
//! 2. TypeScript AST IR (`ts`, `emit`): types, imports, functions and
//!    statements, rendered to source text through the `Emit` trait.

pub mod api;
pub mod emit;
pub mod normalize;
pub mod ts;
pub mod utils;

pub use emit::Emit;
pub use normalize::extract_operations;
