//! OpenAPI document handling: loading, dereferencing, legacy conversion
//! and the typed document model.
//!
//! The pipeline is:
//! 1. Load: URL or file -> raw text
//! 2. Parse: JSON/YAML -> raw value
//! 3. Dereference: inline every `$ref` (cycle-safe)
//! 4. Convert: Swagger 2.0 -> OpenAPI 3 (best effort)
//! 5. Deserialize: raw value -> `OpenApiDocument`

pub mod convert;
pub mod deref;
pub mod loader;
pub mod spec;

pub use loader::load_document;
pub use spec::OpenApiDocument;
