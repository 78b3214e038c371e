//! Shared helpers for symbol naming and module path computation.

use std::path::Component;

/// Uppercase the first letter, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter, leaving the rest untouched.
pub fn decapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Check if a property name needs quoting in TypeScript source.
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            .unwrap_or(false)
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for a double-quoted JS/TS string literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key when it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Compute the module specifier the generated client uses to import a
/// configured module (transport or error class).
///
/// Bare package specifiers pass through verbatim; relative/absolute
/// paths are rewritten relative to the output directory and stripped of
/// a `.ts` extension.
pub fn relative_module_path(from_dir: &str, target: &str) -> String {
    if !target.starts_with('.') && !target.starts_with('/') {
        return target.to_string();
    }

    let from = normalize_components(from_dir);
    let mut to = normalize_components(target);

    let file = to.pop().unwrap_or_default();
    let file = file.strip_suffix(".ts").unwrap_or(&file).to_string();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    parts.extend(to[common..].iter().cloned());
    parts.push(file);

    if parts.first().map(String::as_str) == Some("..") {
        parts.join("/")
    } else {
        format!("./{}", parts.join("/"))
    }
}

/// Split a path string into normalized components, dropping `.` and the
/// leading current-dir marker and folding `..` where possible.
fn normalize_components(path: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for component in std::path::Path::new(path).components() {
        match component {
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                if out.last().is_some_and(|last| last != "..") {
                    out.pop();
                } else {
                    out.push("..".to_string());
                }
            }
            Component::Normal(part) => out.push(part.to_string_lossy().into_owned()),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("listUsers"), "ListUsers");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("X"), "X");
    }

    #[test]
    fn test_decapitalize_first() {
        assert_eq!(decapitalize_first("ListUsers"), "listUsers");
        assert_eq!(decapitalize_first("HTTPCheck"), "hTTPCheck");
        assert_eq!(decapitalize_first(""), "");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("page"), "page");
        assert_eq!(quote_if_needed("x-request-id"), "\"x-request-id\"");
        assert_eq!(quote_if_needed("123abc"), "\"123abc\"");
        assert_eq!(quote_if_needed("with.dots"), "\"with.dots\"");
    }

    #[test]
    fn test_relative_module_path_sibling_dir() {
        assert_eq!(
            relative_module_path("./src/api", "./src/lib/fetch-client"),
            "../lib/fetch-client"
        );
    }

    #[test]
    fn test_relative_module_path_same_dir() {
        assert_eq!(
            relative_module_path("./src/api", "./src/api/fetch-client.ts"),
            "./fetch-client"
        );
    }

    #[test]
    fn test_relative_module_path_parent() {
        assert_eq!(
            relative_module_path("./src/api/operations", "./src/api/fetchClient"),
            "../fetchClient"
        );
    }

    #[test]
    fn test_bare_package_specifier_passes_through() {
        assert_eq!(
            relative_module_path("./src/api", "@acme/fetch-client"),
            "@acme/fetch-client"
        );
        assert_eq!(relative_module_path("./src/api", "swr"), "swr");
    }
}
