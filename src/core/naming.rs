//! Structural naming defaults for resource rels and paths
//!
//! When no declarative override is present, a resource takes its rel and path
//! from the identifier as written: the simple type or property name with the
//! first letter lower-cased. No pluralization, no suffix stripping.

/// Lower-camel-case the first character of a name, leaving the rest verbatim.
///
/// # Examples
///
/// ```
/// use rel::core::naming::lower_camel;
///
/// assert_eq!(lower_camel("PlainPerson"), "plainPerson");
/// assert_eq!(lower_camel("findByFirstName"), "findByFirstName");
/// ```
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extract the simple (unqualified) name from a possibly path-qualified type
/// name, e.g. `my_crate::domain::PlainPerson` becomes `PlainPerson`.
///
/// Callers may pass values produced by `std::any::type_name`.
pub fn simple_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// Whether a declared path override carries actual text.
///
/// A value consisting only of whitespace and slashes counts as unset, so a
/// declaration like `path = " / "` falls back to the structural default.
pub fn has_text_except_slash(s: &str) -> bool {
    s.chars().any(|c| !c.is_whitespace() && c != '/')
}

/// Remove a single leading slash from a declared path, after trimming.
///
/// Declared paths may be written as `/people`; the stored path segment is
/// always slash-free.
pub fn strip_leading_slash(s: &str) -> &str {
    s.trim().trim_start_matches('/')
}
