//! Template name resolution.
//!
//! A template reference has the form `namespace::name`. A bare `name` belongs
//! to the wildcard namespace [`WILDCARD`].

use std::fmt;

/// Namespace used when a reference carries no namespace.
pub const WILDCARD: &str = "*";

/// Token separating namespace and name in a reference.
pub const SEPARATOR: &str = "::";

/// Split a raw reference into `(namespace, filename)`.
///
/// The reference is split at the first separator. Input without a separator
/// resolves to the wildcard namespace. Nothing is validated: `"::page"`
/// yields an empty namespace.
///
/// # Example
///
/// ```
/// use dataset::name::resolve;
///
/// assert_eq!(resolve("admin::users"), ("admin".to_string(), "users".to_string()));
/// assert_eq!(resolve("users"), ("*".to_string(), "users".to_string()));
/// ```
pub fn resolve(reference: &str) -> (String, String) {
    match reference.split_once(SEPARATOR) {
        Some((namespace, filename)) => (namespace.to_string(), filename.to_string()),
        None => (WILDCARD.to_string(), reference.to_string()),
    }
}

/// A parsed template reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateReference {
    /// Namespace selecting the search path set.
    pub namespace: String,
    /// Template file name without extension.
    pub name: String,
}

impl TemplateReference {
    /// Parse a raw reference.
    pub fn parse(reference: &str) -> Self {
        let (namespace, name) = resolve(reference);
        Self { namespace, name }
    }

    /// Whether this reference targets the wildcard namespace.
    pub fn is_wildcard(&self) -> bool {
        self.namespace == WILDCARD
    }

    /// Fully qualified `namespace::name` form.
    ///
    /// `page` and `*::page` share the same canonical form.
    pub fn canonical(&self) -> String {
        format!("{}{}{}", self.namespace, SEPARATOR, self.name)
    }
}

impl fmt::Display for TemplateReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
