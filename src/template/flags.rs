//! Per-template caching and extending state.

use serde::{Deserialize, Serialize};

use crate::name::{SEPARATOR, WILDCARD};

/// Flag token that disables caching.
pub const DISABLE_CACHE: &str = "disable cache";

/// Flag token that disables extending.
pub const DISABLE_EXTENDING: &str = "disable extending";

/// Parent reference plus the caching and extending switches of a template.
///
/// Both switches start disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateFlags {
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    caching: bool,
    #[serde(default)]
    extending: bool,
}

impl TemplateFlags {
    /// Create flags with everything disabled and no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference of the template to extend, if any.
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    /// Store the parent reference.
    ///
    /// A reference qualified with a namespace is stored verbatim. An
    /// unqualified reference, or one starting with the separator, is moved
    /// into the wildcard namespace: `base` and `::base` both become `*::base`.
    pub fn set_extends(&mut self, extends: Option<&str>) {
        self.extends = extends.map(|reference| match reference.find(SEPARATOR) {
            Some(position) if position > 0 => reference.to_string(),
            Some(_) => format!("{}{}", WILDCARD, reference),
            None => format!("{}{}{}", WILDCARD, SEPARATOR, reference),
        });
    }

    pub fn enable_cache(&mut self) {
        self.caching = true;
    }

    pub fn disable_cache(&mut self) {
        self.caching = false;
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.caching
    }

    pub fn enable_extending(&mut self) {
        self.extending = true;
    }

    pub fn disable_extending(&mut self) {
        self.extending = false;
    }

    pub fn is_extending_enabled(&self) -> bool {
        self.extending
    }

    /// Set both switches from a set of flag tokens.
    ///
    /// Each switch is enabled unless its disabling token is present, so the
    /// result does not depend on the previous state.
    pub fn set_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut disable_cache = false;
        let mut disable_extending = false;

        for flag in flags {
            match flag.as_ref() {
                DISABLE_CACHE => disable_cache = true,
                DISABLE_EXTENDING => disable_extending = true,
                other => tracing::debug!("Ignoring unknown template flag '{}'", other),
            }
        }

        if disable_cache {
            self.disable_cache();
        } else {
            self.enable_cache();
        }

        if disable_extending {
            self.disable_extending();
        } else {
            self.enable_extending();
        }
    }
}
