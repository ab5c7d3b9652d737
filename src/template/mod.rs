//! Template document model.
//!
//! A [`Template`] is built either from a parsed document tree (see
//! [`Template::from_tree`]) or from a cached payload. It carries its
//! [`TemplateFlags`] and the document nodes in [`document`].
//!
//! # Definition Format
//!
//! ```yaml
//! extends: base
//! flags: [disable cache]
//! sections:
//!   - name: general
//!     groups:
//!       - name: main
//! fields:
//!   - name: title
//!     type: string
//!     section: general
//!     group: main
//! policy:
//!   read: [guest]
//! ```

pub mod document;
pub mod flags;
pub mod merge;

pub use document::{Collection, Field, Group, Named, Policy, Section};
pub use flags::{TemplateFlags, DISABLE_CACHE, DISABLE_EXTENDING};
pub use merge::{deep_merge, Inherit};

use serde::{Deserialize, Serialize};

/// Raw definition keys accepted in template files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateDefinition {
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    sections: Vec<Section>,
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default)]
    policy: Option<Policy>,
}

/// The root document of a loadable template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
    #[serde(default)]
    flags: TemplateFlags,
    #[serde(default)]
    sections: Collection<Section>,
    #[serde(default)]
    fields: Collection<Field>,
    #[serde(default)]
    policy: Option<Policy>,
}

impl Template {
    /// Create an empty template with caching and extending disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a template from a parsed document tree.
    ///
    /// The `extends` reference is normalized and the `flags` list always
    /// sets both switches, so a definition without flags enables caching
    /// and extending. A null tree is an empty definition.
    pub fn from_tree(tree: serde_yaml::Value) -> Result<Self, serde_yaml::Error> {
        let definition: TemplateDefinition = if tree.is_null() {
            TemplateDefinition::default()
        } else {
            serde_yaml::from_value(tree)?
        };

        let mut template = Self::new();
        template.flags.set_extends(definition.extends.as_deref());
        template.flags.set_flags(&definition.flags);
        template.sections = definition
            .sections
            .into_iter()
            .map(|section| Section {
                groups: section.groups.into_iter().collect(),
                ..section
            })
            .collect();
        template.fields = definition.fields.into_iter().collect();
        template.policy = definition.policy;

        Ok(template)
    }

    pub fn flags(&self) -> &TemplateFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut TemplateFlags {
        &mut self.flags
    }

    /// Reference of the parent template, if any.
    pub fn extends(&self) -> Option<&str> {
        self.flags.extends()
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.flags.is_cache_enabled()
    }

    pub fn is_extending_enabled(&self) -> bool {
        self.flags.is_extending_enabled()
    }

    pub fn sections(&self) -> &Collection<Section> {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut Collection<Section> {
        &mut self.sections
    }

    pub fn fields(&self) -> &Collection<Field> {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Collection<Field> {
        &mut self.fields
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn policy(&self) -> Option<&Policy> {
        self.policy.as_ref()
    }

    pub fn set_policy(&mut self, policy: Option<Policy>) {
        self.policy = policy;
    }

    /// Merge a resolved parent beneath this template.
    ///
    /// The parent supplies inherited nodes; this template's own nodes win.
    /// Flags and the `extends` reference stay those of this template.
    pub fn extend(&mut self, parent: Template) {
        let sections = std::mem::take(&mut self.sections);
        self.sections = merge::merge_collections(parent.sections, sections);

        let fields = std::mem::take(&mut self.fields);
        self.fields = merge::merge_collections(parent.fields, fields);

        self.policy = match (self.policy.take(), parent.policy) {
            (Some(mut own), Some(inherited)) => {
                own.inherit(&inherited);
                Some(own)
            }
            (own, inherited) => own.or(inherited),
        };
    }
}
