//! Document nodes carried by a [`Template`](super::Template).

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A node addressed by name inside a [`Collection`].
pub trait Named {
    fn name(&self) -> &str;
}

/// Ordered list of nodes with unique names.
///
/// Deserializing goes through [`Collection::insert`], so a later node
/// replaces an earlier one with the same name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Named> Collection<T> {
    /// Get a node by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Get a mutable node by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a node, replacing one with the same name in place.
    ///
    /// Returns the replaced node.
    pub fn insert(&mut self, item: T) -> Option<T> {
        match self.get_mut(item.name()) {
            Some(existing) => Some(std::mem::replace(existing, item)),
            None => {
                self.items.push(item);
                None
            }
        }
    }

    /// Node names in order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name()).collect()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Named> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.insert(item);
        }
        collection
    }
}

impl<'de, T: Named + Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_iter)
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A named block of groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Collection::is_empty")]
    pub groups: Collection<Group>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            groups: Collection::new(),
        }
    }
}

impl Named for Section {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A named group of fields inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }
}

impl Named for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

fn default_field_type() -> String {
    "string".to_string()
}

/// A single data field.
///
/// `section` and `group` place the field; `default` and `attributes` are
/// free-form values interpreted by consumers of the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: default_field_type(),
            label: None,
            section: None,
            group: None,
            default: None,
            attributes: serde_json::Map::new(),
        }
    }
}

impl Named for Field {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Access rules: action name to the roles allowed to perform it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Policy {
    pub rules: BTreeMap<String, Vec<String>>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roles allowed to perform `action`.
    pub fn roles(&self, action: &str) -> &[String] {
        self.rules.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `role` may perform `action`.
    pub fn allows(&self, action: &str, role: &str) -> bool {
        self.roles(action).iter().any(|r| r == role)
    }
}
