//! Inheritance merge rules.
//!
//! A child template is merged on top of its parent:
//!
//! - Parent nodes come first, new child nodes are appended
//! - A child node with the same name overrides the parent node
//! - Optional attributes the child leaves unset are inherited
//! - Free-form objects are merged recursively; arrays are replaced
//! - Null values in the child delete the inherited key

use serde_json::Value;

use super::document::{Collection, Field, Group, Named, Policy, Section};

/// A node that can take unset values from its parent counterpart.
pub trait Inherit {
    fn inherit(&mut self, parent: &Self);
}

impl Inherit for Group {
    fn inherit(&mut self, parent: &Self) {
        if self.label.is_none() {
            self.label = parent.label.clone();
        }
    }
}

impl Inherit for Section {
    fn inherit(&mut self, parent: &Self) {
        if self.label.is_none() {
            self.label = parent.label.clone();
        }
        let groups = std::mem::take(&mut self.groups);
        self.groups = merge_collections(parent.groups.clone(), groups);
    }
}

impl Inherit for Field {
    fn inherit(&mut self, parent: &Self) {
        if self.label.is_none() {
            self.label = parent.label.clone();
        }
        if self.section.is_none() {
            self.section = parent.section.clone();
        }
        if self.group.is_none() {
            self.group = parent.group.clone();
        }
        if self.default.is_none() {
            self.default = parent.default.clone();
        }
        let merged = deep_merge(
            &Value::Object(parent.attributes.clone()),
            &Value::Object(std::mem::take(&mut self.attributes)),
        );
        if let Value::Object(attributes) = merged {
            self.attributes = attributes;
        }
    }
}

impl Inherit for Policy {
    fn inherit(&mut self, parent: &Self) {
        for (action, roles) in &parent.rules {
            self.rules
                .entry(action.clone())
                .or_insert_with(|| roles.clone());
        }
    }
}

/// Merge a child collection on top of its parent collection.
pub fn merge_collections<T: Named + Inherit>(
    parent: Collection<T>,
    child: Collection<T>,
) -> Collection<T> {
    let mut merged = parent;

    for mut item in child {
        match merged.get_mut(item.name()) {
            Some(existing) => {
                item.inherit(existing);
                *existing = item;
            }
            None => {
                merged.insert(item);
            }
        }
    }

    merged
}

/// Deep merge two JSON values.
///
/// Objects are merged recursively. Arrays and scalars in `overlay` replace
/// the base value. Null values in `overlay` delete the key from `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Object(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_replaces_at_conflict_point() {
        let base = json!({"validation": {"required": true, "max": 10}});
        let overlay = json!({"validation": {"max": 255}});

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["validation"]["max"], 255);
        assert_eq!(result["validation"]["required"], true);
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let base = json!({"options": ["a", "b"]});
        let overlay = json!({"options": ["c"]});

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["options"], json!(["c"]));
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = json!({"placeholder": "Name", "hint": "Full name"});
        let overlay = json!({"placeholder": null});

        let result = deep_merge(&base, &overlay);

        assert!(result.get("placeholder").is_none());
        assert_eq!(result["hint"], "Full name");
    }

    #[test]
    fn scalar_overlay_replaces_object_base() {
        let base = json!({"format": {"kind": "date"}});
        let overlay = json!({"format": "iso"});

        assert_eq!(deep_merge(&base, &overlay)["format"], "iso");
    }

    #[test]
    fn field_inherits_unset_values() {
        let mut parent = Field::new("title");
        parent.label = Some("Title".into());
        parent.section = Some("general".into());
        parent.default = Some(json!("Untitled"));
        parent.attributes.insert("maxlength".into(), json!(100));

        let mut child = Field::new("title");
        child.kind = "text".into();
        child.attributes.insert("rows".into(), json!(4));

        child.inherit(&parent);

        assert_eq!(child.kind, "text");
        assert_eq!(child.label.as_deref(), Some("Title"));
        assert_eq!(child.section.as_deref(), Some("general"));
        assert_eq!(child.default, Some(json!("Untitled")));
        assert_eq!(child.attributes["maxlength"], 100);
        assert_eq!(child.attributes["rows"], 4);
    }

    #[test]
    fn section_merges_groups_by_name() {
        let mut parent = Section::new("general");
        parent.label = Some("General".into());
        let mut main = Group::new("main");
        main.label = Some("Main".into());
        parent.groups.insert(main);
        parent.groups.insert(Group::new("meta"));

        let mut child = Section::new("general");
        child.groups.insert(Group::new("main"));
        child.groups.insert(Group::new("extra"));

        child.inherit(&parent);

        assert_eq!(child.label.as_deref(), Some("General"));
        assert_eq!(child.groups.names(), vec!["main", "meta", "extra"]);
        assert_eq!(
            child.groups.get("main").and_then(|g| g.label.as_deref()),
            Some("Main")
        );
    }

    #[test]
    fn merge_collections_puts_parent_first() {
        let parent: Collection<Field> = ["id", "title"].into_iter().map(Field::new).collect();
        let child: Collection<Field> = ["body", "title"].into_iter().map(Field::new).collect();

        let merged = merge_collections(parent, child);

        assert_eq!(merged.names(), vec!["id", "title", "body"]);
    }

    #[test]
    fn policy_child_rules_override_per_action() {
        let mut parent = Policy::new();
        parent.rules.insert("read".into(), vec!["guest".into()]);
        parent.rules.insert("write".into(), vec!["editor".into()]);
        let mut child = Policy::new();
        child.rules.insert("write".into(), vec!["admin".into()]);

        child.inherit(&parent);

        assert_eq!(child.roles("read"), ["guest".to_string()]);
        assert_eq!(child.roles("write"), ["admin".to_string()]);
    }
}
