//! Serialized template payloads.
//!
//! A payload is a JSON envelope naming the node kind and format version.
//! Decoding only accepts the known document node types; unknown kinds,
//! versions or fields are rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::Template;

/// Current payload format version.
pub const PAYLOAD_VERSION: u32 = 1;

/// Root node kinds a payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PayloadKind {
    Template,
}

#[derive(Serialize)]
struct EncodedTemplate<'a> {
    kind: PayloadKind,
    version: u32,
    template: &'a Template,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DecodedTemplate {
    kind: PayloadKind,
    version: u32,
    template: Template,
}

/// Failure to reconstruct a template from a payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Malformed template payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported payload version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Serialize a template into a cache payload.
pub fn encode(template: &Template) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&EncodedTemplate {
        kind: PayloadKind::Template,
        version: PAYLOAD_VERSION,
        template,
    })
}

/// Reconstruct a template from a cache payload.
pub fn decode(payload: &[u8]) -> Result<Template, PayloadError> {
    let decoded: DecodedTemplate = serde_json::from_slice(payload)?;

    if decoded.version != PAYLOAD_VERSION {
        return Err(PayloadError::UnsupportedVersion {
            found: decoded.version,
            expected: PAYLOAD_VERSION,
        });
    }

    match decoded.kind {
        PayloadKind::Template => Ok(decoded.template),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Template {
        Template::from_tree(
            serde_yaml::from_str(
                r#"
extends: admin::base
flags: [disable extending]
sections:
  - name: general
    label: General
    groups:
      - name: main
fields:
  - name: title
    section: general
    group: main
    default: Untitled
    attributes:
      maxlength: 255
      options: [a, b]
policy:
  read: [guest]
"#,
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn decode_reproduces_template() {
        let template = sample();

        let decoded = decode(&encode(&template).unwrap()).unwrap();

        assert_eq!(decoded, template);
        assert_eq!(decoded.extends(), Some("admin::base"));
        assert!(decoded.is_cache_enabled());
        assert!(!decoded.is_extending_enabled());
    }

    #[test]
    fn payload_names_kind_and_version() {
        let value: serde_json::Value = serde_json::from_slice(&encode(&sample()).unwrap()).unwrap();
        assert_eq!(value["kind"], "template");
        assert_eq!(value["version"], PAYLOAD_VERSION);
    }

    #[test]
    fn rejects_unknown_kind() {
        let payload = br#"{"kind": "shell_command", "version": 1, "template": {}}"#;
        assert!(matches!(decode(payload), Err(PayloadError::Malformed(_))));
    }

    #[test]
    fn rejects_unknown_node_fields() {
        let payload = br#"{"kind": "template", "version": 1, "template": {"fields": [{"name": "a", "hook": "rm -rf /"}]}}"#;
        assert!(matches!(decode(payload), Err(PayloadError::Malformed(_))));
    }

    #[test]
    fn rejects_other_versions() {
        let payload = br#"{"kind": "template", "version": 99, "template": {}}"#;
        assert!(matches!(
            decode(payload),
            Err(PayloadError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn decoded_fields_keep_unique_names() {
        let payload = br#"{"kind": "template", "version": 1, "template": {"fields": [{"name": "a"}, {"name": "a", "type": "text"}]}}"#;
        let template = decode(payload).unwrap();

        assert_eq!(template.fields().names(), vec!["a"]);
        assert_eq!(template.field("a").unwrap().kind, "text");
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode(b"\x00\x01not json").is_err());
    }
}
