//! Raw content parsers.
//!
//! Every parser produces the same document tree type, a
//! [`serde_yaml::Value`], which [`Template::from_tree`](crate::template::Template::from_tree)
//! turns into a template.

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Parses raw file content into a document tree.
pub trait Parser {
    fn parse(&self, raw: &str) -> Result<serde_yaml::Value>;
}

/// YAML definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl Parser for YamlParser {
    fn parse(&self, raw: &str) -> Result<serde_yaml::Value> {
        serde_yaml::from_str(raw).map_err(|e| DatasetError::ParseError {
            format: "yaml".to_string(),
            message: e.to_string(),
        })
    }
}

/// JSON definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, raw: &str) -> Result<serde_yaml::Value> {
        if raw.trim().is_empty() {
            return Ok(serde_yaml::Value::Null);
        }
        serde_json::from_str(raw).map_err(|e| DatasetError::ParseError {
            format: "json".to_string(),
            message: e.to_string(),
        })
    }
}

/// Definition file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// Default file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yml",
            Format::Json => "json",
        }
    }

    /// Parser for this format.
    pub fn parser(self) -> Box<dyn Parser> {
        match self {
            Format::Yaml => Box::new(YamlParser),
            Format::Json => Box::new(JsonParser),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_parser_builds_tree() {
        let tree = YamlParser.parse("extends: base\nflags: [disable cache]").unwrap();
        assert_eq!(tree["extends"], "base");
        assert_eq!(tree["flags"][0], "disable cache");
    }

    #[test]
    fn yaml_parser_reports_errors() {
        let err = YamlParser.parse("fields: [unclosed").unwrap_err();
        assert!(matches!(err, DatasetError::ParseError { ref format, .. } if format == "yaml"));
    }

    #[test]
    fn json_parser_builds_same_tree_shape() {
        let json = JsonParser
            .parse(r#"{"extends": "base", "fields": [{"name": "title"}]}"#)
            .unwrap();
        let yaml = YamlParser
            .parse("extends: base\nfields:\n  - name: title")
            .unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn json_parser_empty_is_null() {
        assert!(JsonParser.parse("  \n").unwrap().is_null());
    }

    #[test]
    fn json_parser_reports_errors() {
        let err = JsonParser.parse("{").unwrap_err();
        assert!(matches!(err, DatasetError::ParseError { ref format, .. } if format == "json"));
    }

    #[test]
    fn format_extensions() {
        assert_eq!(Format::Yaml.extension(), "yml");
        assert_eq!(Format::Json.extension(), "json");
        assert_eq!(Format::default(), Format::Yaml);
    }
}
