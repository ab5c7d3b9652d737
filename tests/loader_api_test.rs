//! Integration tests for the loader public API.

use dataset::cache::{cache_key, FileCache, TemplateCache};
use dataset::loader::{LoadOptions, TemplateLoader};
use dataset::parser::{JsonParser, YamlParser};
use dataset::paths::PathSet;
use dataset::reader::FileReader;
use dataset::DatasetError;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const PAGE: &str = r#"
extends: base
sections:
  - name: content
    label: Content
fields:
  - name: title
    section: content
    label: Page title
  - name: body
    type: text
    section: content
"#;

const BASE: &str = r#"
flags: [disable extending]
sections:
  - name: meta
    label: Meta
  - name: content
    groups:
      - name: main
fields:
  - name: id
    type: integer
    section: meta
  - name: title
    attributes:
      maxlength: 255
policy:
  read: [guest]
  write: [editor]
"#;

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("ns")).unwrap();
    fs::create_dir_all(temp.path().join("shared")).unwrap();
    fs::write(temp.path().join("ns/page.yml"), PAGE).unwrap();
    fs::write(temp.path().join("shared/base.yml"), BASE).unwrap();
    temp
}

fn loader(root: &Path) -> TemplateLoader {
    TemplateLoader::new(
        PathSet::new()
            .with_paths("*", [root.join("shared")])
            .with_paths("ns", [root.join("ns"), root.join("shared")]),
        FileReader::new("yml"),
        YamlParser,
    )
}

fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

#[test]
fn namespaced_template_merges_wildcard_parent() {
    let temp = setup();

    let page = loader(temp.path())
        .load("ns::page", &LoadOptions::default())
        .unwrap();

    assert_eq!(page.extends(), Some("*::base"));
    assert_eq!(page.fields().names(), vec!["id", "title", "body"]);
    assert_eq!(page.sections().names(), vec!["meta", "content"]);

    let title = page.field("title").unwrap();
    assert_eq!(title.label.as_deref(), Some("Page title"));
    assert_eq!(title.attributes["maxlength"], 255);

    let content = page.section("content").unwrap();
    assert_eq!(content.label.as_deref(), Some("Content"));
    assert!(content.groups.contains("main"));

    let policy = page.policy().unwrap();
    assert!(policy.allows("read", "guest"));
    assert!(policy.allows("write", "editor"));

    // Flags are the child's own.
    assert!(page.is_extending_enabled());
}

#[test]
fn not_extend_returns_own_content_only() {
    let temp = setup();

    let page = loader(temp.path())
        .load("ns::page", &LoadOptions::not_extend())
        .unwrap();

    assert_eq!(page.fields().names(), vec!["title", "body"]);
    assert!(page.policy().is_none());
    assert_eq!(page.extends(), Some("*::base"));
}

#[test]
fn self_extending_template_fails_without_looping() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.yml"), "extends: a").unwrap();
    let loader = TemplateLoader::new(
        PathSet::new().with_paths("*", [temp.path()]),
        FileReader::new("yml"),
        YamlParser,
    );

    let err = loader.load("a", &LoadOptions::default()).unwrap_err();

    assert!(matches!(err, DatasetError::RecursiveExtend { .. }));
    assert!(err.to_string().contains("*::a"));
}

#[test]
fn two_hop_cycle_is_detected() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.yml"), "extends: b").unwrap();
    fs::write(temp.path().join("b.yml"), "extends: a").unwrap();
    let loader = TemplateLoader::new(
        PathSet::new().with_paths("*", [temp.path()]),
        FileReader::new("yml"),
        YamlParser,
    );

    let err = loader.load("a", &LoadOptions::default()).unwrap_err();

    assert!(matches!(err, DatasetError::RecursiveExtend { .. }));
}

#[test]
fn missing_template_is_not_found() {
    let temp = setup();

    let err = loader(temp.path())
        .load("ns::missing", &LoadOptions::default())
        .unwrap_err();

    assert!(matches!(err, DatasetError::TemplateNotFound { ref name, .. } if name == "ns::missing"));
}

#[test]
fn json_templates_load_the_same_way() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("base.json"),
        r#"{"fields": [{"name": "id", "type": "integer"}]}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("page.json"),
        r#"{"extends": "base", "fields": [{"name": "title"}]}"#,
    )
    .unwrap();
    let loader = TemplateLoader::new(
        PathSet::new().with_paths("*", [temp.path()]),
        FileReader::new("json"),
        JsonParser,
    );

    let page = loader.load("page", &LoadOptions::default()).unwrap();

    assert_eq!(page.fields().names(), vec!["id", "title"]);
}

#[test]
fn cache_key_is_independent_of_matching_search_path() {
    let temp = setup();
    fs::copy(temp.path().join("shared/base.yml"), temp.path().join("ns/base.yml")).unwrap();
    let loader = loader(temp.path());

    let from_ns = loader.locate("ns::base", &LoadOptions::default()).unwrap();
    fs::remove_file(temp.path().join("ns/base.yml")).unwrap();
    let from_shared = loader.locate("ns::base", &LoadOptions::default()).unwrap();

    assert_ne!(from_ns.handle.path(), from_shared.handle.path());
    assert_eq!(from_ns.cache_key, from_shared.cache_key);
    assert_eq!(from_ns.cache_key, cache_key("ns", &from_ns.handle));
}

#[test]
fn file_cache_serves_unchanged_templates() {
    let temp = setup();
    let cache_dir = temp.path().join("cache");
    let page_path = temp.path().join("ns/page.yml");
    let hour_ago = SystemTime::now() - Duration::from_secs(3600);
    set_mtime(&page_path, hour_ago);

    let loader = loader(temp.path()).with_cache(FileCache::new(&cache_dir));
    let first = loader.load("ns::page", &LoadOptions::default()).unwrap();

    // Rewrite the file but keep it older than the cache entry.
    fs::write(&page_path, "fields:\n  - name: changed").unwrap();
    set_mtime(&page_path, hour_ago);

    let second = loader.load("ns::page", &LoadOptions::default()).unwrap();
    assert_eq!(second, first);

    let cache = FileCache::new(&cache_dir);
    assert!(cache.has("ns//page.yml", hour_ago.into()));
}

#[test]
fn file_cache_reparses_modified_templates() {
    let temp = setup();
    let cache_dir = temp.path().join("cache");
    let page_path = temp.path().join("ns/page.yml");

    let loader = loader(temp.path()).with_cache(FileCache::new(&cache_dir));
    loader.load("ns::page", &LoadOptions::default()).unwrap();

    fs::write(&page_path, "fields:\n  - name: changed").unwrap();
    set_mtime(&page_path, SystemTime::now() + Duration::from_secs(3600));

    let reloaded = loader.load("ns::page", &LoadOptions::not_extend()).unwrap();
    assert_eq!(reloaded.fields().names(), vec!["changed"]);
}

#[test]
fn corrupt_cache_entry_falls_back_to_parse() {
    let temp = setup();
    let cache_dir = temp.path().join("cache");
    let cache = FileCache::new(&cache_dir);
    cache.set("ns//page.yml", b"{\"kind\": \"object\"}").unwrap();

    let page = loader(temp.path())
        .with_cache(FileCache::new(&cache_dir))
        .load("ns::page", &LoadOptions::not_extend())
        .unwrap();

    assert_eq!(page.fields().names(), vec!["title", "body"]);
}
