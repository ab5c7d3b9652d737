//! Template loading pipeline.
//!
//! [`TemplateLoader::load`] resolves a reference to a file, takes the parsed
//! template from the cache when the cached entry is not older than the file,
//! otherwise parses the file (and caches the result), then resolves the
//! `extends` chain.
//!
//! # Example
//!
//! ```
//! use dataset::loader::{LoadOptions, TemplateLoader};
//! use dataset::parser::YamlParser;
//! use dataset::paths::PathSet;
//! use dataset::reader::FileReader;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("base.yml"), "fields:\n  - name: id").unwrap();
//! fs::write(temp.path().join("page.yml"), "extends: base\nfields:\n  - name: title").unwrap();
//!
//! let loader = TemplateLoader::new(
//!     PathSet::new().with_paths("*", [temp.path()]),
//!     FileReader::new("yml"),
//!     YamlParser,
//! );
//!
//! let page = loader.load("page", &LoadOptions::default()).unwrap();
//! assert_eq!(page.fields().names(), vec!["id", "title"]);
//! ```

use std::path::PathBuf;

use crate::cache::{self, FileCache, TemplateCache};
use crate::config::LoaderConfig;
use crate::error::{DatasetError, Result};
use crate::name::TemplateReference;
use crate::parser::Parser;
use crate::paths::{PathProvider, PathSet};
use crate::reader::{FileHandle, FileReader, Reader};
use crate::template::Template;

/// Per-call loading options.
///
/// The same options are used for every template of an inheritance chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip inheritance resolution.
    pub not_extend: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that skip inheritance resolution.
    pub fn not_extend() -> Self {
        Self { not_extend: true }
    }
}

/// Where a template reference resolved to.
#[derive(Debug, Clone)]
pub struct LocatedTemplate {
    pub reference: TemplateReference,
    pub search_paths: Vec<PathBuf>,
    pub handle: FileHandle,
    pub cache_key: String,
}

/// Loads templates from namespaced search paths.
pub struct TemplateLoader {
    paths: Box<dyn PathProvider>,
    reader: Box<dyn Reader>,
    parser: Box<dyn Parser>,
    cache: Option<Box<dyn TemplateCache>>,
    max_depth: Option<usize>,
}

impl TemplateLoader {
    /// Create a loader without a cache.
    pub fn new(
        paths: impl PathProvider + 'static,
        reader: impl Reader + 'static,
        parser: impl Parser + 'static,
    ) -> Self {
        Self::from_parts(Box::new(paths), Box::new(reader), Box::new(parser))
    }

    /// Create a loader from boxed collaborators.
    pub fn from_parts(
        paths: Box<dyn PathProvider>,
        reader: Box<dyn Reader>,
        parser: Box<dyn Parser>,
    ) -> Self {
        Self {
            paths,
            reader,
            parser,
            cache: None,
            max_depth: None,
        }
    }

    /// Build a loader from configuration.
    ///
    /// A file cache is attached only when caching is enabled.
    pub fn from_config(config: &LoaderConfig) -> Self {
        let mut loader = Self::from_parts(
            Box::new(PathSet::from(config.paths.clone())),
            Box::new(FileReader::new(config.extension())),
            config.format.parser(),
        );
        loader.max_depth = config.max_depth;

        if config.cache.enabled {
            let dir = config
                .cache
                .dir
                .clone()
                .unwrap_or_else(cache::default_cache_dir);
            tracing::debug!("Caching templates in {}", dir.display());
            loader.with_cache(FileCache::new(dir))
        } else {
            loader
        }
    }

    /// Attach a cache for parsed templates.
    pub fn with_cache(mut self, cache: impl TemplateCache + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Limit the length of an `extends` chain.
    ///
    /// Without a limit, chains of any length load as long as they do not loop.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub fn cache(&self) -> Option<&dyn TemplateCache> {
        self.cache.as_deref()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Resolve a reference to its file and cache key without reading it.
    pub fn locate(&self, name: &str, options: &LoadOptions) -> Result<LocatedTemplate> {
        let reference = TemplateReference::parse(name);
        let search_paths = self.paths.get(&reference.namespace);

        let handle = self
            .reader
            .find(
                &reference.name,
                self.reader.extension(),
                &search_paths,
                options,
            )
            .map_err(|err| match err {
                DatasetError::TemplateNotFound { searched, .. } => {
                    DatasetError::TemplateNotFound {
                        name: name.to_string(),
                        searched,
                    }
                }
                other => other,
            })?;

        let cache_key = cache::cache_key(&reference.namespace, &handle);

        Ok(LocatedTemplate {
            reference,
            search_paths,
            handle,
            cache_key,
        })
    }

    /// Load a template and resolve its inheritance chain.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` if any template of the chain has no file,
    /// `RecursiveExtend` if the chain loops back on itself and
    /// `ExtendDepthExceeded` if a maximum depth is set and the chain is longer.
    /// Parser and reader errors are returned as they are.
    pub fn load(&self, name: &str, options: &LoadOptions) -> Result<Template> {
        self.load_chain(name, options, &mut Vec::new())
    }

    fn load_chain(
        &self,
        name: &str,
        options: &LoadOptions,
        chain: &mut Vec<String>,
    ) -> Result<Template> {
        if let Some(max_depth) = self.max_depth {
            if chain.len() > max_depth {
                return Err(DatasetError::ExtendDepthExceeded {
                    name: name.to_string(),
                    max_depth,
                });
            }
        }

        let located = self.locate(name, options)?;
        chain.push(located.reference.canonical());

        let mut template = self.read(&located)?;

        if options.not_extend {
            return Ok(template);
        }

        let Some(parent) = template.extends().map(str::to_owned) else {
            return Ok(template);
        };

        let parent_reference = TemplateReference::parse(&parent);
        if parent == name || chain.contains(&parent_reference.canonical()) {
            chain.push(parent_reference.canonical());
            return Err(DatasetError::RecursiveExtend {
                reference: parent,
                chain: chain.join(" → "),
            });
        }

        tracing::debug!("Template '{}' extends '{}'", name, parent);
        let resolved = self.load_chain(&parent, options, chain)?;
        template.extend(resolved);

        Ok(template)
    }

    /// Get a template from the cache or parse it from its file.
    fn read(&self, located: &LocatedTemplate) -> Result<Template> {
        let handle = &located.handle;
        let key = located.cache_key.as_str();

        if let Some(cache) = &self.cache {
            if cache.has(key, handle.modified_at()) {
                let cached = cache
                    .get(key)
                    .and_then(|payload| cache::decode(&payload).map_err(anyhow::Error::from));
                match cached {
                    Ok(template) => {
                        tracing::debug!("Cache hit for '{}'", key);
                        return Ok(template);
                    }
                    Err(e) => tracing::warn!("Ignoring cached template '{}': {:#}", key, e),
                }
            } else {
                tracing::debug!("Cache miss for '{}'", key);
            }
        }

        let raw = self.reader.content(handle)?;
        let tree = self.parser.parse(&raw)?;
        let template =
            Template::from_tree(tree).map_err(|e| DatasetError::InvalidDefinition {
                path: handle.path().to_path_buf(),
                message: e.to_string(),
            })?;

        if let Some(cache) = &self.cache {
            if template.is_cache_enabled() {
                let stored = cache::encode(&template)
                    .map_err(anyhow::Error::from)
                    .and_then(|payload| cache.set(key, &payload));
                if let Err(e) = stored {
                    tracing::warn!("Failed to cache template '{}': {:#}", key, e);
                }
            }
        }

        Ok(template)
    }
}

impl std::fmt::Debug for TemplateLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateLoader")
            .field("has_cache", &self.has_cache())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
