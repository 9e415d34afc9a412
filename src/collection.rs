//! Content Collection Loading
//!
//! Builds an [`ItemCollection`] from a directory of content files with YAML
//! front matter. Ids are `/`-separated paths relative to the content
//! directory, so they are stable across platforms.

pub mod front_matter;

use crate::error::PublishError;
use crate::types::{ItemCollection, ItemId};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File extensions treated as content.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "html", "htm"];

/// Loads content files under a directory into an item collection.
#[derive(Debug, Clone)]
pub struct CollectionLoader {
    root: PathBuf,
    extensions: Vec<String>,
}

impl CollectionLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the content directory and parse every content file's front matter.
    ///
    /// Hidden files and directories are skipped.
    pub fn load(&self) -> Result<ItemCollection, PublishError> {
        if !self.root.is_dir() {
            return Err(PublishError::io(
                &self.root,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "content directory does not exist",
                ),
            ));
        }

        let mut items = ItemCollection::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                PublishError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() || !self.is_content(entry.path()) {
                continue;
            }

            let content = std::fs::read_to_string(entry.path())
                .map_err(|e| PublishError::io(entry.path(), e))?;
            let metadata = front_matter::parse(entry.path(), &content)?;
            let id = self.item_id(entry.path());
            debug!(item = %id, fields = metadata.len(), "Loaded content item");
            items.insert(id, metadata);
        }

        Ok(items)
    }

    fn is_content(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn item_id(&self, path: &Path) -> ItemId {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}
