//! Content store - the flat directory of post documents

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::error::{ContentError, Result};

/// A source document in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name with its extension stripped
    pub id: String,
    pub path: PathBuf,
}

/// Read-only view over the posts directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    extensions: Vec<String>,
}

impl ContentStore {
    /// Create a store rooted at `root`, accepting files with the given extensions
    pub fn new<P: AsRef<Path>>(root: P, extensions: Vec<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions,
        }
    }

    /// Store for `base_dir/posts_dir` as configured
    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: &SiteConfig) -> Self {
        Self::new(
            base_dir.as_ref().join(&config.posts_dir),
            config.extensions.clone(),
        )
    }

    /// Enumerate every document, ordered by file name
    ///
    /// Subdirectories and hidden files are ignored. Two files that map to the
    /// same identifier are an error, and so is any entry that cannot be read.
    pub fn documents(&self) -> Result<Vec<Document>> {
        fs::read_dir(&self.root).map_err(|source| ContentError::StoreUnavailable {
            path: self.root.clone(),
            source,
        })?;

        let mut documents = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ContentError::Read {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(id) = self.identifier(path) else {
                continue;
            };

            if let Some(first) = seen.insert(id.clone(), path.to_path_buf()) {
                return Err(ContentError::DuplicateIdentifier {
                    id,
                    first,
                    second: path.to_path_buf(),
                });
            }

            documents.push(Document {
                id,
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Found {} documents in {:?}", documents.len(), self.root);
        Ok(documents)
    }

    /// Locate a document by identifier
    pub fn find(&self, id: &str) -> Result<Document> {
        if !is_valid_id(id) {
            return Err(ContentError::NotFound(id.to_string()));
        }

        self.documents()?
            .into_iter()
            .find(|doc| doc.id == id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))
    }

    /// Read a document's raw text
    pub fn read(&self, document: &Document) -> Result<String> {
        fs::read_to_string(&document.path).map_err(|source| ContentError::Read {
            path: document.path.clone(),
            source,
        })
    }

    /// Whether a file extension marks a document
    fn is_document_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Identifier for a path, if it is a visible document
    fn identifier(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        if name.starts_with('.') {
            return None;
        }

        if !self.is_document_extension(path.extension()?.to_str()?) {
            return None;
        }

        path.file_stem()?.to_str().map(str::to_string)
    }
}

/// Identifiers are bare file stems, never paths
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ContentStore {
        ContentStore::from_config(dir.path(), &SiteConfig {
            posts_dir: ".".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_documents_strip_extension_and_sort() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b-post.mdx"), "").unwrap();
        fs::write(dir.path().join("a-post.md"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join(".draft.md"), "").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let ids: Vec<_> = store(&dir)
            .documents()
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["a-post", "b-post"]);
    }

    #[test]
    fn test_document_extensions() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.is_document_extension("mdx"));
        assert!(store.is_document_extension("MD"));
        assert!(!store.is_document_extension("txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_document_is_read_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.md"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing.md"), dir.path().join("ghost.md"))
            .unwrap();

        assert!(matches!(
            store(&dir).documents(),
            Err(ContentError::Read { path, .. }) if path.ends_with("ghost.md")
        ));
    }

    #[test]
    fn test_missing_store() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("missing"), vec!["md".to_string()]);
        assert!(matches!(
            store.documents(),
            Err(ContentError::StoreUnavailable { .. })
        ));
    }

    #[test]
    fn test_duplicate_identifier() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("same.md"), "").unwrap();
        fs::write(dir.path().join("same.mdx"), "").unwrap();
        assert!(matches!(
            store(&dir).documents(),
            Err(ContentError::DuplicateIdentifier { id, .. }) if id == "same"
        ));
    }

    #[test]
    fn test_find() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.md"), "hi").unwrap();
        let store = store(&dir);

        let doc = store.find("hello").unwrap();
        assert_eq!(store.read(&doc).unwrap(), "hi");

        assert!(matches!(store.find("nope"), Err(ContentError::NotFound(_))));
        assert!(matches!(store.find("hello.md"), Err(ContentError::NotFound(_))));
        assert!(matches!(store.find("../hello"), Err(ContentError::NotFound(_))));
        assert!(matches!(store.find(""), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("hello-world"));
        assert!(is_valid_id("v1..2"));
        assert!(!is_valid_id("../escaped"));
        assert!(!is_valid_id("a\\b"));
        assert!(!is_valid_id(".."));
        assert!(!is_valid_id(""));
    }
}
