//! Path Resolver
//!
//! Maps collection names and keys onto filesystem paths and probes which
//! shape a record currently has on disk.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Outcome of probing a key on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Neither `{key}` nor `{key}.{ext}` exists
    NotFound,

    /// A regular file holds the record
    File(PathBuf),

    /// The record is a directory of nested sub-records
    Directory(PathBuf),
}

/// Resolves logical keys to concrete on-disk paths
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    extension: String,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// `{root}/{collection}`
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// `{root}/{collection}/{key}`
    pub fn bare_path(&self, collection: &str, key: &str) -> PathBuf {
        self.collection_dir(collection).join(key)
    }

    /// `{root}/{collection}/{key}.{ext}`, where a write lands
    pub fn record_path(&self, collection: &str, key: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", key, self.extension))
    }

    /// `{root}/{collection}/{key}.{ext}.tmp`, staging file for atomic writes
    pub fn temp_path(&self, collection: &str, key: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}.tmp", key, self.extension))
    }

    /// Probe a key: bare path first, then the suffixed path.
    ///
    /// The bare path only decides existence and shape. A file hit always
    /// yields the suffixed record path, the one `write` produces for this key,
    /// which may itself be absent when only a foreign bare file exists.
    pub fn resolve(&self, collection: &str, key: &str) -> Result<Resolved> {
        let bare = self.bare_path(collection, key);
        let suffixed = self.record_path(collection, key);

        if let Some(meta) = probe(&bare)? {
            return Ok(if meta.is_dir() {
                Resolved::Directory(bare)
            } else {
                Resolved::File(suffixed)
            });
        }

        match probe(&suffixed)? {
            Some(meta) if meta.is_dir() => Ok(Resolved::Directory(suffixed)),
            Some(_) => Ok(Resolved::File(suffixed)),
            None => Ok(Resolved::NotFound),
        }
    }

    /// True for `{key}.{ext}.tmp` staging files left by atomic writes
    pub fn is_staging_file(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(".tmp")
            .and_then(|rest| rest.strip_suffix(self.extension.as_str()))
            .is_some_and(|rest| rest.ends_with('.'))
    }

    /// Key for a directory entry name: the extension is stripped from record
    /// files, directory names are returned verbatim.
    pub fn key_from_entry(&self, file_name: &str, is_dir: bool) -> String {
        if is_dir {
            return file_name.to_string();
        }
        file_name
            .strip_suffix(self.extension.as_str())
            .and_then(|stem| stem.strip_suffix('.'))
            .unwrap_or(file_name)
            .to_string()
    }
}

/// Metadata for `path`, or `None` if it does not exist
fn probe(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lexically clean a path.
///
/// Drops `.` components and folds `..` into a preceding normal component.
/// Leading `..` on a relative path is kept; `..` directly under the root is
/// dropped. An empty result becomes `.`. The filesystem is never consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
