//! Store Module
//!
//! The document store: a root directory of collections, each a directory of
//! record files.
//!
//! ## Responsibilities
//! - Create the root directory on open
//! - Hand out collection-scoped handles
//! - Serialize writes and deletes per collection
//! - Read, list and delete records through the path resolver

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, WriteMode};
use crate::error::{Result, StoreError};
use crate::serializer::{JsonSerializer, Serializer};
use crate::storage::{self, LockTable, PathResolver, Resolved};

/// Undecoded content of one collection entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Directory entry name, e.g. `A.json`
    pub file_name: String,

    /// File bytes exactly as stored
    pub bytes: Vec<u8>,
}

impl RawRecord {
    /// The stored bytes, ready for `Serializer::deserialize`
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// An embedded document store rooted at one directory
///
/// ## Concurrency Model
///
/// - **Writes and deletes**: serialized per collection by a lock from the
///   `LockTable`. Different collections never contend.
/// - **Reads** (read/read_all/keys/contains): take no lock and may observe
///   a write in progress.
///
/// All methods take `&self`; share the store across threads by reference or
/// through an `Arc`.
pub struct Store<S: Serializer = JsonSerializer> {
    config: Config,
    resolver: PathResolver,
    locks: LockTable,
    serializer: S,
}

impl Store<JsonSerializer> {
    /// Open or create a store with the default JSON serializer
    pub fn open(config: Config) -> Result<Self> {
        Self::with_serializer(config, JsonSerializer::new())
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified root directory
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().root_dir(path.as_ref()).build();
        Self::open(config)
    }
}

impl<S: Serializer> Store<S> {
    /// Open or create a store with a custom serializer
    ///
    /// An existing root is accepted as is. A missing root is created along
    /// with its parents.
    pub fn with_serializer(mut config: Config, serializer: S) -> Result<Self> {
        config.root_dir = storage::normalize(&config.root_dir);

        if config.root_dir.exists() {
            tracing::debug!(root = %config.root_dir.display(), "opening existing store");
        } else {
            storage::create_dir_all(&config.root_dir, config.dir_mode)?;
            tracing::info!(root = %config.root_dir.display(), "created store root");
        }

        let resolver = PathResolver::new(&config.root_dir, serializer.extension());

        Ok(Self {
            config,
            resolver,
            locks: LockTable::new(),
            serializer,
        })
    }

    /// Select a collection. No I/O happens here.
    pub fn collection(&self, name: impl Into<String>) -> Collection<'_, S> {
        Collection {
            store: self,
            name: name.into(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the (normalized) root directory
    pub fn root_dir(&self) -> &Path {
        &self.config.root_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the serializer, e.g. to decode `RawRecord`s
    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Number of collections that have been written to or deleted from
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }
}

/// A store handle scoped to one collection
pub struct Collection<'a, S: Serializer = JsonSerializer> {
    store: &'a Store<S>,
    name: String,
}

impl<'a, S: Serializer> Collection<'a, S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory backing this collection (may not exist yet)
    pub fn dir(&self) -> PathBuf {
        self.store.resolver.collection_dir(&self.name)
    }

    /// Write `value` under `key`, replacing any previous content.
    ///
    /// Steps:
    /// 1. Acquire the collection lock
    /// 2. Create the collection directory if needed
    /// 3. Serialize the value
    /// 4. Persist to `{key}.{ext}` according to the write mode
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.check_selected()?;

        let lock = self.store.locks.get(&self.name);
        let _guard = lock.lock();

        let config = &self.store.config;
        let resolver = &self.store.resolver;

        storage::create_dir_all(&resolver.collection_dir(&self.name), config.dir_mode)?;

        let bytes = self.store.serializer.serialize(value)?;
        let final_path = resolver.record_path(&self.name, key);

        match config.write_mode {
            WriteMode::Direct => {
                storage::write_file(&final_path, &bytes, config.file_mode)?;
            }
            WriteMode::Atomic => {
                let temp_path = resolver.temp_path(&self.name, key);
                storage::write_atomic(&temp_path, &final_path, &bytes, config.file_mode)?;
            }
        }

        tracing::debug!(
            collection = %self.name,
            key,
            len = bytes.len(),
            "wrote record"
        );
        Ok(())
    }

    /// Read and decode the record stored under `key`
    ///
    /// Not locked: a concurrent direct-mode write may be observed half done,
    /// which surfaces as a deserialization error.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.check_selected()?;

        let path = match self.store.resolver.resolve(&self.name, key)? {
            Resolved::NotFound => return Err(self.not_found(key)),
            Resolved::File(path) => path,
            Resolved::Directory(_) => self.store.resolver.record_path(&self.name, key),
        };

        let bytes = fs::read(&path).map_err(|e| self.missing_as_not_found(e, key))?;
        tracing::debug!(collection = %self.name, key, len = bytes.len(), "read record");

        self.store.serializer.deserialize(&bytes)
    }

    /// Raw bytes of every entry, in directory-listing order
    ///
    /// Staging files of atomic writes are skipped. If one entry cannot be
    /// read the call stops and returns `StoreError::PartialRead` with the
    /// records read so far.
    pub fn read_all(&self) -> Result<Vec<RawRecord>> {
        self.check_selected()?;

        let dir = self.existing_dir()?;
        let resolver = &self.store.resolver;
        let mut records = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let read = entry.map_err(StoreError::from).and_then(|entry| {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                if !entry.file_type()?.is_dir() && resolver.is_staging_file(&file_name) {
                    return Ok(None);
                }
                let bytes = fs::read(entry.path())?;
                Ok(Some(RawRecord { file_name, bytes }))
            });

            match read {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(source) => {
                    tracing::warn!(
                        collection = %self.name,
                        read = records.len(),
                        error = %source,
                        "read_all aborted"
                    );
                    return Err(StoreError::PartialRead {
                        records,
                        source: Box::new(source),
                    });
                }
            }
        }

        tracing::debug!(collection = %self.name, count = records.len(), "read all records");
        Ok(records)
    }

    /// Delete the record stored under `key`
    ///
    /// A directory-shaped record is removed with its whole subtree. Deleting
    /// a missing key fails with `NotFound`.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.check_selected()?;

        let lock = self.store.locks.get(&self.name);
        let _guard = lock.lock();

        match self.store.resolver.resolve(&self.name, key)? {
            Resolved::NotFound => return Err(self.not_found(key)),
            Resolved::Directory(path) => fs::remove_dir_all(path)?,
            Resolved::File(path) => {
                fs::remove_file(path).map_err(|e| self.missing_as_not_found(e, key))?
            }
        }

        tracing::debug!(collection = %self.name, key, "deleted record");
        Ok(())
    }

    /// Keys of every record in the collection, in directory-listing order
    ///
    /// Staging files of atomic writes are skipped.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.check_selected()?;

        let dir = self.existing_dir()?;
        let resolver = &self.store.resolver;
        let mut keys = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type()?.is_dir();

            if !is_dir && resolver.is_staging_file(&name) {
                continue;
            }
            keys.push(resolver.key_from_entry(&name, is_dir));
        }

        Ok(keys)
    }

    /// Whether `key` exists as a record file or a directory record
    pub fn contains(&self, key: &str) -> Result<bool> {
        self.check_selected()?;

        Ok(match self.store.resolver.resolve(&self.name, key)? {
            Resolved::NotFound => false,
            Resolved::Directory(_) => true,
            Resolved::File(path) => path.is_file(),
        })
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn check_selected(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(StoreError::collection_not_selected());
        }
        Ok(())
    }

    /// The collection directory, or `NotFound` if it was never created
    fn existing_dir(&self) -> Result<PathBuf> {
        let dir = self.dir();
        if !dir.exists() {
            return Err(StoreError::NotFound { path: dir });
        }
        Ok(dir)
    }

    /// A bare-path hit whose record file is absent means the key has no record
    fn missing_as_not_found(&self, error: io::Error, key: &str) -> StoreError {
        if error.kind() == io::ErrorKind::NotFound {
            self.not_found(key)
        } else {
            error.into()
        }
    }

    fn not_found(&self, key: &str) -> StoreError {
        StoreError::NotFound {
            path: self.store.resolver.bare_path(&self.name, key),
        }
    }
}
