//! Configuration for docstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory holding one subdirectory per collection
    /// Internal structure:
    ///   {root_dir}/
    ///     └── {collection}/
    ///           ├── {key}.json   (single-file record)
    ///           └── {key}/       (directory-shaped record)
    pub root_dir: PathBuf,

    /// How record bytes reach their final path
    pub write_mode: WriteMode,

    // -------------------------------------------------------------------------
    // Permission Configuration (unix only)
    // -------------------------------------------------------------------------
    /// Mode bits for directories created by the store
    pub dir_mode: u32,

    /// Mode bits for record files created by the store
    pub file_mode: u32,
}

/// Record write strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate and write the record file in place.
    ///
    /// Not crash-atomic: a crash or a concurrent reader mid-write may see a
    /// truncated file.
    #[default]
    Direct,

    /// Write to `{key}.{ext}.tmp`, then rename over the record file
    Atomic,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./docstore_data"),
            write_mode: WriteMode::Direct,
            dir_mode: 0o755,
            file_mode: 0o644,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the write mode
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    /// Set the mode bits for created directories
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.config.dir_mode = mode;
        self
    }

    /// Set the mode bits for created record files
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.write_mode, WriteMode::Direct);
        assert_eq!(config.dir_mode, 0o755);
        assert_eq!(config.file_mode, 0o644);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .root_dir("/tmp/somewhere")
            .write_mode(WriteMode::Atomic)
            .file_mode(0o600)
            .build();

        assert_eq!(config.root_dir, PathBuf::from("/tmp/somewhere"));
        assert_eq!(config.write_mode, WriteMode::Atomic);
        assert_eq!(config.file_mode, 0o600);
        assert_eq!(config.dir_mode, 0o755);
    }
}
