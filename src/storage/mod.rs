//! Storage Module
//!
//! Filesystem plumbing underneath the store.
//!
//! ## Responsibilities
//! - Resolve keys to record paths and probe their on-disk shape
//! - Track one write lock per collection
//! - Create directories and files with the configured permissions
//!
//! ## Layout
//! ```text
//! {root}/
//!   {collection}/
//!     {key}.{ext}      single-file record
//!     {key}/           directory-shaped record
//! ```

mod fs;
mod locks;
mod resolver;

pub use fs::{create_dir_all, write_atomic, write_file};
pub use locks::LockTable;
pub use resolver::{normalize, PathResolver, Resolved};
