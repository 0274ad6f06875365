//! # docstore
//!
//! A minimal embedded document store with:
//! - One file per record, one directory per collection
//! - Pluggable serialization (tab-indented JSON by default)
//! - Per-collection write serialization, lock-free reads
//! - Single-file and directory-shaped records
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                               │
//! │        store.collection("users").write("A", &user)           │
//! └──────────────┬───────────────────────────────┬──────────────┘
//!                │ write / delete                │ read / read_all
//!                ▼                               │ (no lock)
//!   ┌───────────────────────┐                    │
//!   │       LockTable       │                    │
//!   │ (one Mutex/collection)│                    │
//!   └───────────┬───────────┘                    │
//!               └───────────────┬────────────────┘
//!                               ▼
//!                    ┌─────────────────────┐      ┌─────────────┐
//!                    │    PathResolver     │      │ Serializer  │
//!                    │ {key} → {key}.json  │      │   (JSON)    │
//!                    └──────────┬──────────┘      └─────────────┘
//!                               ▼
//!                    {root}/{collection}/{key}.json
//! ```
//!
//! ## Known limitation
//!
//! With the default [`WriteMode::Direct`] a record file is truncated and
//! rewritten in place. A crash mid-write, or a reader racing a writer, can
//! see a truncated record. [`WriteMode::Atomic`] stages the bytes in a
//! `.tmp` file and renames it into place instead.
//!
//! ## Example
//!
//! ```no_run
//! use docstore::Store;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! # fn main() -> docstore::Result<()> {
//! let store = Store::open_path("./db")?;
//! let users = store.collection("users");
//! users.write("A", &User { name: "A".into(), age: 1 })?;
//! let user: User = users.read("A")?;
//! users.delete("A")?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod serializer;
pub mod storage;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{Config, WriteMode};
pub use serializer::{JsonSerializer, Serializer};
pub use store::{Collection, RawRecord, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of docstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
