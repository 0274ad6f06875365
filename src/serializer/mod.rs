//! Serializer Module
//!
//! Converts records to and from their persisted byte form.
//!
//! ## Responsibilities
//! - Encode a value into the bytes written to `{key}.{ext}`
//! - Decode those bytes back into a typed value
//! - Name the file extension that marks a record file
//!
//! The store is generic over the serializer, so any serde format can be
//! plugged in. The default is [`JsonSerializer`].

mod json;

pub use json::JsonSerializer;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Strategy for encoding records on disk
pub trait Serializer: Send + Sync {
    /// File extension (without the dot) given to record files
    fn extension(&self) -> &str;

    /// Encode `value` into bytes
    ///
    /// Fails with `StoreError::Serialization` if the value cannot be encoded.
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes into a value
    ///
    /// Fails with `StoreError::Deserialization` on malformed content.
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}
