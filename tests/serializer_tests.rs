//! Tests for plugging a custom Serializer into the Store

use docstore::config::Config;
use docstore::{Result, Serializer, Store, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::TempDir;

/// Compact JSON stored under a different extension
struct CompactJson;

impl Serializer for CompactJson {
    fn extension(&self) -> &str {
        "cjson"
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Deserialization(e.to_string()))
    }
}

#[test]
fn test_custom_serializer_extension_and_format() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().root_dir(temp_dir.path()).build();
    let store = Store::with_serializer(config, CompactJson).unwrap();
    let nums = store.collection("nums");

    nums.write("list", &vec![1, 2, 3]).unwrap();

    let path = temp_dir.path().join("nums").join("list.cjson");
    assert_eq!(std::fs::read(path).unwrap(), b"[1,2,3]");

    let read: Vec<i32> = nums.read("list").unwrap();
    assert_eq!(read, vec![1, 2, 3]);
    assert_eq!(nums.keys().unwrap(), vec!["list"]);

    nums.delete("list").unwrap();
    assert!(!nums.contains("list").unwrap());
}
