//! JSON serializer
//!
//! Tab-indented, human-readable JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Result, StoreError};

use super::Serializer;

/// Default serializer: pretty JSON indented with tabs, stored as `*.json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    const EXTENSION: &'static str = "json";
    const INDENT: &'static [u8] = b"\t";

    pub fn new() -> Self {
        Self
    }
}

impl Serializer for JsonSerializer {
    fn extension(&self) -> &str {
        Self::EXTENSION
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(Self::INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn test_output_is_tab_indented() {
        let user = User { name: "A".to_string(), age: 1 };
        let bytes = JsonSerializer.serialize(&user).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\n\t\"name\": \"A\",\n\t\"age\": 1\n}"
        );
    }

    #[test]
    fn test_decode_typed() {
        let user: User = JsonSerializer
            .deserialize(b"{\"name\": \"B\", \"age\": 2}")
            .unwrap();
        assert_eq!(user, User { name: "B".to_string(), age: 2 });
    }

    #[test]
    fn test_malformed_input() {
        let err = JsonSerializer.deserialize::<User>(b"{not json").unwrap_err();
        assert!(matches!(err, StoreError::Deserialization(_)));
    }

    #[test]
    fn test_non_string_map_keys_fail_to_encode() {
        let mut map = HashMap::new();
        map.insert(vec![1u8, 2], "value");

        let err = JsonSerializer.serialize(&map).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_extension() {
        assert_eq!(JsonSerializer.extension(), "json");
    }
}
