//! Opaque record keys.
//!
//! # Invariants
//! - A key is compared by its exact text; no format is imposed.
//! - JSON numbers decode to their decimal text, so `1717171717171` and
//!   `"1717171717171"` name the same record.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an item or skill, as issued by the record store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Generates a fresh random key for records created in-process.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&RecordKey> for RecordKey {
    fn from(value: &RecordKey) -> Self {
        value.clone()
    }
}

impl From<Uuid> for RecordKey {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

struct RecordKeyVisitor;

impl Visitor<'_> for RecordKeyVisitor {
    type Value = RecordKey;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a string or integer record key")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RecordKey::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(RecordKey(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(RecordKey(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(RecordKey(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        // `Date.now() + Math.random()` style keys.
        if value.fract() == 0.0 && value.abs() < 9.0e15 {
            return Ok(RecordKey((value as i64).to_string()));
        }
        Ok(RecordKey(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RecordKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordKey;

    #[test]
    fn numeric_and_string_keys_decode_to_same_text() {
        let from_number: RecordKey = serde_json::from_str("1717171717171").unwrap();
        let from_string: RecordKey = serde_json::from_str("\"1717171717171\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "1717171717171");
    }

    #[test]
    fn keys_serialize_as_plain_strings() {
        let key = RecordKey::from("goal-7");
        assert_eq!(serde_json::to_value(&key).unwrap(), serde_json::json!("goal-7"));
    }

    #[test]
    fn generated_keys_are_distinct() {
        assert_ne!(RecordKey::generate(), RecordKey::generate());
    }
}
