//! JWE header parameters
//!
//! [`JweHeaders`] is the caller-owned header container. Key wrapping never
//! writes to it directly: it returns [`HeaderUpdates`] which the caller
//! applies once the whole operation has succeeded.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header parameter carrying the key management algorithm
pub const ALG: &str = "alg";
/// Header parameter carrying the key wrap initialization vector
pub const IV: &str = "iv";
/// Header parameter carrying the key wrap authentication tag
pub const TAG: &str = "tag";

/// JOSE header of a JWE message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JweHeaders(Map<String, Value>);

impl JweHeaders {
    /// Creates an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header with the `alg` parameter set
    pub fn with_algorithm(alg: &str) -> Self {
        let mut headers = Self::new();
        headers.set_header(ALG, alg);
        headers
    }

    /// Gets a string-valued header parameter
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Sets a string-valued header parameter, replacing any previous value
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.0
            .insert(name.to_string(), Value::String(value.to_string()));
    }

    /// Returns true if the parameter is present, whatever its type
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// The `alg` parameter
    pub fn algorithm(&self) -> Option<&str> {
        self.get_header(ALG)
    }

    /// The `iv` parameter
    pub fn iv(&self) -> Option<&str> {
        self.get_header(IV)
    }

    /// The `tag` parameter
    pub fn tag(&self) -> Option<&str> {
        self.get_header(TAG)
    }

    /// Base64url-decodes a header parameter
    pub fn decode_header(&self, name: &str) -> Result<Vec<u8>> {
        let value = self
            .get_header(name)
            .ok_or_else(|| Error::MissingHeader(name.to_string()))?;
        URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|e| Error::InvalidHeader {
                name: name.to_string(),
                reason: format!("not base64url: {}", e),
            })
    }

    /// Writes every staged update into this header
    pub fn apply(&mut self, updates: &HeaderUpdates) {
        for (name, value) in updates.iter() {
            self.set_header(name, value);
        }
    }

    /// Number of header parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no parameters are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the header to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a header from a JSON object string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Map<String, Value>> for JweHeaders {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Header parameters staged by a key wrap, in the order they were produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderUpdates(Vec<(String, String)>);

impl HeaderUpdates {
    /// Stages a parameter, replacing an earlier value for the same name
    pub fn set(&mut self, name: &str, value: String) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    /// Stages a parameter as base64url without padding
    pub fn set_encoded(&mut self, name: &str, bytes: &[u8]) {
        self.set(name, URL_SAFE_NO_PAD.encode(bytes));
    }

    /// Gets a staged parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over staged `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of staged parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_set_and_get_header() {
        let mut headers = JweHeaders::with_algorithm("A128GCMKW");
        headers.set_header("enc", "A256GCM");

        assert_eq!(headers.algorithm(), Some("A128GCMKW"));
        assert_eq!(headers.get_header("enc"), Some("A256GCM"));
        assert_eq!(headers.iv(), None);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_non_string_values_are_not_headers_strings() {
        let headers =
            JweHeaders::from_json(r#"{"alg":"A256GCMKW","zip":1,"crit":["b64"]}"#).unwrap();
        assert!(headers.contains("zip"));
        assert_eq!(headers.get_header("zip"), None);
        assert_eq!(headers.algorithm(), Some("A256GCMKW"));
    }

    #[test]
    fn test_apply_updates_in_one_step() {
        let mut updates = HeaderUpdates::default();
        updates.set(IV, "first".to_string());
        updates.set(TAG, "tag".to_string());
        updates.set(IV, "second".to_string());
        assert_eq!(updates.len(), 2);

        let mut headers = JweHeaders::with_algorithm("A192GCMKW");
        headers.apply(&updates);
        assert_eq!(headers.iv(), Some("second"));
        assert_eq!(headers.tag(), Some("tag"));
        assert_eq!(headers.algorithm(), Some("A192GCMKW"));
    }

    #[test]
    fn test_decode_header() {
        let mut updates = HeaderUpdates::default();
        updates.set_encoded(IV, &[0xFB, 0xFF, 0x00]);
        assert_eq!(updates.get(IV), Some("-_8A"));

        let mut headers = JweHeaders::new();
        headers.apply(&updates);
        assert_eq!(headers.decode_header(IV).unwrap(), vec![0xFB, 0xFF, 0x00]);

        assert_matches!(headers.decode_header(TAG), Err(Error::MissingHeader(name)) if name == TAG);

        headers.set_header(TAG, "not base64!");
        assert_matches!(headers.decode_header(TAG), Err(Error::InvalidHeader { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut headers = JweHeaders::with_algorithm("A128GCMKW");
        headers.set_header(IV, "AAAAAAAAAAAAAAAA");
        let json = headers.to_json().unwrap();
        assert_eq!(JweHeaders::from_json(&json).unwrap(), headers);
        assert!(JweHeaders::from_json("[1,2]").is_err());
    }
}
