use std::fmt;
use std::str::FromStr;

use sha2::Digest;

use crate::ModelError;

/// A deterministic record identifier.
///
/// Derived from the record's source (file path or SIDRA table) and its
/// 1-based position in that source, so re-ingesting the same input yields the
/// same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId([u8; 16]);

impl RecordId {
    /// `sha256("<source>\0<record_number>")`, truncated to 16 bytes.
    pub fn derive(source: &str, record_number: u64) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update([0u8]);
        hasher.update(record_number.to_string().as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for RecordId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| ModelError::InvalidRecordId(s.to_string()))?;
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|_| ModelError::InvalidRecordId(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_is_deterministic() {
        let a = RecordId::derive("2023.csv", 1);
        let b = RecordId::derive("2023.csv", 1);
        let c = RecordId::derive("2023.csv", 2);
        let d = RecordId::derive("2024.csv", 1);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn record_id_parses_its_hex_form() {
        let id = RecordId::derive("sidra:6407", 7);
        let parsed: RecordId = id.to_hex().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn record_id_serializes_as_hex_string() {
        let id = RecordId::derive("2023.csv", 3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
    }
}
