//! JSON record codec for durable key-value storage
//!
//! Every stored value is a single JSON document:
//! ```text
//! requests          -> [ MedicalRequest, ... ]
//! drones            -> [ Drone, ... ]
//! currentEmergency  -> { "injuryType": ..., "location": ... }
//! ```
//!
//! Field names are camelCase and drone statuses kebab-case so records written
//! by earlier clients decode unchanged. Request timestamps are written as epoch
//! milliseconds; ISO-8601 strings from earlier clients are accepted on read.

use chrono::DateTime;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum stored document size (10 MB) to prevent memory exhaustion
pub const MAX_RECORD_SIZE: usize = 10 * 1024 * 1024;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Record too large: {0} bytes (max: {MAX_RECORD_SIZE})")]
    RecordTooLarge(usize),

    #[error("JSON encode error: {0}")]
    EncodeError(#[source] serde_json::Error),

    #[error("JSON decode error: {0}")]
    DecodeError(#[source] serde_json::Error),
}

/// Encode a value into a JSON document
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let text = serde_json::to_string(value).map_err(CodecError::EncodeError)?;

    if text.len() > MAX_RECORD_SIZE {
        return Err(CodecError::RecordTooLarge(text.len()));
    }

    Ok(text)
}

/// Decode a JSON document
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    if text.len() > MAX_RECORD_SIZE {
        return Err(CodecError::RecordTooLarge(text.len()));
    }

    serde_json::from_str(text).map_err(CodecError::DecodeError)
}

/// Decode a value that may be absent
///
/// A missing or blank document decodes to `T::default()`.
pub fn decode_or_default<T: DeserializeOwned + Default>(
    text: Option<&str>,
) -> Result<T, CodecError> {
    match text {
        Some(t) if !t.trim().is_empty() => decode(t),
        _ => Ok(T::default()),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimestamp {
    Millis(u64),
    Text(String),
}

/// Read a timestamp stored as epoch milliseconds or as an ISO-8601 string
pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredTimestamp::deserialize(deserializer)? {
        StoredTimestamp::Millis(ms) => Ok(ms),
        StoredTimestamp::Text(text) => {
            let instant = DateTime::parse_from_rfc3339(text.trim())
                .map_err(<D::Error as de::Error>::custom)?;
            u64::try_from(instant.timestamp_millis()).map_err(|_| {
                <D::Error as de::Error>::custom(format!("timestamp before epoch: {}", text))
            })
        }
    }
}
