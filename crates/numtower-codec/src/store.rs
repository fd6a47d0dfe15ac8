//! Persisted value store
//!
//! A [`ValueStore`] is a named set of values, used as the calculator's memory
//! registers. On disk it is a `bincode` header followed by the payload:
//!
//! ```text
//! per entry: u16 name length | UTF-8 name | u32 value length | encoded value
//! ```
//!
//! The header records the entry count, the payload length and a CRC-32 of the
//! payload, so truncated or corrupted files are reported instead of loaded.

use crate::format;
use crate::{CodecError, CodecResult};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use numtower_value::NumberValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;

/// Store file magic number
pub const STORE_MAGIC: &[u8; 8] = b"NUMTOWR\x01";

/// Current store format version
pub const STORE_VERSION: u32 = 1;

/// Store file header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHeader {
    /// Magic number for format identification
    pub magic: [u8; 8],

    /// Format version
    pub version: u32,

    /// Number of entries in the payload
    pub entry_count: u32,

    /// Payload size in bytes
    pub payload_len: u64,

    /// CRC-32 of the payload
    pub checksum: u32,
}

impl StoreHeader {
    fn for_payload(entry_count: u32, payload: &[u8]) -> Self {
        Self {
            magic: *STORE_MAGIC,
            version: STORE_VERSION,
            entry_count,
            payload_len: payload.len() as u64,
            checksum: crc32fast::hash(payload),
        }
    }

    fn validate(&self) -> CodecResult<()> {
        if self.magic != *STORE_MAGIC {
            return Err(CodecError::Corrupted(
                "invalid magic number in header".to_string(),
            ));
        }
        if self.version > STORE_VERSION {
            return Err(CodecError::VersionMismatch {
                found: self.version,
                supported: STORE_VERSION,
            });
        }
        Ok(())
    }
}

/// Named values kept in name order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueStore {
    entries: BTreeMap<String, NumberValue>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, returning the value it replaces
    pub fn insert(&mut self, name: impl Into<String>, value: NumberValue) -> Option<NumberValue> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&NumberValue> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<NumberValue> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NumberValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let entry_count = u32::try_from(self.entries.len())
            .map_err(|_| CodecError::Corrupted("too many entries".to_string()))?;

        let mut payload = Vec::new();
        for (name, value) in &self.entries {
            let name_len =
                u16::try_from(name.len()).map_err(|_| CodecError::NameTooLong(name.len()))?;
            let encoded = format::to_bytes(value)?;
            let value_len = u32::try_from(encoded.len()).map_err(|_| {
                CodecError::Corrupted(format!("value `{name}` encodes to {} bytes", encoded.len()))
            })?;

            payload.write_u16::<BigEndian>(name_len)?;
            payload.extend_from_slice(name.as_bytes());
            payload.write_u32::<BigEndian>(value_len)?;
            payload.extend_from_slice(&encoded);
        }

        let header = StoreHeader::for_payload(entry_count, &payload);
        let mut out = bincode::serialize(&header)?;
        out.extend_from_slice(&payload);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let header: StoreHeader = bincode::deserialize(bytes)?;
        header.validate()?;

        let header_len = bincode::serialized_size(&header)? as usize;
        let payload = &bytes[header_len.min(bytes.len())..];
        let expected = header.payload_len as usize;
        if payload.len() < expected {
            return Err(CodecError::Truncated);
        }
        if payload.len() > expected {
            return Err(CodecError::TrailingBytes(payload.len() - expected));
        }

        let actual = crc32fast::hash(payload);
        if actual != header.checksum {
            return Err(CodecError::ChecksumMismatch {
                expected: header.checksum,
                actual,
            });
        }

        let mut cursor = Cursor::new(payload);
        let mut store = ValueStore::new();
        for _ in 0..header.entry_count {
            let name_len = cursor.read_u16::<BigEndian>()? as usize;
            let mut name = vec![0u8; name_len];
            cursor.read_exact(&mut name)?;
            let name = String::from_utf8(name)
                .map_err(|err| CodecError::Corrupted(format!("entry name: {err}")))?;

            let value_len = cursor.read_u32::<BigEndian>()? as usize;
            let start = cursor.position() as usize;
            let end = start
                .checked_add(value_len)
                .filter(|end| *end <= payload.len())
                .ok_or(CodecError::Truncated)?;
            let value = format::from_bytes(&payload[start..end])?;
            cursor.set_position(end as u64);

            if store.insert(name.clone(), value).is_some() {
                return Err(CodecError::Corrupted(format!("duplicate entry `{name}`")));
            }
        }

        let consumed = cursor.position() as usize;
        if consumed != payload.len() {
            return Err(CodecError::TrailingBytes(payload.len() - consumed));
        }
        Ok(store)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes).map_err(CodecError::Io)?;
        log::info!(
            "saved {} value(s) to {} ({} bytes)",
            self.len(),
            path.display(),
            bytes.len()
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(CodecError::Io)?;
        match Self::from_bytes(&bytes) {
            Ok(store) => {
                log::debug!("loaded {} value(s) from {}", store.len(), path.display());
                Ok(store)
            }
            Err(err) => {
                log::warn!("rejecting value store {}: {err}", path.display());
                Err(err)
            }
        }
    }
}

impl FromIterator<(String, NumberValue)> for ValueStore {
    fn from_iter<I: IntoIterator<Item = (String, NumberValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_has_fixed_size() {
        let header = StoreHeader::for_payload(0, &[]);
        assert_eq!(bincode::serialized_size(&header).unwrap(), 28);
    }

    #[test]
    fn empty_store_round_trips() {
        let bytes = ValueStore::new().to_bytes().unwrap();
        assert_eq!(bytes.len(), 28);
        assert!(ValueStore::from_bytes(&bytes).unwrap().is_empty());
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut header = StoreHeader::for_payload(0, &[]);
        header.version = STORE_VERSION + 1;
        let bytes = bincode::serialize(&header).unwrap();
        assert!(matches!(
            ValueStore::from_bytes(&bytes),
            Err(CodecError::VersionMismatch { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn bad_magic_is_corruption() {
        let mut header = StoreHeader::for_payload(0, &[]);
        header.magic = *b"BADMAGIC";
        let bytes = bincode::serialize(&header).unwrap();
        assert!(matches!(
            ValueStore::from_bytes(&bytes),
            Err(CodecError::Corrupted(_))
        ));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut store = ValueStore::new();
        store.insert("x".repeat(70_000), NumberValue::Integer(1));
        assert!(matches!(
            store.to_bytes(),
            Err(CodecError::NameTooLong(70_000))
        ));
    }
}
