//! Opaque 12-byte record identifiers rendered as 24 lowercase hex characters.
//!
//! Layout: 4-byte big-endian Unix timestamp (seconds) followed by 8 random
//! bytes. Ids generated in different seconds therefore sort by creation time,
//! but nothing relies on that ordering.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::CoreError;

/// Number of raw bytes in an [`ObjectId`].
pub const OBJECT_ID_LEN: usize = 12;

/// Length of the hex rendering of an [`ObjectId`].
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_LEN * 2;

/// Opaque, immutable record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generate a fresh id stamped with the current time.
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp().clamp(0, i64::from(u32::MAX)) as u32;
        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::rng().fill(&mut bytes[4..]);
        Self(bytes)
    }

    /// Lowercase hex rendering, the form stored in the database.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Whether `raw` has the shape of an id (24 hex characters, any case).
    pub fn is_valid(raw: &str) -> bool {
        raw.len() == OBJECT_ID_HEX_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(raw) {
            return Err(CoreError::validation(format!(
                "\"{raw}\" is not a valid id (expected {OBJECT_ID_HEX_LEN} hex characters)"
            )));
        }
        let mut bytes = [0u8; OBJECT_ID_LEN];
        for (i, chunk) in raw.as_bytes().chunks(2).enumerate() {
            // Both characters were checked above, so the pair is valid hex.
            let pair = std::str::from_utf8(chunk).map_err(|e| CoreError::Internal(e.to_string()))?;
            bytes[i] =
                u8::from_str_radix(pair, 16).map_err(|e| CoreError::Internal(e.to_string()))?;
        }
        Ok(Self(bytes))
    }
}
