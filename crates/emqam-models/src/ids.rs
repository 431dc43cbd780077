//! User identifier.
//!
//! Users are keyed by a 12-byte identifier whose textual form is exactly 24
//! hexadecimal characters (the object-id format used by the user directory).
//! Parsing is the syntactic check the session tier performs before it ever
//! consults a store.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of a [`UserId`] in bytes.
pub const USER_ID_LEN: usize = 12;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId([u8; USER_ID_LEN]);

/// The string is not 24 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid user id: expected {} hexadecimal characters", USER_ID_LEN * 2)]
pub struct InvalidUserId;

impl UserId {
    /// Create a new random ID.
    pub fn generate() -> Self {
        Self(rand::random())
    }

    /// Lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != USER_ID_LEN * 2 {
            return Err(InvalidUserId);
        }
        let mut bytes = [0u8; USER_ID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidUserId)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.to_hex())
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
