//! A single share and its text form.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ShamirError;
use crate::encoding::{from_base64, to_base64};

/// One share of a split secret: `[index] ++ values`.
///
/// Opaque on purpose. Below the threshold a share is indistinguishable from
/// random bytes, and `Debug` only shows the index and length so shares don't
/// end up copied into logs.
///
/// Serializes as a base64 string of the raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Share {
    bytes: Vec<u8>,
}

impl Share {
    pub(crate) fn with_capacity(index: u8, secret_len: usize) -> Self {
        let mut bytes = Vec::with_capacity(secret_len + 1);
        bytes.push(index);
        Self { bytes }
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Wrap raw share bytes, checking the structural invariants: an index
    /// byte that is nonzero, followed by at least one value.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ShamirError> {
        match bytes.first() {
            None => Err(ShamirError::MalformedShare("share is empty")),
            Some(0) => Err(ShamirError::MalformedShare("share index must be nonzero")),
            Some(_) if bytes.len() < 2 => {
                Err(ShamirError::MalformedShare("share carries no values"))
            }
            Some(_) => Ok(Self { bytes }),
        }
    }

    /// Decode a share from its base64 text form.
    pub fn from_base64(text: &str) -> Result<Self, ShamirError> {
        Self::from_bytes(from_base64(text)?)
    }

    /// Base64 text form, suitable for printing on paper or sending to a trustee.
    pub fn to_base64(&self) -> String {
        to_base64(&self.bytes)
    }

    /// The x-coordinate this share was evaluated at.
    pub fn index(&self) -> u8 {
        self.bytes[0]
    }

    /// One field evaluation per secret byte.
    pub fn values(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Length of the secret this share belongs to.
    pub fn secret_len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("index", &self.index())
            .field("secret_len", &self.secret_len())
            .finish_non_exhaustive()
    }
}

impl Serialize for Share {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Share {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Share::from_base64(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_accessors() {
        let share = Share::from_bytes(vec![3, 0xAA, 0xBB]).unwrap();
        assert_eq!(share.index(), 3);
        assert_eq!(share.values(), &[0xAA, 0xBB]);
        assert_eq!(share.secret_len(), 2);
        assert_eq!(share.as_bytes(), &[3, 0xAA, 0xBB]);
        assert_eq!(share.into_bytes(), vec![3, 0xAA, 0xBB]);
    }

    #[test]
    fn structural_checks() {
        assert!(matches!(
            Share::from_bytes(vec![]),
            Err(ShamirError::MalformedShare(_))
        ));
        assert!(matches!(
            Share::from_bytes(vec![0, 1, 2]),
            Err(ShamirError::MalformedShare(_))
        ));
        assert!(matches!(
            Share::from_bytes(vec![4]),
            Err(ShamirError::MalformedShare(_))
        ));
    }

    #[test]
    fn base64_text_form() {
        let share = Share::from_bytes(vec![1, b'h', b'i']).unwrap();
        assert_eq!(share.to_base64(), "AWhp");
        assert_eq!(Share::from_base64(" AWhp\n").unwrap(), share);
        assert!(matches!(
            Share::from_base64("%%%"),
            Err(ShamirError::Encoding(_))
        ));
    }

    #[test]
    fn serializes_as_string() {
        let share = Share::from_bytes(vec![2, 9, 9, 9]).unwrap();
        let json = serde_json::to_string(&share).unwrap();
        assert_eq!(json, "\"AgkJCQ==\"");
        let back: Share = serde_json::from_str(&json).unwrap();
        assert_eq!(back, share);

        // A zero index is rejected at the serde boundary too.
        assert!(serde_json::from_str::<Share>("\"AAEC\"").is_err());
    }

    #[test]
    fn debug_does_not_dump_values() {
        let share = Share::from_bytes(vec![7, 0xDE, 0xAD]).unwrap();
        let printed = format!("{share:?}");
        assert!(printed.contains("index: 7"));
        assert!(!printed.contains("222"));
        assert!(!printed.contains("173"));
    }
}
