//! Account identities for owners and transaction targets
//!
//! Addresses are 20-byte identifiers rendered as `0x`-prefixed hex,
//! the format the deployment tooling hands to the ledger at construction.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an address in bytes
pub const ADDRESS_LEN: usize = 20;

/// Errors from parsing an address string
#[derive(Error, Debug)]
pub enum AddressError {
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),
    #[error("address must be {expected} hex characters, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("address contains non-hex characters: {0}")]
    InvalidHex(String),
}

/// A 20-byte account identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address, never valid as a transaction target
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Check whether this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| AddressError::MissingPrefix(s.to_string()))?;

        if hex_part.len() != ADDRESS_LEN * 2 {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LEN * 2,
                got: hex_part.len(),
            });
        }

        let bytes = hex::decode(hex_part).map_err(|_| AddressError::InvalidHex(s.to_string()))?;

        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&bytes);
        Ok(Address(out))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let addr: Address = "0x3f3eda70b1732644f5c8ea8c88d7de978ecf791f".parse().unwrap();
        assert_eq!(addr.to_string(), "0x3f3eda70b1732644f5c8ea8c88d7de978ecf791f");
        assert!(!addr.is_zero());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        // No prefix
        assert!(matches!(
            "3f3eda70b1732644f5c8ea8c88d7de978ecf791f".parse::<Address>(),
            Err(AddressError::MissingPrefix(_))
        ));

        // Wrong length
        assert!(matches!(
            "0x3f3eda".parse::<Address>(),
            Err(AddressError::InvalidLength { .. })
        ));

        // Non-hex characters
        assert!(matches!(
            "0xzz3eda70b1732644f5c8ea8c88d7de978ecf791f".parse::<Address>(),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_zero_address() {
        let zero: Address = "0x0000000000000000000000000000000000000000".parse().unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Address::ZERO);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr: Address = "0x3f3eda70b1732644f5c8ea8c88d7de978ecf791f".parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x3f3eda70b1732644f5c8ea8c88d7de978ecf791f\"");

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
