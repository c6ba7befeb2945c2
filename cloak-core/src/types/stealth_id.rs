//! Stealth identifier: a tagged 32-byte destination value.
//!
//! A stealth identifier is NOT a standard 20-byte account address. It packs
//! a normally-derived address into a recognizably-tagged `bytes32` slot:
//!
//! ```text
//! 0xCAFE ‖ 10 zero bytes ‖ 20-byte account address
//! ```
//!
//! The layout is bit-exact and part of the on-chain wire contract.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::constants::{ADDRESS_SIZE, STEALTH_ID_SIZE, STEALTH_PAD_SIZE, STEALTH_TAG};
use crate::error::{CloakError, Result};

/// A tagged 32-byte stealth identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StealthId(B256);

impl StealthId {
    /// Wraps a standard address in the tagged 32-byte encoding.
    pub fn from_address(address: Address) -> Self {
        let mut bytes = [0u8; STEALTH_ID_SIZE];
        bytes[..2].copy_from_slice(&STEALTH_TAG);
        bytes[2 + STEALTH_PAD_SIZE..].copy_from_slice(address.as_slice());
        Self(B256::from(bytes))
    }

    /// Parses a strict 32-byte identifier: tag bytes present, padding zero.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != STEALTH_ID_SIZE {
            return Err(CloakError::InvalidKey(format!(
                "stealth id must be {} bytes, got {}",
                STEALTH_ID_SIZE,
                bytes.len()
            )));
        }
        if bytes[..2] != STEALTH_TAG {
            return Err(CloakError::InvalidKey(
                "stealth id missing 0xcafe tag".into(),
            ));
        }
        if bytes[2..2 + STEALTH_PAD_SIZE].iter().any(|&b| b != 0) {
            return Err(CloakError::InvalidKey(
                "stealth id padding must be zero".into(),
            ));
        }
        Ok(Self(B256::from_slice(bytes)))
    }

    /// Parses a strict identifier from a 0x-prefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)?;
        Self::from_bytes(&bytes)
    }

    /// The standard 20-byte address embedded in bytes 12..32.
    pub fn embedded_address(&self) -> Address {
        Address::from_slice(&self.0[2 + STEALTH_PAD_SIZE..])
    }

    /// Raw 32-byte view.
    pub fn as_bytes(&self) -> &[u8; STEALTH_ID_SIZE] {
        &self.0 .0
    }

    /// The identifier as a `bytes32` word.
    pub fn as_b256(&self) -> B256 {
        self.0
    }

    /// 0x-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Loose predicate the transfer classifier uses to decide whether a
    /// recipient string names a stealth account: lowercase `0xcafe` prefix
    /// followed by any amount of hex. Deliberately NOT anchored to exactly
    /// 32 bytes; strict validation happens at `from_hex` when the value is
    /// actually consumed.
    pub fn looks_like_stealth_hex(s: &str) -> bool {
        match s.strip_prefix("0xcafe") {
            Some(rest) => rest.chars().all(|c| c.is_ascii_hexdigit()),
            None => false,
        }
    }
}

impl std::fmt::Debug for StealthId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StealthId({})", self.to_hex())
    }
}

impl std::fmt::Display for StealthId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<StealthId> for B256 {
    fn from(id: StealthId) -> Self {
        id.0
    }
}
