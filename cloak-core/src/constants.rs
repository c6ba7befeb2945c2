//! Protocol constants for Cloak.
//!
//! Anything a host may want to substitute at runtime (signing message,
//! relayer wallet, contract addresses, bridge routes) also appears in the
//! router configuration; the values here are the protocol defaults.

use alloy_primitives::{address, Address};

/// Tag bytes marking a 32-byte value as a stealth identifier.
pub const STEALTH_TAG: [u8; 2] = [0xCA, 0xFE];

/// Zero padding between the tag and the embedded address.
pub const STEALTH_PAD_SIZE: usize = 10;

/// Size of a stealth identifier (matches a contract `bytes32` slot).
pub const STEALTH_ID_SIZE: usize = 32;

/// Size of a standard account address in bytes.
pub const ADDRESS_SIZE: usize = 20;

// ═══════════════════════════════════════════════════════════════════════════════
// SECP256K1 SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a secp256k1 private scalar in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of an uncompressed SEC1 public key (0x04 prefix + x + y).
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Size of a compressed SEC1 public key (0x02/0x03 prefix + x).
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Size of a recoverable ECDSA signature (r + s + v).
pub const SIGNATURE_SIZE: usize = 65;

/// Length of a 65-byte signature as a 0x-prefixed hex string.
pub const SIGNATURE_HEX_LEN: usize = 132;

// ═══════════════════════════════════════════════════════════════════════════════
// KEY DERIVATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Fixed message signed by the wallet to seed account key derivation.
///
/// The derivation is deterministic: the same signature always yields the
/// same two keypairs, so keys can be regenerated from any device. This
/// message must never be reused for another purpose.
pub const DEFAULT_SIGNING_MESSAGE: &str =
    "Sign this message to access your Cloak account.\n\nOnly sign this message for a trusted client!";

/// Mask clearing the most significant bit of a derived secret's first byte,
/// biasing the value into the curve's valid scalar range.
pub const SCALAR_MSB_MASK: u8 = 0x7f;

// ═══════════════════════════════════════════════════════════════════════════════
// ROUTING DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Sentinel address meaning "native token" rather than an ERC-20.
pub const NATIVE_TOKEN_ADDRESS: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Relayer wallet bound into every meta-transaction withdrawal message.
pub const DEFAULT_RELAYER_ADDRESS: Address = address!("79Be957bf7e3003aFd0e78f04Bacbc93D3ef2fB7");

/// Default transfer-contract address for supported chains.
pub const DEFAULT_TRANSFER_CONTRACT: Address = address!("A19eE10Ed543745dd315e33C8934C7907e827Ca1");

/// Default relay service base URL.
pub const DEFAULT_RELAY_URL: &str = "https://relay.cloak.network";

/// Default ERC-20 decimals when the request does not specify them.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// The single cross-chain route enabled by default: Sepolia → Mumbai.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// Destination chain of the default bridge route.
pub const MUMBAI_CHAIN_ID: u64 = 80001;

/// CCIP destination-chain selector for Mumbai.
pub const CCIP_MUMBAI_SELECTOR: u64 = 12532609583862916517;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stealth_layout_fills_a_bytes32() {
        assert_eq!(
            STEALTH_TAG.len() + STEALTH_PAD_SIZE + ADDRESS_SIZE,
            STEALTH_ID_SIZE
        );
    }

    #[test]
    fn test_signature_hex_len_matches_raw_size() {
        // "0x" + 2 hex chars per byte
        assert_eq!(SIGNATURE_HEX_LEN, 2 + SIGNATURE_SIZE * 2);
    }

    #[test]
    fn test_native_token_sentinel() {
        assert_eq!(
            format!("{NATIVE_TOKEN_ADDRESS:#x}"),
            "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
        );
    }
}
