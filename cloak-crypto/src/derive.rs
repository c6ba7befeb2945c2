//! Signature-seeded account key derivation.
//!
//! An account's stealth keys are derived deterministically from one wallet
//! signature over a fixed message: SHA-512 stretches the 65-byte signature
//! into 64 bytes, the halves become the operational and encryption secrets.
//! Re-signing the same message on any device regenerates the same keys, so
//! nothing needs to be stored.

use zeroize::Zeroizing;

use cloak_core::constants::{PRIVATE_KEY_SIZE, SCALAR_MSB_MASK, SIGNATURE_HEX_LEN};
use cloak_core::error::{CloakError, Result};

use crate::hash::sha512;
use crate::keypair::Keypair;

/// The two keypairs backing a stealth account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountKeys {
    /// Spending keypair; stealth addresses are offsets of its public point.
    pub operational: Keypair,
    /// Envelope keypair; payment ciphertexts are addressed to it.
    pub encryption: Keypair,
}

fn is_hex_signature(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Derives the account keypairs from a 65-byte wallet signature, given as
/// 0x-prefixed hex.
///
/// The up-front check only rejects a non-hex string of exactly the
/// canonical signature length; hex input of any other length is accepted
/// and derives keys. Kept as-is for compatibility with already-derived
/// accounts, which depend on the historical behavior byte for byte.
pub fn derive_account_keys(signature: &str) -> Result<AccountKeys> {
    if !is_hex_signature(signature) && signature.len() == SIGNATURE_HEX_LEN {
        return Err(CloakError::InvalidSignature(
            "signature is not valid hex".into(),
        ));
    }

    let raw = Zeroizing::new(
        hex::decode(signature.strip_prefix("0x").unwrap_or(signature))
            .map_err(|e| CloakError::InvalidSignature(e.to_string()))?,
    );

    let digest = Zeroizing::new(sha512(&raw));

    let mut operational_seed = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    operational_seed.copy_from_slice(&digest[..PRIVATE_KEY_SIZE]);
    operational_seed[0] &= SCALAR_MSB_MASK;

    let mut encryption_seed = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    encryption_seed.copy_from_slice(&digest[PRIVATE_KEY_SIZE..]);
    encryption_seed[0] &= SCALAR_MSB_MASK;

    let operational = Keypair::from_private_bytes(operational_seed.as_slice())?;
    let encryption = Keypair::from_private_bytes(encryption_seed.as_slice())?;

    tracing::debug!(
        operational = %operational.eth_address(),
        "derived account keys from wallet signature"
    );

    Ok(AccountKeys {
        operational,
        encryption,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_signature() -> String {
        format!("0x{}", "ab".repeat(65))
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_account_keys(&sample_signature()).unwrap();
        let b = derive_account_keys(&sample_signature()).unwrap();
        assert_eq!(a.operational, b.operational);
        assert_eq!(a.encryption, b.encryption);
    }

    #[test]
    fn test_operational_and_encryption_differ() {
        let keys = derive_account_keys(&sample_signature()).unwrap();
        assert_ne!(keys.operational, keys.encryption);
    }

    #[test]
    fn test_seeds_are_masked_sha512_halves() {
        let keys = derive_account_keys(&sample_signature()).unwrap();

        let raw = hex::decode(&sample_signature()[2..]).unwrap();
        let digest = sha512(&raw);
        let mut op = [0u8; 32];
        op.copy_from_slice(&digest[..32]);
        op[0] &= 0x7f;
        let mut enc = [0u8; 32];
        enc.copy_from_slice(&digest[32..]);
        enc[0] &= 0x7f;

        assert_eq!(*keys.operational.secret_bytes().unwrap(), op);
        assert_eq!(*keys.encryption.secret_bytes().unwrap(), enc);
    }

    #[test]
    fn test_rejects_non_hex_at_canonical_length() {
        // 132 characters, not hex.
        let bad = "z".repeat(132);
        let err = derive_account_keys(&bad).unwrap_err();
        assert!(matches!(err, CloakError::InvalidSignature(_)));
    }

    #[test]
    fn test_accepts_hex_of_unusual_length() {
        // 64-byte signature, not the canonical 65. Passes the check and
        // still derives keys.
        let short = format!("0x{}", "cd".repeat(64));
        assert!(derive_account_keys(&short).is_ok());
    }

    #[test]
    fn test_rejects_non_hex_of_other_length_at_decode() {
        let err = derive_account_keys("0xzz").unwrap_err();
        assert!(matches!(err, CloakError::InvalidSignature(_)));
    }

    #[test]
    fn test_different_signatures_give_different_keys() {
        let a = derive_account_keys(&format!("0x{}", "11".repeat(65))).unwrap();
        let b = derive_account_keys(&format!("0x{}", "22".repeat(65))).unwrap();
        assert_ne!(a.operational, b.operational);
    }
}
