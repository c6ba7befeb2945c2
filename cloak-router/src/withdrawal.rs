//! Withdrawal message encoding and signing.
//!
//! The transfer contract verifies a signature from the stealth account
//! over a statically encoded tuple. The encoding is eight 32-byte words,
//! in contract order:
//!
//! ```text
//! chainId ‖ transferContract ‖ recipient ‖ token
//! ‖ amount ‖ nonce ‖ relayer ‖ sponsorFee
//! ```
//!
//! The signed digest is the EIP-191 personal hash over the raw 256-byte
//! encoding itself, matching what the contract recovers on-chain.

use alloy_primitives::{Address, U256};
use k256::ecdsa::SigningKey;

use cloak_core::constants::SIGNATURE_SIZE;
use cloak_core::error::{CloakError, Result};
use cloak_crypto::hash::eip191_hash;
use cloak_crypto::Keypair;

/// Number of words in the withdrawal tuple.
const WORD_COUNT: usize = 8;

/// Inputs bound into a withdrawal signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalParams {
    /// Chain the withdrawal executes on.
    pub chain_id: u64,
    /// Transfer contract verifying the signature.
    pub transfer_contract: Address,
    /// Plain account receiving the funds.
    pub recipient: Address,
    /// Token being withdrawn.
    pub token: Address,
    /// Amount in base units.
    pub amount: U256,
    /// Transfer-contract nonce of the stealth account.
    pub nonce: u64,
    /// Relayer allowed to submit the meta-transaction.
    pub relayer: Address,
    /// Fee paid to the sponsor.
    pub sponsor_fee: U256,
}

fn word_u256(value: U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

fn word_address(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Statically encodes the withdrawal tuple.
pub fn encode_withdrawal_message(params: &WithdrawalParams) -> [u8; WORD_COUNT * 32] {
    let words = [
        word_u256(U256::from(params.chain_id)),
        word_address(params.transfer_contract),
        word_address(params.recipient),
        word_address(params.token),
        word_u256(params.amount),
        word_u256(U256::from(params.nonce)),
        word_address(params.relayer),
        word_u256(params.sponsor_fee),
    ];

    let mut encoded = [0u8; WORD_COUNT * 32];
    for (i, word) in words.iter().enumerate() {
        encoded[i * 32..(i + 1) * 32].copy_from_slice(word);
    }
    encoded
}

/// The digest the stealth account signs: EIP-191 over the full encoded
/// tuple, not over a hash of it.
pub fn withdrawal_digest(params: &WithdrawalParams) -> [u8; 32] {
    eip191_hash(&encode_withdrawal_message(params))
}

/// Signs the withdrawal with the stealth spending key. Returns the
/// 65-byte `r ‖ s ‖ v` signature as 0x-prefixed hex, with `v` in the
/// 27/28 convention the contract expects.
pub fn sign_withdrawal(spending: &Keypair, params: &WithdrawalParams) -> Result<String> {
    let secret = spending.secret_bytes()?;
    let key = SigningKey::from_slice(secret.as_slice())
        .map_err(|_| CloakError::InvalidKey("spending key is not a valid scalar".into()))?;

    let digest = withdrawal_digest(params);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .map_err(|e| CloakError::InvalidSignature(e.to_string()))?;

    let mut bytes = [0u8; SIGNATURE_SIZE];
    bytes[..64].copy_from_slice(&signature.to_bytes());
    bytes[64] = 27 + recovery_id.to_byte();
    Ok(format!("0x{}", hex::encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloak_crypto::hash::keccak256;
    use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn params() -> WithdrawalParams {
        WithdrawalParams {
            chain_id: 11155111,
            transfer_contract: Address::from_slice(&[0x11; 20]),
            recipient: Address::from_slice(&[0x22; 20]),
            token: Address::from_slice(&[0x33; 20]),
            amount: U256::from(1_500_000u64),
            nonce: 3,
            relayer: Address::from_slice(&[0x44; 20]),
            sponsor_fee: U256::ZERO,
        }
    }

    #[test]
    fn test_encoding_is_eight_words() {
        let encoded = encode_withdrawal_message(&params());
        assert_eq!(encoded.len(), 256);

        // chainId right-aligned in word 0.
        assert_eq!(u64::from_be_bytes(encoded[24..32].try_into().unwrap()), 11155111);
        // Addresses left-padded with 12 zero bytes.
        assert!(encoded[32..44].iter().all(|&b| b == 0));
        assert_eq!(&encoded[44..64], &[0x11; 20]);
        // nonce in word 5.
        assert_eq!(u64::from_be_bytes(encoded[5 * 32 + 24..6 * 32].try_into().unwrap()), 3);
        // sponsorFee word is all zero.
        assert!(encoded[7 * 32..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_digest_is_personal_sign_over_raw_encoding() {
        // The contract prefixes the 256-byte tuple itself; there is no
        // inner keccak before the personal-message prefix.
        let encoded = encode_withdrawal_message(&params());
        let mut prefixed = b"\x19Ethereum Signed Message:\n256".to_vec();
        prefixed.extend_from_slice(&encoded);

        assert_eq!(withdrawal_digest(&params()), keccak256(&prefixed));
        assert_ne!(
            withdrawal_digest(&params()),
            eip191_hash(&keccak256(&encoded))
        );
    }

    #[test]
    fn test_digest_changes_with_any_field() {
        let base = withdrawal_digest(&params());

        let mut p = params();
        p.nonce += 1;
        assert_ne!(withdrawal_digest(&p), base);

        let mut p = params();
        p.amount = U256::from(1u64);
        assert_ne!(withdrawal_digest(&p), base);
    }

    #[test]
    fn test_signature_recovers_to_spending_address() {
        let spending = Keypair::random(&mut ChaCha20Rng::seed_from_u64(33));
        let sig_hex = sign_withdrawal(&spending, &params()).unwrap();
        assert_eq!(sig_hex.len(), 132);

        let bytes = hex::decode(&sig_hex[2..]).unwrap();
        let signature = Signature::from_slice(&bytes[..64]).unwrap();
        let recovery_id = RecoveryId::from_byte(bytes[64] - 27).unwrap();

        let digest = withdrawal_digest(&params());
        let recovered =
            VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id).unwrap();
        let recovered_addr = Keypair::from_public_bytes(
            recovered.to_encoded_point(false).as_bytes(),
        )
        .unwrap()
        .eth_address();

        assert_eq!(recovered_addr, spending.eth_address());
    }

    #[test]
    fn test_signing_requires_secret() {
        let spending = Keypair::random(&mut ChaCha20Rng::seed_from_u64(34));
        let public_only = Keypair::from_public_hex(&spending.public_hex()).unwrap();
        assert!(matches!(
            sign_withdrawal(&public_only, &params()),
            Err(CloakError::MissingPrivateKey)
        ));
    }
}
