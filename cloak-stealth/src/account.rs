//! Account onboarding: derive keys through the host wallet and publish
//! them to the registry.

use cloak_core::error::Result;
use cloak_core::traits::{KeyRegistry, RegisteredKeys, WalletSigner};
use cloak_crypto::{derive_account_keys, AccountKeys};

/// The public halves of an account's keys, in registry form.
pub fn registered_keys(keys: &AccountKeys) -> RegisteredKeys {
    RegisteredKeys {
        operational: keys.operational.public_hex(),
        encryption: keys.encryption.public_hex(),
    }
}

/// Asks the wallet to sign `message` and derives the account keys from
/// the signature.
pub async fn derive_account(signer: &dyn WalletSigner, message: &str) -> Result<AccountKeys> {
    let signature = signer.sign_message(message).await?;
    derive_account_keys(&signature)
}

/// Derives the account keys and publishes their public halves under the
/// wallet's address.
pub async fn register_account(
    signer: &dyn WalletSigner,
    registry: &dyn KeyRegistry,
    message: &str,
) -> Result<AccountKeys> {
    let keys = derive_account(signer, message).await?;
    registry
        .set_keys(signer.address(), registered_keys(&keys))
        .await?;

    tracing::info!(account = %signer.address(), "published stealth keys");
    Ok(keys)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic wallet for tests.

    use alloy_primitives::Address;
    use async_trait::async_trait;
    use k256::ecdsa::SigningKey;

    use cloak_core::error::Result;
    use cloak_core::traits::WalletSigner;
    use cloak_crypto::hash::eip191_hash;
    use cloak_crypto::Keypair;

    /// Signs EIP-191 personal messages with a fixed private key.
    pub struct MockSigner {
        key: SigningKey,
    }

    impl MockSigner {
        pub fn new(seed: u8) -> Self {
            let mut bytes = [seed; 32];
            bytes[0] &= 0x7f;
            Self {
                key: SigningKey::from_slice(&bytes).unwrap(),
            }
        }
    }

    #[async_trait]
    impl WalletSigner for MockSigner {
        fn address(&self) -> Address {
            let public = self.key.verifying_key().to_encoded_point(false);
            Keypair::from_public_bytes(public.as_bytes())
                .unwrap()
                .eth_address()
        }

        async fn sign_message(&self, message: &str) -> Result<String> {
            let hash = eip191_hash(message.as_bytes());
            let (sig, recovery_id) = self.key.sign_prehash_recoverable(&hash).unwrap();

            let mut bytes = [0u8; 65];
            bytes[..64].copy_from_slice(&sig.to_bytes());
            bytes[64] = 27 + recovery_id.to_byte();
            Ok(format!("0x{}", hex::encode(bytes)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockSigner;
    use super::*;
    use cloak_core::constants::DEFAULT_SIGNING_MESSAGE;
    use cloak_core::traits::WalletSigner;

    #[tokio::test]
    async fn test_same_wallet_same_keys() {
        let signer = MockSigner::new(0x42);
        let a = derive_account(&signer, DEFAULT_SIGNING_MESSAGE).await.unwrap();
        let b = derive_account(&signer, DEFAULT_SIGNING_MESSAGE).await.unwrap();
        assert_eq!(a.operational, b.operational);
        assert_eq!(a.encryption, b.encryption);
    }

    #[tokio::test]
    async fn test_different_message_different_keys() {
        let signer = MockSigner::new(0x42);
        let a = derive_account(&signer, DEFAULT_SIGNING_MESSAGE).await.unwrap();
        let b = derive_account(&signer, "another message").await.unwrap();
        assert_ne!(a.operational, b.operational);
    }

    #[tokio::test]
    async fn test_register_publishes_public_halves() {
        let signer = MockSigner::new(0x42);
        let registry = cloak_registry::MemoryRegistry::new();

        let keys = register_account(&signer, &registry, DEFAULT_SIGNING_MESSAGE)
            .await
            .unwrap();

        let published = registry
            .get_keys(signer.address())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(published.operational, keys.operational.public_hex());
        assert_eq!(published.encryption, keys.encryption.public_hex());
    }

    #[tokio::test]
    async fn test_signer_produces_canonical_signature_hex() {
        let signer = MockSigner::new(0x42);
        let sig = signer.sign_message(DEFAULT_SIGNING_MESSAGE).await.unwrap();
        assert_eq!(sig.len(), 132);
        assert!(sig.starts_with("0x"));
    }
}
