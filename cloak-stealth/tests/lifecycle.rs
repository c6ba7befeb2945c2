//! Full lifecycle: derive, register, pay, scan, claim.

use alloy_primitives::{Address, Bytes, B256, U256};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use cloak_core::constants::DEFAULT_SIGNING_MESSAGE;
use cloak_core::types::Announcement;
use cloak_crypto::derive_account_keys;
use cloak_registry::MemoryRegistry;
use cloak_stealth::{generate_for, registered_keys, scan_announcements};

fn account(seed: &str) -> cloak_crypto::AccountKeys {
    derive_account_keys(&format!("0x{}", seed.repeat(65))).unwrap()
}

#[tokio::test]
async fn recipient_claims_payment_sent_via_registry() {
    let registry = MemoryRegistry::new();
    let mut rng = ChaCha20Rng::seed_from_u64(21);

    // Recipient publishes keys under their wallet address.
    let recipient_keys = account("ab");
    let recipient_addr = Address::from_slice(&[0x0A; 20]);
    use cloak_core::traits::KeyRegistry;
    registry
        .set_keys(recipient_addr, registered_keys(&recipient_keys))
        .await
        .unwrap();

    // Sender derives a destination from the registry entry alone.
    let generated = generate_for(&registry, recipient_addr, &mut rng)
        .await
        .unwrap();

    let announcement = Announcement::new(
        generated.stealth_id,
        Bytes::from(generated.ciphertext),
        Address::ZERO,
        U256::from(5_000u64),
        100,
        B256::from_slice(&[0x11; 32]),
        1_700_000_000,
        Address::from_slice(&[0x0B; 20]),
    );

    // Recipient sweeps and recovers the spending key.
    let (claimed, stats) = scan_announcements(&recipient_keys, &[announcement]).unwrap();
    assert_eq!(stats.matched, 1);
    assert_eq!(
        claimed[0].keypair.eth_address(),
        generated.keypair.eth_address()
    );
    assert!(claimed[0].keypair.has_secret());
}

#[tokio::test]
async fn unregistered_recipient_is_an_error() {
    let registry = MemoryRegistry::new();
    let mut rng = ChaCha20Rng::seed_from_u64(22);

    let err = generate_for(&registry, Address::from_slice(&[0x0C; 20]), &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        cloak_core::CloakError::RecipientNotRegistered(_)
    ));
}

#[test]
fn signing_message_is_stable() {
    // Derivation depends on the exact message text; a change here would
    // orphan every existing account.
    assert!(DEFAULT_SIGNING_MESSAGE.starts_with("Sign this message"));
}
