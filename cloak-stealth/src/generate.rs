//! Stealth address generation.
//!
//! The sender picks a random offset `r`, adds `r·G` to the recipient's
//! operational public key to get the stealth point, and seals `r` in an
//! envelope addressed to the recipient's encryption key. Only the holder
//! of the operational secret can later compute the spending key
//! `sk_op + r mod n`; the sender never learns it.

use alloy_primitives::Address;
use k256::elliptic_curve::rand_core::CryptoRngCore;

use cloak_core::error::{CloakError, Result};
use cloak_core::traits::{KeyRegistry, RegisteredKeys};
use cloak_core::types::StealthId;
use cloak_crypto::{envelope, Keypair};

/// A freshly generated stealth destination.
#[derive(Clone, Debug)]
pub struct GeneratedStealth {
    /// The stealth point, public-only. The matching secret exists only
    /// after the recipient claims.
    pub keypair: Keypair,
    /// Tagged identifier to send funds to.
    pub stealth_id: StealthId,
    /// Envelope carrying the offset, addressed to the recipient.
    pub ciphertext: Vec<u8>,
}

/// Generates a stealth destination from a recipient's published keys.
pub fn generate(keys: &RegisteredKeys, rng: &mut impl CryptoRngCore) -> Result<GeneratedStealth> {
    let operational = Keypair::from_public_hex(&keys.operational)?;
    let encryption = Keypair::from_public_hex(&keys.encryption)?;

    let offset = Keypair::random_masked(rng)?;
    let stealth = operational.add_public(offset.public())?;
    let stealth_id = stealth.stealth_id();

    let offset_bytes = offset.secret_bytes()?;
    let ciphertext = envelope::seal(encryption.public(), offset_bytes.as_slice(), rng)?;

    tracing::debug!(stealth_id = %stealth_id, "generated stealth destination");

    Ok(GeneratedStealth {
        keypair: stealth,
        stealth_id,
        ciphertext,
    })
}

/// Looks up `recipient` in the registry and generates a stealth
/// destination for them.
pub async fn generate_for(
    registry: &dyn KeyRegistry,
    recipient: Address,
    rng: &mut impl CryptoRngCore,
) -> Result<GeneratedStealth> {
    let keys = registry
        .get_keys(recipient)
        .await?
        .ok_or_else(|| CloakError::RecipientNotRegistered(format!("{recipient:#x}")))?;
    generate(&keys, rng)
}
