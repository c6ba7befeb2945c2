//! Announcement scanning and claiming.
//!
//! For each announcement the scanner tries to open the envelope with the
//! account's encryption secret. A failed open means the payment belongs to
//! someone else; that is the expected outcome for almost every event and
//! is never an error. On a successful open, the recovered offset is added
//! to the operational secret and the resulting address is checked against
//! the announced identifier.

use zeroize::Zeroizing;

use cloak_core::constants::PRIVATE_KEY_SIZE;
use cloak_core::error::{CloakError, Result};
use cloak_core::types::{Announcement, StealthId};
use cloak_crypto::{envelope, AccountKeys, Keypair, SecretKey};

/// A payment claimed during a scan, with its spending keypair.
#[derive(Clone, Debug)]
pub struct ClaimedPayment {
    /// The matched announcement.
    pub announcement: Announcement,
    /// Keypair spending from the stealth address. Carries the secret.
    pub keypair: Keypair,
}

/// Counters for one scan pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Announcements examined.
    pub scanned: usize,
    /// Announcements claimed.
    pub matched: usize,
    /// Envelopes that opened but failed the address check.
    pub mismatched: usize,
}

/// How one announcement relates to an account's keys.
enum ClaimOutcome {
    /// The envelope opened and the spending key controls the announced id.
    Claimed(Keypair),
    /// The envelope did not open for these keys.
    NotAddressed,
    /// The envelope opened but the derived address disagrees with the
    /// announced identifier.
    Mismatched,
}

fn classify_announcement(keys: &AccountKeys, announcement: &Announcement) -> Result<ClaimOutcome> {
    let secret = keys
        .encryption
        .secret()
        .ok_or(CloakError::MissingPrivateKey)?;

    let offset_bytes = match envelope::open(secret, &announcement.ciphertext) {
        Ok(bytes) => Zeroizing::new(bytes),
        // Not addressed to us.
        Err(CloakError::DecryptionFailed(_)) => return Ok(ClaimOutcome::NotAddressed),
        Err(e) => return Err(e),
    };

    // A malformed envelope is someone else's problem, not a scan failure.
    if offset_bytes.len() != PRIVATE_KEY_SIZE {
        return Ok(ClaimOutcome::NotAddressed);
    }
    let offset = match SecretKey::from_slice(&offset_bytes) {
        Ok(offset) => offset,
        Err(_) => return Ok(ClaimOutcome::NotAddressed),
    };

    let candidate = keys.operational.add_secret(&offset)?;
    if candidate.stealth_id() == announcement.stealth_id {
        Ok(ClaimOutcome::Claimed(candidate))
    } else {
        Ok(ClaimOutcome::Mismatched)
    }
}

/// Recovers the spending keypair for one announcement, or `None` when the
/// announcement is not addressed to these keys.
pub fn try_claim(keys: &AccountKeys, announcement: &Announcement) -> Result<Option<Keypair>> {
    Ok(match classify_announcement(keys, announcement)? {
        ClaimOutcome::Claimed(keypair) => Some(keypair),
        ClaimOutcome::NotAddressed | ClaimOutcome::Mismatched => None,
    })
}

/// Checks ownership of a stealth account: opens the ciphertext and proves
/// the spending key matches the claimed identifier.
///
/// Distinguishes "could not open" (the ciphertext is not addressed to
/// these keys) from "opened but wrong address"; both mean the caller does
/// not own the account.
pub fn recover_spending_key(
    keys: &AccountKeys,
    stealth_id: &StealthId,
    ciphertext: &[u8],
) -> Result<Keypair> {
    let secret = keys
        .encryption
        .secret()
        .ok_or(CloakError::MissingPrivateKey)?;

    let offset_bytes =
        Zeroizing::new(envelope::open(secret, ciphertext).map_err(|_| CloakError::NotOwner)?);
    if offset_bytes.len() != PRIVATE_KEY_SIZE {
        return Err(CloakError::NotOwner);
    }
    let offset = SecretKey::from_slice(&offset_bytes).map_err(|_| CloakError::NotOwner)?;

    let candidate = keys.operational.add_secret(&offset)?;
    if candidate.stealth_id() == *stealth_id {
        Ok(candidate)
    } else {
        Err(CloakError::NotOwner)
    }
}

/// Scans a batch of announcements, claiming every payment addressed to
/// `keys`.
pub fn scan_announcements(
    keys: &AccountKeys,
    announcements: &[Announcement],
) -> Result<(Vec<ClaimedPayment>, ScanStats)> {
    let mut claimed = Vec::new();
    let mut stats = ScanStats::default();

    for announcement in announcements {
        stats.scanned += 1;
        match classify_announcement(keys, announcement)? {
            ClaimOutcome::Claimed(keypair) => {
                tracing::info!(
                    stealth_id = %announcement.stealth_id,
                    amount = %announcement.amount,
                    block = announcement.block_number,
                    "claimed stealth payment"
                );
                stats.matched += 1;
                claimed.push(ClaimedPayment {
                    announcement: announcement.clone(),
                    keypair,
                });
            }
            ClaimOutcome::Mismatched => {
                tracing::warn!(
                    stealth_id = %announcement.stealth_id,
                    "envelope opened but announced identifier does not match"
                );
                stats.mismatched += 1;
            }
            ClaimOutcome::NotAddressed => {
                tracing::trace!(
                    stealth_id = %announcement.stealth_id,
                    "announcement not addressed to this account"
                );
            }
        }
    }

    Ok((claimed, stats))
}
