//! On-chain stealth payment announcements.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use super::StealthId;

/// A stealth payment event as read from the chain.
///
/// Produced by the chain collaborator, consumed read-only by the scanner.
/// The `ciphertext` is the envelope-encrypted ephemeral secret; only the
/// intended recipient can open it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Tagged 32-byte destination identifier.
    pub stealth_id: StealthId,
    /// Envelope ciphertext carrying the ephemeral secret.
    pub ciphertext: Bytes,
    /// Token transferred (native sentinel or ERC-20).
    pub token: Address,
    /// Amount transferred, in token base units.
    pub amount: U256,
    /// Block the event was emitted in.
    pub block_number: u64,
    /// Transaction hash of the transfer.
    pub tx_hash: B256,
    /// Block timestamp (Unix seconds).
    pub timestamp: u64,
    /// Transaction sender.
    pub sender: Address,
}

impl Announcement {
    /// Builds an announcement from the event fields plus block metadata.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stealth_id: StealthId,
        ciphertext: Bytes,
        token: Address,
        amount: U256,
        block_number: u64,
        tx_hash: B256,
        timestamp: u64,
        sender: Address,
    ) -> Self {
        Self {
            stealth_id,
            ciphertext,
            token,
            amount,
            block_number,
            tx_hash,
            timestamp,
            sender,
        }
    }
}
