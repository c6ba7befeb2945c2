//! Collaborator traits.
//!
//! The protocol core never talks to a chain, a registry contract, or the
//! relay service directly. Everything external sits behind one of these
//! traits so hosts can plug in their own transports and tests can use
//! in-memory fakes.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::StealthId;

/// A recipient's published stealth keys.
///
/// Both keys are 65-byte uncompressed SEC1 public keys, 0x-prefixed hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredKeys {
    /// Operational public key; stealth addresses are offsets of this point.
    pub operational: String,
    /// Encryption public key; envelope ciphertexts are addressed to it.
    pub encryption: String,
}

/// Receipt for a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Hash of the mined transaction.
    pub tx_hash: B256,
    /// Block the transaction landed in.
    pub block_number: u64,
    /// Whether execution succeeded.
    pub success: bool,
}

/// Key registry: maps account addresses to published stealth keys.
#[async_trait]
pub trait KeyRegistry: Send + Sync {
    /// Looks up the published keys for `account`, if any.
    async fn get_keys(&self, account: Address) -> Result<Option<RegisteredKeys>>;

    /// Publishes (or replaces) the keys for `account`.
    async fn set_keys(&self, account: Address, keys: RegisteredKeys) -> Result<()>;
}

/// Same-chain transfer contract client.
#[async_trait]
pub trait TransferClient: Send + Sync {
    /// Chain id this client is connected to.
    fn chain_id(&self) -> u64;

    /// Transfers `amount` of `token` to a stealth identifier, attaching the
    /// envelope ciphertext for the recipient's scanner.
    async fn transfer_to_stealth(
        &self,
        stealth_id: StealthId,
        ciphertext: &[u8],
        token: Address,
        amount: U256,
    ) -> Result<TxReceipt>;

    /// Current transfer-contract nonce for a stealth account, keyed by
    /// the tagged 32-byte identifier.
    async fn get_nonce(&self, stealth_id: StealthId) -> Result<u64>;
}

/// Cross-chain bridge client.
#[async_trait]
pub trait BridgeClient: Send + Sync {
    /// Submits a bridged stealth transfer toward `destination_selector`.
    async fn send(
        &self,
        destination_selector: u64,
        stealth_id: StealthId,
        ciphertext: &[u8],
        token: Address,
        amount: U256,
    ) -> Result<TxReceipt>;
}

/// Meta-transaction relay client.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Submits a signed withdrawal for sponsored execution. Returns the
    /// relay's JSON response verbatim.
    async fn relay(
        &self,
        token: Address,
        chain_id: u64,
        request: &crate::types::WithdrawalRequest,
    ) -> Result<serde_json::Value>;
}

/// The host wallet: owns the account secret, signs on request.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address of the signing account.
    fn address(&self) -> Address;

    /// Signs an EIP-191 personal message, returning the 65-byte signature
    /// as 0x-prefixed hex.
    async fn sign_message(&self, message: &str) -> Result<String>;
}
