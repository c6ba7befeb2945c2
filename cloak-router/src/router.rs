//! Transfer routing.
//!
//! [`TransferRouter::send`] takes a validated request through
//! classification, normalization, and execution. Two scenes execute
//! today: a plain account paying into a fresh stealth address (same-chain
//! or over an allowed bridge route), and a stealth account withdrawing to
//! a plain account through the sponsored relay. The remaining scenes are
//! recognized but rejected as unsupported.

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use cloak_core::constants::SIGNATURE_HEX_LEN;
use cloak_core::error::{CloakError, Result};
use cloak_core::traits::{BridgeClient, KeyRegistry, RelayClient, TransferClient, WalletSigner};
use cloak_core::types::{Scene, StealthId, TransferRequest, WithdrawalRequest};
use cloak_core::units::parse_units;
use cloak_core::TxReceipt;
use cloak_crypto::Keypair;
use cloak_stealth::{derive_account, generate_for, recover_spending_key};

use crate::config::RouterConfig;
use crate::scene::classify;
use crate::withdrawal::{sign_withdrawal, WithdrawalParams};

/// Result of an executed transfer.
#[derive(Clone, Debug)]
pub enum SendOutcome {
    /// Same-chain transfer, mined directly.
    OnChain(TxReceipt),
    /// Cross-chain transfer, submitted to the bridge.
    Bridged(TxReceipt),
    /// Withdrawal handed to the relay; the relay's response verbatim.
    Relayed(serde_json::Value),
}

/// Routes transfer requests to the right execution path.
pub struct TransferRouter {
    config: RouterConfig,
    registry: Arc<dyn KeyRegistry>,
    chain: Arc<dyn TransferClient>,
    bridge: Arc<dyn BridgeClient>,
    relay: Arc<dyn RelayClient>,
    signer: Arc<dyn WalletSigner>,
}

impl TransferRouter {
    /// Wires a router from its collaborators.
    pub fn new(
        config: RouterConfig,
        registry: Arc<dyn KeyRegistry>,
        chain: Arc<dyn TransferClient>,
        bridge: Arc<dyn BridgeClient>,
        relay: Arc<dyn RelayClient>,
        signer: Arc<dyn WalletSigner>,
    ) -> Self {
        Self {
            config,
            registry,
            chain,
            bridge,
            relay,
            signer,
        }
    }

    /// Classifies and executes a transfer request.
    pub async fn send(&self, request: &TransferRequest) -> Result<SendOutcome> {
        let scene = classify(request)?;
        let amount = parse_units(&request.amount, request.token.decimals())?;
        if amount.is_zero() {
            return Err(CloakError::InvalidAmount("amount must be positive".into()));
        }

        tracing::info!(scene = %scene, amount = %amount, "routing transfer");

        match scene {
            Scene::EoaToEoaSa => self.pay_fresh_stealth(request, amount).await,
            Scene::SaToEoa => self.withdraw_to_plain(request, amount).await,
            other => Err(CloakError::UnsupportedScene(other.to_string())),
        }
    }

    /// Plain account pays into a freshly derived stealth address.
    async fn pay_fresh_stealth(
        &self,
        request: &TransferRequest,
        amount: U256,
    ) -> Result<SendOutcome> {
        let recipient = resolve_account(&request.receive.receipt)?;
        let generated =
            generate_for(self.registry.as_ref(), recipient, &mut rand::thread_rng()).await?;

        match &request.bridge {
            None => {
                let receipt = self
                    .chain
                    .transfer_to_stealth(
                        generated.stealth_id,
                        &generated.ciphertext,
                        request.token.address,
                        amount,
                    )
                    .await?;
                Ok(SendOutcome::OnChain(receipt))
            }
            Some(bridge) => {
                let source = self.chain.chain_id();
                let selector = self
                    .config
                    .bridge_selector(source, bridge.target_chain)
                    .ok_or_else(|| {
                        CloakError::UnsupportedRoute(format!(
                            "chain {source} to chain {}",
                            bridge.target_chain
                        ))
                    })?;

                let receipt = self
                    .bridge
                    .send(
                        selector,
                        generated.stealth_id,
                        &generated.ciphertext,
                        request.token.address,
                        amount,
                    )
                    .await?;
                Ok(SendOutcome::Bridged(receipt))
            }
        }
    }

    /// Stealth account withdraws to a plain account via the relay.
    async fn withdraw_to_plain(
        &self,
        request: &TransferRequest,
        amount: U256,
    ) -> Result<SendOutcome> {
        let id_hex = request
            .sender_stealth_id
            .as_ref()
            .ok_or(CloakError::MissingCiphertext)?;
        let stealth_id = StealthId::from_hex(id_hex)?;
        let ciphertext = request
            .sender_ciphertext
            .as_ref()
            .ok_or(CloakError::MissingCiphertext)?;

        let keys = derive_account(self.signer.as_ref(), &self.config.signing_message).await?;
        let spending = recover_spending_key(&keys, &stealth_id, ciphertext)?;

        let target = resolve_account(&request.receive.receipt)?;
        let chain_id = self.chain.chain_id();
        let transfer_contract = self.config.transfer_contract(chain_id).ok_or_else(|| {
            CloakError::UnsupportedRoute(format!("no transfer contract on chain {chain_id}"))
        })?;

        let nonce = self.chain.get_nonce(stealth_id).await?;

        let params = WithdrawalParams {
            chain_id,
            transfer_contract,
            recipient: target,
            token: request.token.address,
            amount,
            nonce,
            relayer: self.config.relayer_address,
            sponsor_fee: U256::ZERO,
        };
        let signature = sign_withdrawal(&spending, &params)?;

        let withdrawal = WithdrawalRequest {
            stealth_addr: stealth_id,
            target,
            amount,
            nonce: U256::from(nonce),
            signature,
            sponsor_fee: U256::ZERO,
        };

        tracing::info!(
            stealth_id = %stealth_id,
            target = %target,
            nonce,
            "submitting sponsored withdrawal"
        );

        let response = self
            .relay
            .relay(request.token.address, chain_id, &withdrawal)
            .await?;
        Ok(SendOutcome::Relayed(response))
    }
}

/// Resolves a non-stealth recipient string to an account address:
/// a 65-byte public key in hex becomes its derived address, a 20-byte
/// address parses directly, anything else is unsupported.
fn resolve_account(receipt: &str) -> Result<Address> {
    if receipt.len() == SIGNATURE_HEX_LEN {
        // 132 hex chars is also the length of an uncompressed public key.
        return Keypair::from_public_hex(receipt)
            .map(|keypair| keypair.eth_address())
            .map_err(|_| CloakError::UnsupportedAddress(receipt.into()));
    }
    if receipt.len() == 42 {
        return receipt
            .parse::<Address>()
            .map_err(|_| CloakError::UnsupportedAddress(receipt.into()));
    }
    Err(CloakError::UnsupportedAddress(receipt.into()))
}
