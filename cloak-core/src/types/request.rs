//! Transfer requests and the scene taxonomy.
//!
//! A [`TransferRequest`] is validated and then classified into exactly one
//! [`Scene`], which decides the protocol path: direct on-chain transfer,
//! bridge submission, or meta-transaction relay.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TOKEN_DECIMALS;

/// Token being transferred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Token contract address, or the native-token sentinel.
    pub address: Address,
    /// Base-unit decimals; defaults to 18 when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl TokenInfo {
    /// Decimals to use for amount parsing.
    pub fn decimals(&self) -> u8 {
        self.decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS)
    }
}

/// Recipient preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivePrefs {
    /// Recipient identifier: stealth id hex, 65-byte public key hex, or a
    /// plain account address.
    pub receipt: String,
    /// Whether to derive a fresh stealth address for the recipient.
    /// Defaults to true; ignored when `receipt` is already a stealth id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_sa: Option<bool>,
}

impl ReceivePrefs {
    /// Effective `create_sa` flag after applying the default.
    pub fn create_sa(&self) -> bool {
        self.create_sa.unwrap_or(true)
    }
}

/// Bridge protocol selector for cross-chain transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeProtocol {
    /// Chainlink CCIP.
    Ccip,
}

/// Cross-chain preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgePrefs {
    /// Destination chain id.
    pub target_chain: u64,
    /// Bridge protocol to use.
    pub protocol: BridgeProtocol,
}

/// A transfer request, as submitted by the host application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Present when the payer is spending from a stealth account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_stealth_id: Option<String>,
    /// Envelope ciphertext proving ownership of `sender_stealth_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_ciphertext: Option<Bytes>,
    /// Decimal amount, e.g. `"1.5"`; scaled by `token.decimals`.
    pub amount: String,
    /// Token being transferred.
    pub token: TokenInfo,
    /// Recipient preferences.
    pub receive: ReceivePrefs,
    /// Cross-chain preferences; absent for same-chain transfers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<BridgePrefs>,
}

/// The five mutually exclusive transfer scenarios.
///
/// Derived deterministically from a validated [`TransferRequest`]; only
/// `EoaToEoaSa` and `SaToEoa` have an execution path today, the rest are
/// recognized but not executable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Plain account pays a plain account at a freshly derived stealth address.
    EoaToEoaSa,
    /// Plain account pays an existing stealth identifier.
    EoaToSa,
    /// Stealth account pays an existing stealth identifier.
    SaToSa,
    /// Stealth account pays a plain account at a freshly derived stealth address.
    SaToEoaSa,
    /// Stealth account pays out to a plain account (meta-transaction relay).
    SaToEoa,
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scene::EoaToEoaSa => "EOA_TO_EOA_SA",
            Scene::EoaToSa => "EOA_TO_SA",
            Scene::SaToSa => "SA_TO_SA",
            Scene::SaToEoaSa => "SA_TO_EOA_SA",
            Scene::SaToEoa => "SA_TO_EOA",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let prefs = ReceivePrefs {
            receipt: "0x0000000000000000000000000000000000000001".into(),
            create_sa: None,
        };
        assert!(prefs.create_sa());

        let token = TokenInfo {
            address: Address::ZERO,
            decimals: None,
        };
        assert_eq!(token.decimals(), 18);
    }

    #[test]
    fn test_request_json_roundtrip() {
        let req = TransferRequest {
            sender_stealth_id: Some("0xcafe00".into()),
            sender_ciphertext: Some(Bytes::from(vec![9, 9])),
            amount: "1.5".into(),
            token: TokenInfo {
                address: Address::from_slice(&[0x33; 20]),
                decimals: Some(6),
            },
            receive: ReceivePrefs {
                receipt: "0x0000000000000000000000000000000000000002".into(),
                create_sa: Some(false),
            },
            bridge: Some(BridgePrefs {
                target_chain: 80001,
                protocol: BridgeProtocol::Ccip,
            }),
        };

        let json = serde_json::to_string(&req).unwrap();
        let restored: TransferRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, restored);
    }

    #[test]
    fn test_scene_display_names() {
        assert_eq!(Scene::EoaToEoaSa.to_string(), "EOA_TO_EOA_SA");
        assert_eq!(Scene::SaToEoa.to_string(), "SA_TO_EOA");
    }
}
