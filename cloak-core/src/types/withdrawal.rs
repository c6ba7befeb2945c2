//! Relay withdrawal payload.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::StealthId;

/// Payload POSTed to the relay service for a sponsored withdrawal.
///
/// Field names follow the relay's JSON contract, hence camelCase.
/// `stealthAddr` carries the full tagged 32-byte identifier, not the
/// embedded 20-byte address; quantities serialize as 0x-hex strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    /// Tagged stealth identifier the funds leave from.
    pub stealth_addr: StealthId,
    /// Plain account receiving the funds.
    pub target: Address,
    /// Amount in token base units, 0x-hex quantity.
    pub amount: U256,
    /// Transfer-contract nonce for the stealth account, 0x-hex quantity.
    pub nonce: U256,
    /// 65-byte recoverable signature over the withdrawal message, hex.
    pub signature: String,
    /// Fee paid to the sponsor; currently always zero.
    pub sponsor_fee: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdrawal_serializes_camel_case() {
        let req = WithdrawalRequest {
            stealth_addr: StealthId::from_address(Address::from_slice(&[0x11; 20])),
            target: Address::from_slice(&[0x22; 20]),
            amount: U256::from(1000u64),
            nonce: U256::from(7u64),
            signature: "0xdead".into(),
            sponsor_fee: U256::ZERO,
        };

        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"stealthAddr\""));
        assert!(json.contains("\"sponsorFee\""));
        assert!(!json.contains("stealth_addr"));

        let restored: WithdrawalRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, restored);
    }

    #[test]
    fn test_withdrawal_carries_tagged_id_and_hex_quantities() {
        let req = WithdrawalRequest {
            stealth_addr: StealthId::from_address(Address::from_slice(&[0x11; 20])),
            target: Address::from_slice(&[0x22; 20]),
            amount: U256::from(1000u64),
            nonce: U256::from(7u64),
            signature: "0xdead".into(),
            sponsor_fee: U256::ZERO,
        };

        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        let stealth = json["stealthAddr"].as_str().unwrap();
        assert!(stealth.starts_with("0xcafe"));
        assert_eq!(stealth.len(), 66);
        assert_eq!(json["amount"], "0x3e8");
        assert_eq!(json["nonce"], "0x7");
    }
}
