//! Scene classification.
//!
//! A request is classified from three facts, checked in this order:
//! whether the recipient string looks like a stealth identifier, whether
//! the payer claims a stealth-account sender, and the `create_sa` flag.
//! The recipient check uses the loose tag predicate; strict 32-byte
//! validation happens later, when an identifier is actually spent from
//! or paid to.

use cloak_core::error::{CloakError, Result};
use cloak_core::types::{Scene, StealthId, TransferRequest};

/// Classifies a request into its scene.
///
/// Fails with `MissingCiphertext` when a stealth sender is claimed
/// without the proving ciphertext, and with `UnsupportedScene` for the
/// one combination that needs no stealth machinery at all (plain account
/// to plain account).
pub fn classify(request: &TransferRequest) -> Result<Scene> {
    let sender_is_stealth = request.sender_stealth_id.is_some();
    if sender_is_stealth && request.sender_ciphertext.is_none() {
        return Err(CloakError::MissingCiphertext);
    }

    let recipient_is_stealth = StealthId::looks_like_stealth_hex(&request.receive.receipt);
    let create_sa = request.receive.create_sa();

    let scene = match (sender_is_stealth, recipient_is_stealth, create_sa) {
        (false, true, _) => Scene::EoaToSa,
        (false, false, true) => Scene::EoaToEoaSa,
        (false, false, false) => {
            return Err(CloakError::UnsupportedScene(
                "plain transfer between two accounts needs no stealth routing".into(),
            ))
        }
        (true, true, _) => Scene::SaToSa,
        (true, false, true) => Scene::SaToEoaSa,
        (true, false, false) => Scene::SaToEoa,
    };

    tracing::debug!(scene = %scene, "classified transfer request");
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};
    use cloak_core::types::{ReceivePrefs, TokenInfo};
    use test_case::test_case;

    const STEALTH_RECEIPT: &str =
        "0xcafe00000000000000000000aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const PLAIN_RECEIPT: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn request(
        stealth_sender: bool,
        receipt: &str,
        create_sa: Option<bool>,
    ) -> TransferRequest {
        TransferRequest {
            sender_stealth_id: stealth_sender.then(|| STEALTH_RECEIPT.into()),
            sender_ciphertext: stealth_sender.then(|| Bytes::from(vec![1u8; 93])),
            amount: "1".into(),
            token: TokenInfo {
                address: Address::ZERO,
                decimals: None,
            },
            receive: ReceivePrefs {
                receipt: receipt.into(),
                create_sa,
            },
            bridge: None,
        }
    }

    #[test_case(false, PLAIN_RECEIPT, None, Scene::EoaToEoaSa; "eoa to fresh stealth by default")]
    #[test_case(false, PLAIN_RECEIPT, Some(true), Scene::EoaToEoaSa; "eoa to fresh stealth explicit")]
    #[test_case(false, STEALTH_RECEIPT, None, Scene::EoaToSa; "eoa to existing stealth")]
    #[test_case(false, STEALTH_RECEIPT, Some(false), Scene::EoaToSa; "stealth recipient ignores create flag")]
    #[test_case(true, STEALTH_RECEIPT, None, Scene::SaToSa; "stealth to stealth")]
    #[test_case(true, PLAIN_RECEIPT, Some(true), Scene::SaToEoaSa; "stealth to fresh stealth")]
    #[test_case(true, PLAIN_RECEIPT, Some(false), Scene::SaToEoa; "stealth withdrawal")]
    fn test_classification_table(
        stealth_sender: bool,
        receipt: &str,
        create_sa: Option<bool>,
        expected: Scene,
    ) {
        let req = request(stealth_sender, receipt, create_sa);
        assert_eq!(classify(&req).unwrap(), expected);
    }

    #[test]
    fn test_plain_to_plain_is_unsupported() {
        let req = request(false, PLAIN_RECEIPT, Some(false));
        assert!(matches!(
            classify(&req),
            Err(CloakError::UnsupportedScene(_))
        ));
    }

    #[test]
    fn test_stealth_sender_without_ciphertext_is_rejected() {
        let mut req = request(true, PLAIN_RECEIPT, Some(false));
        req.sender_ciphertext = None;
        assert!(matches!(classify(&req), Err(CloakError::MissingCiphertext)));
    }

    #[test]
    fn test_short_cafe_prefix_still_classifies_as_stealth() {
        // The predicate is loose on purpose; strict validation happens at
        // execution time.
        let req = request(false, "0xcafe12", None);
        assert_eq!(classify(&req).unwrap(), Scene::EoaToSa);
    }
}
