//! Error types for Cloak.
//!
//! A single error enum covers the whole protocol surface. Cryptographic
//! validation failures are raised eagerly at construction time; scanning
//! non-matches are deliberately *not* errors (see `cloak-stealth`).

use thiserror::Error;

/// Result type alias using `CloakError`.
pub type Result<T> = std::result::Result<T, CloakError>;

/// Main error type for all Cloak operations.
#[derive(Debug, Error)]
pub enum CloakError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CRYPTOGRAPHIC ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Key material is malformed: wrong length, off-curve point, zero or
    /// out-of-range scalar, denylisted value.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Operation requires a public key the keypair does not carry.
    #[error("Public key is required")]
    MissingPublicKey,

    /// Operation requires a private key the keypair does not carry.
    #[error("Private key is required")]
    MissingPrivateKey,

    /// Envelope decryption failed (authentication tag mismatch or
    /// malformed ciphertext).
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Wallet signature failed derivation-time validation.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STEALTH / TRANSFER ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Recipient has not published stealth keys in the registry.
    #[error("Could not retrieve public keys for recipient {0}")]
    RecipientNotRegistered(String),

    /// Request claims a stealth-account sender but carries no ciphertext.
    #[error("Ciphertext must be provided when sending from a stealth account")]
    MissingCiphertext,

    /// The request does not map to an executable scene.
    #[error("Unsupported scene: {0}")]
    UnsupportedScene(String),

    /// Cross-chain route is outside the configured allow-list.
    #[error("Unsupported route: {0}")]
    UnsupportedRoute(String),

    /// The claimed sender stealth account does not belong to the signer.
    #[error("Stealth account is not owned by the current signer")]
    NotOwner,

    /// Recipient identifier is not a stealth id, public key, or address.
    #[error("Unsupported address: {0}")]
    UnsupportedAddress(String),

    /// Decimal amount could not be parsed into token units.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // EXTERNAL COLLABORATOR ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A registry, chain, or relay call failed at the transport level.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The relay service rejected the withdrawal request.
    #[error("Relay rejected request: {0}")]
    RelayRejected(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloakError {
    /// Stable machine-readable kind, used in the result envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            CloakError::InvalidKey(_) => "InvalidKey",
            CloakError::MissingPublicKey => "MissingPublicKey",
            CloakError::MissingPrivateKey => "MissingPrivateKey",
            CloakError::DecryptionFailed(_) => "DecryptionFailed",
            CloakError::InvalidSignature(_) => "InvalidSignature",
            CloakError::RecipientNotRegistered(_) => "RecipientNotRegistered",
            CloakError::MissingCiphertext => "MissingCiphertext",
            CloakError::UnsupportedScene(_) => "UnsupportedScene",
            CloakError::UnsupportedRoute(_) => "UnsupportedRoute",
            CloakError::NotOwner => "NotOwner",
            CloakError::UnsupportedAddress(_) => "UnsupportedAddress",
            CloakError::InvalidAmount(_) => "InvalidAmount",
            CloakError::NetworkFailure(_) => "NetworkFailure",
            CloakError::RelayRejected(_) => "RelayRejected",
            CloakError::Hex(_) => "InvalidHex",
            CloakError::Json(_) => "Json",
        }
    }

    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CloakError::NetworkFailure(_) | CloakError::RelayRejected(_)
        )
    }

    /// Returns true if this is a cryptographic error.
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            CloakError::InvalidKey(_)
                | CloakError::MissingPublicKey
                | CloakError::MissingPrivateKey
                | CloakError::DecryptionFailed(_)
                | CloakError::InvalidSignature(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CloakError::RecipientNotRegistered("0xabc".into());
        assert!(err.to_string().contains("0xabc"));
    }

    #[test]
    fn test_error_classification() {
        assert!(CloakError::NetworkFailure("timeout".into()).is_recoverable());
        assert!(!CloakError::NotOwner.is_recoverable());

        assert!(CloakError::MissingPublicKey.is_crypto_error());
        assert!(CloakError::InvalidKey("short".into()).is_crypto_error());
        assert!(!CloakError::MissingCiphertext.is_crypto_error());
    }

    #[test]
    fn test_error_kind_is_stable() {
        assert_eq!(CloakError::NotOwner.kind(), "NotOwner");
        assert_eq!(
            CloakError::UnsupportedRoute("x".into()).kind(),
            "UnsupportedRoute"
        );
    }

    #[test]
    fn test_hex_error_conversion() {
        let res: Result<Vec<u8>> = hex::decode("zz").map_err(CloakError::from);
        assert!(matches!(res, Err(CloakError::Hex(_))));
    }
}
