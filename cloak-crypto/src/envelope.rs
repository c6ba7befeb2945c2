//! ECIES envelope: ECDH over secp256k1, HKDF-SHA256, AES-256-GCM.
//!
//! The envelope carries the ephemeral secret of a stealth payment to its
//! recipient. Wire layout, bit-exact:
//!
//! ```text
//! ephemeral public key (65, uncompressed SEC1)
//! ‖ nonce (12, random)
//! ‖ AES-256-GCM ciphertext + tag
//! ```
//!
//! The symmetric key is HKDF-SHA256 over the concatenation of the
//! ephemeral public key and the uncompressed shared point, both 65 bytes.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use hkdf::Hkdf;
use k256::elliptic_curve::rand_core::CryptoRngCore;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, PublicKey, Scalar, SecretKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use cloak_core::constants::UNCOMPRESSED_PUBLIC_KEY_SIZE;
use cloak_core::error::{CloakError, Result};

/// AES-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
const TAG_SIZE: usize = 16;

/// Domain label fed to HKDF as the expand info.
const KDF_INFO: &[u8] = b"cloak-envelope-key";

/// An envelope blob split into its wire parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvelopePayload<'a> {
    /// Uncompressed SEC1 ephemeral public key (65 bytes).
    pub ephemeral_public_key: &'a [u8],
    /// AES-GCM nonce (12 bytes).
    pub nonce: &'a [u8],
    /// Ciphertext with trailing authentication tag.
    pub ciphertext: &'a [u8],
}

impl<'a> EnvelopePayload<'a> {
    /// Splits a wire blob, validating only the framing lengths.
    pub fn parse(blob: &'a [u8]) -> Result<Self> {
        if blob.len() < UNCOMPRESSED_PUBLIC_KEY_SIZE + NONCE_SIZE + TAG_SIZE {
            return Err(CloakError::DecryptionFailed(format!(
                "envelope too short: {} bytes",
                blob.len()
            )));
        }
        let (ephemeral_public_key, rest) = blob.split_at(UNCOMPRESSED_PUBLIC_KEY_SIZE);
        let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);
        Ok(Self {
            ephemeral_public_key,
            nonce,
            ciphertext,
        })
    }
}

/// Derives the symmetric key from the ephemeral public key and the ECDH
/// shared point.
fn symmetric_key(
    ephemeral_public: &PublicKey,
    shared: &ProjectivePoint,
) -> Result<Zeroizing<[u8; 32]>> {
    let shared_encoded = shared.to_affine().to_encoded_point(false);

    let mut ikm = Zeroizing::new([0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE * 2]);
    ikm[..UNCOMPRESSED_PUBLIC_KEY_SIZE]
        .copy_from_slice(ephemeral_public.to_encoded_point(false).as_bytes());
    ikm[UNCOMPRESSED_PUBLIC_KEY_SIZE..].copy_from_slice(shared_encoded.as_bytes());

    let hk = Hkdf::<Sha256>::new(None, ikm.as_slice());
    let mut okm = Zeroizing::new([0u8; 32]);
    hk.expand(KDF_INFO, okm.as_mut_slice())
        .map_err(|_| CloakError::DecryptionFailed("key derivation failed".into()))?;
    Ok(okm)
}

/// Encrypts `plaintext` to the holder of `recipient`'s secret key.
pub fn seal(
    recipient: &PublicKey,
    plaintext: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<u8>> {
    let ephemeral = SecretKey::random(rng);
    let ephemeral_public = ephemeral.public_key();

    let scalar: Scalar = *ephemeral.to_nonzero_scalar();
    let shared = ProjectivePoint::from(*recipient.as_affine()) * scalar;
    let key = symmetric_key(&ephemeral_public, &shared)?;

    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CloakError::DecryptionFailed("encryption failed".into()))?;

    let mut blob =
        Vec::with_capacity(UNCOMPRESSED_PUBLIC_KEY_SIZE + NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(ephemeral_public.to_encoded_point(false).as_bytes());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypts an envelope with the recipient's secret key.
///
/// Fails with `DecryptionFailed` on truncated input, a malformed ephemeral
/// key, or an authentication tag mismatch. A tag mismatch is the normal
/// outcome when scanning someone else's announcement.
pub fn open(recipient: &SecretKey, blob: &[u8]) -> Result<Vec<u8>> {
    let payload = EnvelopePayload::parse(blob)?;

    let ephemeral_public = PublicKey::from_sec1_bytes(payload.ephemeral_public_key)
        .map_err(|_| CloakError::DecryptionFailed("ephemeral key is not a curve point".into()))?;

    let scalar: Scalar = *recipient.to_nonzero_scalar();
    let shared = ProjectivePoint::from(*ephemeral_public.as_affine()) * scalar;
    let key = symmetric_key(&ephemeral_public, &shared)?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    cipher
        .decrypt(Nonce::from_slice(payload.nonce), payload.ciphertext)
        .map_err(|_| CloakError::DecryptionFailed("authentication failed".into()))
}
