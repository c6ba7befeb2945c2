//! secp256k1 keypairs with the point/scalar arithmetic stealth addresses need.
//!
//! A [`Keypair`] always carries a public key and optionally the matching
//! secret. Public-only pairs come out of registry lookups and point
//! arithmetic; secret-carrying pairs come from derivation, claiming, or
//! random generation. Operations that need the missing half fail with
//! `MissingPrivateKey` / `MissingPublicKey` instead of panicking.

use alloy_primitives::{Address, B256};
use k256::elliptic_curve::rand_core::CryptoRngCore;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, PublicKey, Scalar, SecretKey};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use cloak_core::constants::{
    COMPRESSED_PUBLIC_KEY_SIZE, PRIVATE_KEY_SIZE, SCALAR_MSB_MASK, UNCOMPRESSED_PUBLIC_KEY_SIZE,
};
use cloak_core::error::{CloakError, Result};
use cloak_core::types::StealthId;

use crate::hash::keccak256;

/// Known-weak private keys that are rejected outright.
const BLOCKED_KEYS: [[u8; PRIVATE_KEY_SIZE]; 1] = [[0u8; PRIVATE_KEY_SIZE]];

/// A secp256k1 keypair, possibly public-only.
#[derive(Clone)]
pub struct Keypair {
    secret: Option<SecretKey>,
    public: PublicKey,
}

/// A compressed public key split into its SEC1 parts.
///
/// Registries store the parity prefix and x coordinate in separate slots,
/// so the split form is part of the storage contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedPublicKey {
    /// SEC1 parity prefix: 2 for even y, 3 for odd y.
    pub prefix: u8,
    /// The 32-byte x coordinate.
    pub x: B256,
}

impl Keypair {
    /// Builds a keypair from a 32-byte private scalar.
    ///
    /// Rejects wrong lengths, out-of-range scalars, and denylisted keys.
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(CloakError::InvalidKey(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_SIZE,
                bytes.len()
            )));
        }
        for blocked in &BLOCKED_KEYS {
            if bool::from(bytes.ct_eq(blocked)) {
                return Err(CloakError::InvalidKey("private key is denylisted".into()));
            }
        }
        let secret = SecretKey::from_slice(bytes)
            .map_err(|_| CloakError::InvalidKey("private key is not a valid scalar".into()))?;
        let public = secret.public_key();
        Ok(Self {
            secret: Some(secret),
            public,
        })
    }

    /// Builds a keypair from a 0x-prefixed private key hex string.
    pub fn from_private_hex(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(s.strip_prefix("0x").unwrap_or(s))?);
        Self::from_private_bytes(&bytes)
    }

    /// Builds a public-only keypair from SEC1 bytes (33 or 65 bytes).
    pub fn from_public_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_SIZE && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_SIZE
        {
            return Err(CloakError::InvalidKey(format!(
                "public key must be {} or {} bytes, got {}",
                COMPRESSED_PUBLIC_KEY_SIZE,
                UNCOMPRESSED_PUBLIC_KEY_SIZE,
                bytes.len()
            )));
        }
        let public = PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| CloakError::InvalidKey("public key is not a curve point".into()))?;
        Ok(Self {
            secret: None,
            public,
        })
    }

    /// Builds a public-only keypair from a 0x-prefixed SEC1 hex string.
    pub fn from_public_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
        Self::from_public_bytes(&bytes)
    }

    /// Generates a fresh random keypair.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let secret = SecretKey::random(rng);
        let public = secret.public_key();
        Self {
            secret: Some(secret),
            public,
        }
    }

    /// Generates a random keypair with the scalar's top bit cleared, the
    /// form used for stealth offsets.
    pub fn random_masked(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        loop {
            rng.fill_bytes(bytes.as_mut_slice());
            bytes[0] &= SCALAR_MSB_MASK;
            if let Ok(keypair) = Self::from_private_bytes(bytes.as_slice()) {
                return Ok(keypair);
            }
        }
    }

    /// The public key.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// The secret key, if this pair carries one.
    pub fn secret(&self) -> Option<&SecretKey> {
        self.secret.as_ref()
    }

    /// True when the pair carries a secret.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// The secret scalar as 32 bytes, zeroized on drop.
    pub fn secret_bytes(&self) -> Result<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
        let secret = self.secret.as_ref().ok_or(CloakError::MissingPrivateKey)?;
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        out.copy_from_slice(secret.to_bytes().as_slice());
        Ok(out)
    }

    /// The secret key as 0x-prefixed hex.
    pub fn secret_hex(&self) -> Result<String> {
        let bytes = self.secret_bytes()?;
        Ok(format!("0x{}", hex::encode(*bytes)))
    }

    /// The public key as 65 uncompressed SEC1 bytes.
    pub fn public_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        let point = self.public.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The uncompressed public key as 0x-prefixed hex.
    pub fn public_hex(&self) -> String {
        format!("0x{}", hex::encode(self.public_uncompressed()))
    }

    /// The standard account address: last 20 bytes of
    /// keccak256 over the uncompressed public key without its 0x04 prefix.
    pub fn eth_address(&self) -> Address {
        let uncompressed = self.public_uncompressed();
        let hash = keccak256(&uncompressed[1..]);
        Address::from_slice(&hash[12..])
    }

    /// The tagged stealth identifier for this public key.
    pub fn stealth_id(&self) -> StealthId {
        StealthId::from_address(self.eth_address())
    }

    /// Point addition: `self.public + other`. The result is public-only.
    pub fn add_public(&self, other: &PublicKey) -> Result<Keypair> {
        let sum = ProjectivePoint::from(*self.public.as_affine())
            + ProjectivePoint::from(*other.as_affine());
        let public = PublicKey::from_affine(sum.to_affine())
            .map_err(|_| CloakError::InvalidKey("point sum is the identity".into()))?;
        Ok(Keypair {
            secret: None,
            public,
        })
    }

    /// Scalar addition modulo the curve order: `self.secret + tweak mod n`.
    ///
    /// Both sides must be in range already; the sum is always reduced, so
    /// the result matches the point produced by [`Keypair::add_public`] on
    /// the corresponding public keys.
    pub fn add_secret(&self, tweak: &SecretKey) -> Result<Keypair> {
        let secret = self.secret.as_ref().ok_or(CloakError::MissingPrivateKey)?;
        let a: Scalar = *secret.to_nonzero_scalar();
        let b: Scalar = *tweak.to_nonzero_scalar();
        let sum = a + b;
        let sum_bytes = Zeroizing::new(sum.to_bytes());
        Self::from_private_bytes(sum_bytes.as_slice())
            .map_err(|_| CloakError::InvalidKey("scalar sum reduced to zero".into()))
    }

    /// Scalar multiplication of the public point: `scalar · self.public`.
    /// The result is public-only.
    pub fn mul_public(&self, scalar: &SecretKey) -> Result<Keypair> {
        let s: Scalar = *scalar.to_nonzero_scalar();
        let product = ProjectivePoint::from(*self.public.as_affine()) * s;
        let public = PublicKey::from_affine(product.to_affine())
            .map_err(|_| CloakError::InvalidKey("scaled point is the identity".into()))?;
        Ok(Keypair {
            secret: None,
            public,
        })
    }

    /// Encrypts `plaintext` to this keypair's public key.
    pub fn encrypt(&self, plaintext: &[u8], rng: &mut impl CryptoRngCore) -> Result<Vec<u8>> {
        crate::envelope::seal(&self.public, plaintext, rng)
    }

    /// Decrypts an envelope addressed to this keypair.
    pub fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>> {
        let secret = self.secret.as_ref().ok_or(CloakError::MissingPrivateKey)?;
        crate::envelope::open(secret, blob)
    }

    /// Splits the compressed public key into prefix and x coordinate.
    pub fn compress(&self) -> CompressedPublicKey {
        let point = self.public.to_encoded_point(true);
        let bytes = point.as_bytes();
        CompressedPublicKey {
            prefix: bytes[0],
            x: B256::from_slice(&bytes[1..]),
        }
    }

    /// Rebuilds a public-only keypair from an x coordinate and an optional
    /// parity prefix. Without a prefix the even-y candidate is assumed,
    /// which is sufficient for scanning (the address check rejects a wrong
    /// guess).
    pub fn uncompress_from_x(x: &B256, prefix: Option<u8>) -> Result<Self> {
        let prefix = prefix.unwrap_or(2);
        if prefix != 2 && prefix != 3 {
            return Err(CloakError::InvalidKey(format!(
                "compressed key prefix must be 2 or 3, got {prefix}"
            )));
        }
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        bytes[0] = prefix;
        bytes[1..].copy_from_slice(x.as_slice());
        Self::from_public_bytes(&bytes)
    }

    /// Constant-time comparison of the secret scalars.
    pub fn secret_matches(&self, other: &Keypair) -> bool {
        match (&self.secret, &other.secret) {
            (Some(a), Some(b)) => bool::from(a.to_bytes().as_slice().ct_eq(b.to_bytes().as_slice())),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public", &self.public_hex())
            .field(
                "secret",
                &if self.secret.is_some() {
                    "<redacted>"
                } else {
                    "<none>"
                },
            )
            .finish()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Keypair {}
