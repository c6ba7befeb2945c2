//! # Cloak Crypto
//!
//! Cryptographic primitives for the Cloak stealth payment protocol:
//!
//! - **Keypairs**: secp256k1 pairs with the point/scalar arithmetic that
//!   turns a published key plus a random offset into a stealth address
//! - **Envelopes**: ECIES (ECDH + HKDF-SHA256 + AES-256-GCM) for carrying
//!   the payment secret to its recipient
//! - **Derivation**: one wallet signature deterministically yields the
//!   operational and encryption keypairs
//! - **Hashing**: keccak-256, SHA-256, SHA-512 wrappers
//!
//! ## Example
//!
//! ```rust
//! use cloak_crypto::{derive_account_keys, envelope};
//!
//! let signature = format!("0x{}", "ab".repeat(65));
//! let keys = derive_account_keys(&signature).unwrap();
//!
//! let blob = envelope::seal(
//!     keys.encryption.public(),
//!     b"hello",
//!     &mut rand::thread_rng(),
//! ).unwrap();
//! let opened = envelope::open(keys.encryption.secret().unwrap(), &blob).unwrap();
//! assert_eq!(opened, b"hello");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod derive;
pub mod envelope;
pub mod hash;
pub mod keypair;

pub use derive::{derive_account_keys, AccountKeys};
pub use keypair::{CompressedPublicKey, Keypair};

// The curve types callers need when holding raw key halves.
pub use k256::{PublicKey, SecretKey};
