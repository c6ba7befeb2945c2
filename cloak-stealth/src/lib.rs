//! # Cloak Stealth
//!
//! The stealth address lifecycle:
//!
//! - **Account**: derive keys through the host wallet, publish to the registry
//! - **Generate**: sender derives a one-time stealth destination plus envelope
//! - **Scan**: recipient sweeps announcements and recovers spending keys
//!
//! Scanning a payment addressed to someone else is a non-match, never an
//! error; the only proof of ownership is a spending key whose address
//! equals the announced identifier.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod account;
pub mod generate;
pub mod scan;

pub use account::{derive_account, register_account, registered_keys};
pub use generate::{generate, generate_for, GeneratedStealth};
pub use scan::{recover_spending_key, scan_announcements, try_claim, ClaimedPayment, ScanStats};
