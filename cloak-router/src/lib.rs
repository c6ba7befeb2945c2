//! # Cloak Router
//!
//! Takes a [`cloak_core::TransferRequest`] from classification to
//! execution:
//!
//! - **Scene**: which of the five transfer scenarios the request is
//! - **Config**: signing message, relayer, contracts, bridge allow-list
//! - **Withdrawal**: the statically encoded message a stealth account
//!   signs to authorize a sponsored withdrawal
//! - **Relay**: HTTP client for the gas-sponsoring relay service
//! - **Router**: wires the collaborators and executes the request

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod relay;
pub mod router;
pub mod scene;
pub mod withdrawal;

pub use config::RouterConfig;
pub use relay::HttpRelayClient;
pub use router::{SendOutcome, TransferRouter};
pub use scene::classify;
pub use withdrawal::{sign_withdrawal, withdrawal_digest, WithdrawalParams};
