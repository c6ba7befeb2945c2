//! # Cloak Core
//!
//! Core types, errors, and traits for the Cloak stealth payment protocol.
//!
//! This crate provides the foundational building blocks used by all other Cloak crates:
//!
//! - **Types**: Stealth identifiers, announcements, transfer requests, withdrawals
//! - **Errors**: One error enum covering the whole protocol surface
//! - **Constants**: Protocol constants, sizes, and routing defaults
//! - **Traits**: Collaborator seams for registries, chains, bridges, relays, and wallets
//!
//! ## Example
//!
//! ```rust
//! use cloak_core::StealthId;
//! use alloy_primitives::Address;
//!
//! let id = StealthId::from_address(Address::ZERO);
//! assert!(id.to_hex().starts_with("0xcafe"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod outcome;
pub mod traits;
pub mod types;
pub mod units;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{CloakError, Result};
pub use outcome::Outcome;
pub use traits::*;
pub use types::*;
pub use units::parse_units;
