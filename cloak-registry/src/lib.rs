//! # Cloak Registry
//!
//! Key registry backends. The registry maps an account address to its
//! published stealth keys; senders look recipients up here before
//! generating a stealth destination.
//!
//! Ships an in-memory backend for tests and single-process hosts. Chain-
//! backed registries implement the same [`cloak_core::KeyRegistry`] trait.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod memory;

pub use memory::MemoryRegistry;
