//! In-memory key registry.
//!
//! Keys are stored the way the on-chain registry stores them: each public
//! key split into its parity prefix and x coordinate. Lookups rebuild the
//! full point from the stored parts, so a round trip through this registry
//! exercises the same compression path the contract does.

use std::collections::HashMap;

use alloy_primitives::Address;
use async_trait::async_trait;
use parking_lot::RwLock;

use cloak_core::error::Result;
use cloak_core::traits::{KeyRegistry, RegisteredKeys};
use cloak_crypto::{CompressedPublicKey, Keypair};

#[derive(Clone, Copy)]
struct StoredKeys {
    operational: CompressedPublicKey,
    encryption: CompressedPublicKey,
}

/// Thread-safe in-memory registry.
#[derive(Default)]
pub struct MemoryRegistry {
    entries: RwLock<HashMap<Address, StoredKeys>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when no account has registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyRegistry for MemoryRegistry {
    async fn get_keys(&self, account: Address) -> Result<Option<RegisteredKeys>> {
        let stored = match self.entries.read().get(&account) {
            Some(stored) => *stored,
            None => return Ok(None),
        };

        let operational =
            Keypair::uncompress_from_x(&stored.operational.x, Some(stored.operational.prefix))?;
        let encryption =
            Keypair::uncompress_from_x(&stored.encryption.x, Some(stored.encryption.prefix))?;

        Ok(Some(RegisteredKeys {
            operational: operational.public_hex(),
            encryption: encryption.public_hex(),
        }))
    }

    async fn set_keys(&self, account: Address, keys: RegisteredKeys) -> Result<()> {
        let operational = Keypair::from_public_hex(&keys.operational)?.compress();
        let encryption = Keypair::from_public_hex(&keys.encryption)?.compress();

        self.entries.write().insert(
            account,
            StoredKeys {
                operational,
                encryption,
            },
        );

        tracing::debug!(account = %account, "registered stealth keys");
        Ok(())
    }
}
