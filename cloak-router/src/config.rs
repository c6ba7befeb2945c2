//! Router configuration.

use std::collections::HashMap;

use alloy_primitives::Address;

use cloak_core::constants::{
    CCIP_MUMBAI_SELECTOR, DEFAULT_RELAYER_ADDRESS, DEFAULT_RELAY_URL, DEFAULT_SIGNING_MESSAGE,
    DEFAULT_TRANSFER_CONTRACT, MUMBAI_CHAIN_ID, SEPOLIA_CHAIN_ID,
};

/// Static routing configuration.
///
/// The defaults mirror the deployed testnet setup: one transfer contract
/// on Sepolia and Mumbai, and a single allowed bridge route between them.
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Message the wallet signs to derive account keys.
    pub signing_message: String,
    /// Relayer wallet bound into withdrawal messages.
    pub relayer_address: Address,
    /// Relay service base URL.
    pub relay_url: String,
    /// Transfer-contract address per chain id.
    pub transfer_contracts: HashMap<u64, Address>,
    /// Allowed bridge routes: (source chain, destination chain) to the
    /// bridge's destination selector.
    pub bridge_routes: HashMap<(u64, u64), u64>,
}

impl RouterConfig {
    /// Transfer contract for a chain, if one is configured.
    pub fn transfer_contract(&self, chain_id: u64) -> Option<Address> {
        self.transfer_contracts.get(&chain_id).copied()
    }

    /// Bridge selector for a route, if the route is allowed.
    pub fn bridge_selector(&self, source: u64, destination: u64) -> Option<u64> {
        self.bridge_routes.get(&(source, destination)).copied()
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        let mut transfer_contracts = HashMap::new();
        transfer_contracts.insert(SEPOLIA_CHAIN_ID, DEFAULT_TRANSFER_CONTRACT);
        transfer_contracts.insert(MUMBAI_CHAIN_ID, DEFAULT_TRANSFER_CONTRACT);

        let mut bridge_routes = HashMap::new();
        bridge_routes.insert((SEPOLIA_CHAIN_ID, MUMBAI_CHAIN_ID), CCIP_MUMBAI_SELECTOR);

        Self {
            signing_message: DEFAULT_SIGNING_MESSAGE.to_string(),
            relayer_address: DEFAULT_RELAYER_ADDRESS,
            relay_url: DEFAULT_RELAY_URL.to_string(),
            transfer_contracts,
            bridge_routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bridge_allow_list() {
        let config = RouterConfig::default();
        assert_eq!(
            config.bridge_selector(SEPOLIA_CHAIN_ID, MUMBAI_CHAIN_ID),
            Some(CCIP_MUMBAI_SELECTOR)
        );
        // The reverse direction is not allowed.
        assert_eq!(
            config.bridge_selector(MUMBAI_CHAIN_ID, SEPOLIA_CHAIN_ID),
            None
        );
    }

    #[test]
    fn test_default_transfer_contracts() {
        let config = RouterConfig::default();
        assert!(config.transfer_contract(SEPOLIA_CHAIN_ID).is_some());
        assert!(config.transfer_contract(1).is_none());
    }
}
