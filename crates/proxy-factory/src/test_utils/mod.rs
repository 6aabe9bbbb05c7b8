//! Test utilities for the minimal proxy factory.

use alloy_primitives::{address, bytes, Address, Bytes};

use crate::{InMemoryLedger, LedgerConfig, MinimalProxyFactory};

/// Address the test factory is deployed at.
pub const FACTORY_ADDRESS: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

/// A target address for test proxies.
pub const TARGET_ADDRESS: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

/// Placeholder code of the factory account, so it exists on the ledger like a deployed contract.
pub const FACTORY_CODE: Bytes = bytes!("6080604052348015600f57600080fd5b50");

/// Creates a minimal proxy factory at [`FACTORY_ADDRESS`] over a fresh in-memory ledger.
pub fn memory_factory() -> MinimalProxyFactory<InMemoryLedger> {
    memory_factory_with_config(LedgerConfig::default())
}

/// Creates a minimal proxy factory at [`FACTORY_ADDRESS`] over a fresh in-memory ledger with the
/// given configuration.
pub fn memory_factory_with_config(config: LedgerConfig) -> MinimalProxyFactory<InMemoryLedger> {
    let ledger = InMemoryLedger::new(config).contract(FACTORY_ADDRESS, FACTORY_CODE);
    MinimalProxyFactory::new(FACTORY_ADDRESS, ledger)
}
