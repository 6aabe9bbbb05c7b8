//! Configuration of the in-memory ledger.

use serde::{Deserialize, Serialize};

use crate::constants::{gas, limits};

/// Configuration of the [`InMemoryLedger`](super::InMemoryLedger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Total gas the ledger may spend on creations. `None` means unlimited.
    pub gas_budget: Option<u64>,
    /// Maximum init code size (EIP-3860).
    pub max_initcode_size: usize,
    /// Maximum deployed code size (EIP-170).
    pub max_code_size: usize,
    /// Nonce of newly created contract accounts (EIP-161).
    pub contract_initial_nonce: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            gas_budget: None,
            max_initcode_size: limits::MAX_INITCODE_SIZE,
            max_code_size: limits::MAX_CODE_SIZE,
            contract_initial_nonce: 1,
        }
    }
}

impl LedgerConfig {
    /// Sets the gas budget.
    pub const fn with_gas_budget(mut self, gas_budget: u64) -> Self {
        self.gas_budget = Some(gas_budget);
        self
    }

    /// Sets the maximum init code size.
    pub const fn with_max_initcode_size(mut self, max_initcode_size: usize) -> Self {
        self.max_initcode_size = max_initcode_size;
        self
    }

    /// Sets the maximum deployed code size.
    pub const fn with_max_code_size(mut self, max_code_size: usize) -> Self {
        self.max_code_size = max_code_size;
        self
    }

    /// Gas charged for a creation with `init_code_len` bytes of init code depositing
    /// `code_len` bytes of code. Deterministic creations additionally pay for hashing the init
    /// code.
    pub const fn creation_gas(init_code_len: usize, code_len: usize, deterministic: bool) -> u64 {
        let mut cost = gas::CREATE + gas::CODEDEPOSIT * code_len as u64;
        if deterministic {
            cost += gas::KECCAK256WORD * (init_code_len as u64).div_ceil(32);
        }
        cost
    }
}
