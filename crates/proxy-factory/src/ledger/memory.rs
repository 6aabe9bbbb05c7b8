//! An in-memory ledger backed by a revm cache database.

use alloy_primitives::{keccak256, Address, Bytes, B256};
use revm::{
    database::{CacheDB, EmptyDB},
    primitives::KECCAK_EMPTY,
    state::{AccountInfo, Bytecode},
    DatabaseRef,
};
use tracing::{debug, trace, warn};

use super::{CreateOutcome, Hasher, Ledger, LedgerConfig, LedgerError};
use crate::{calculate_create_address, calculate_deployment_address, deployed_code, Salt};

/// How the address of a new account is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreateScheme {
    /// From the deployer's nonce.
    Create,
    /// From the deployer, the salt and the init code hash.
    Create2 { salt: Salt },
}

/// A ledger keeping accounts in memory.
///
/// Creations are applied atomically: the limits, the budget and the target address are all
/// checked before anything is written, so a rejected creation leaves the ledger untouched. There
/// is no interpreter behind the ledger; the deposited code is derived with [`deployed_code`].
#[derive(Debug, Default, Clone, derive_more::Deref)]
pub struct InMemoryLedger {
    #[deref]
    db: CacheDB<EmptyDB>,
    config: LedgerConfig,
    gas_used: u64,
}

impl InMemoryLedger {
    /// Creates an empty ledger with the given configuration.
    pub fn new(config: LedgerConfig) -> Self {
        Self { db: CacheDB::default(), config, gas_used: 0 }
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Gas spent on creations so far.
    pub const fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// Gas left in the budget, or `None` if the budget is unlimited.
    pub fn gas_remaining(&self) -> Option<u64> {
        self.config.gas_budget.map(|budget| budget.saturating_sub(self.gas_used))
    }

    /// Returns the account at `address`, if it exists.
    pub fn account(&self, address: Address) -> Option<AccountInfo> {
        self.db.basic_ref(address).ok().flatten()
    }

    /// Returns the non-empty code at `address`.
    pub fn code_at(&self, address: Address) -> Option<Bytes> {
        let info = self.account(address)?;
        if info.code_hash == KECCAK_EMPTY {
            return None;
        }
        let code = match info.code {
            Some(code) => code,
            None => self.db.code_by_hash_ref(info.code_hash).ok()?,
        };
        let bytes = code.original_bytes();
        (!bytes.is_empty()).then_some(bytes)
    }

    /// Returns the nonce of the account at `address`, zero if it does not exist.
    pub fn nonce_of(&self, address: Address) -> u64 {
        self.account(address).map(|info| info.nonce).unwrap_or_default()
    }

    /// Returns `true` if an account at `address` would make a creation there collide: it has a
    /// non-zero nonce or non-empty code (EIP-684).
    pub fn is_occupied(&self, address: Address) -> bool {
        self.account(address).is_some_and(|info| info.nonce != 0 || info.code_hash != KECCAK_EMPTY)
    }

    /// Places a contract with `code` at `address`, with the configured initial nonce.
    pub fn insert_contract(&mut self, address: Address, code: Bytes) {
        let bytecode = Bytecode::new_legacy(code);
        let mut info = self.account(address).unwrap_or_default();
        info.nonce = self.config.contract_initial_nonce;
        info.code_hash = bytecode.hash_slow();
        info.code = Some(bytecode);
        self.db.insert_account_info(address, info);
    }

    /// Places a contract with `code` at `address`.
    pub fn contract(mut self, address: Address, code: Bytes) -> Self {
        self.insert_contract(address, code);
        self
    }

    fn create_with_scheme(
        &mut self,
        deployer: Address,
        scheme: CreateScheme,
        init_code: &Bytes,
    ) -> Result<CreateOutcome, LedgerError> {
        if init_code.len() > self.config.max_initcode_size {
            return Err(LedgerError::InitCodeSizeLimit {
                size: init_code.len(),
                limit: self.config.max_initcode_size,
            });
        }

        let code = deployed_code(init_code);
        if code.len() > self.config.max_code_size {
            return Err(LedgerError::CodeSizeLimit {
                size: code.len(),
                limit: self.config.max_code_size,
            });
        }

        let mut deployer_info = self.account(deployer).unwrap_or_default();
        let next_nonce =
            deployer_info.nonce.checked_add(1).ok_or(LedgerError::NonceOverflow(deployer))?;

        let (address, deterministic) = match scheme {
            CreateScheme::Create => {
                (calculate_create_address(deployer, deployer_info.nonce), false)
            }
            CreateScheme::Create2 { salt } => {
                (calculate_deployment_address(&*self, deployer, salt, self.hash(init_code)), true)
            }
        };

        let gas = LedgerConfig::creation_gas(init_code.len(), code.len(), deterministic);
        if let Some(remaining) = self.gas_remaining() {
            if gas > remaining {
                warn!(%deployer, %address, gas, remaining, "Creation exceeds gas budget");
                return Err(LedgerError::OutOfGas { required: gas, remaining });
            }
        }

        if self.is_occupied(address) {
            debug!(%deployer, %address, ?scheme, "Creation target already occupied");
            return Ok(CreateOutcome::Occupied(address));
        }

        self.gas_used += gas;

        deployer_info.nonce = next_nonce;
        self.db.insert_account_info(deployer, deployer_info);
        self.insert_contract(address, code);

        trace!(%deployer, %address, ?scheme, gas, gas_used = self.gas_used, "Account created");
        Ok(CreateOutcome::Created(address))
    }
}

impl Hasher for InMemoryLedger {
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        keccak256(data)
    }
}

impl Ledger for InMemoryLedger {
    type Error = LedgerError;

    fn create(
        &mut self,
        deployer: Address,
        init_code: &Bytes,
    ) -> Result<CreateOutcome, Self::Error> {
        self.create_with_scheme(deployer, CreateScheme::Create, init_code)
    }

    fn create_deterministic(
        &mut self,
        deployer: Address,
        salt: Salt,
        init_code: &Bytes,
    ) -> Result<CreateOutcome, Self::Error> {
        self.create_with_scheme(deployer, CreateScheme::Create2 { salt }, init_code)
    }
}
