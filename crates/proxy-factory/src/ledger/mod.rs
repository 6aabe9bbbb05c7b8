//! Ledger capabilities the factory deploys through.
//!
//! The factory never creates accounts itself. It depends on a ledger exposing three
//! capabilities:
//!
//! - [`Hasher::hash`], the collision-resistant 256-bit hash used for init code hashes and inside
//!   the deterministic addressing rule
//! - [`Ledger::create`], ordinary creation whose address follows the ledger's own sequencing
//! - [`Ledger::create_deterministic`], salted creation at the address derived from the deployer,
//!   the salt and the init code hash, rejected when that address is already occupied
//!
//! The ledger is also responsible for serializing mutations: an existence check and the creation
//! that follows it complete before the next mutation is observed.

use alloy_primitives::{keccak256, Address, Bytes, B256};
use auto_impl::auto_impl;

use crate::Salt;

mod config;
mod memory;
mod shared;

pub use config::*;
pub use memory::*;
pub use shared::*;

/// The ledger's hash primitive.
#[auto_impl(&, &mut, Box, Arc)]
pub trait Hasher {
    /// Hashes `data` into a 32-byte digest.
    fn hash(&self, data: &[u8]) -> B256;
}

/// The Keccak-256 hash primitive used by Ethereum ledgers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256;

impl Hasher for Keccak256 {
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        keccak256(data)
    }
}

/// The outcome of a creation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new account was created at the address.
    Created(Address),
    /// The address is already occupied; nothing was changed.
    Occupied(Address),
}

impl CreateOutcome {
    /// The address the creation was aimed at.
    pub const fn address(&self) -> Address {
        match self {
            Self::Created(address) | Self::Occupied(address) => *address,
        }
    }

    /// Returns `true` if a new account was created.
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// The creation primitives of a ledger.
#[auto_impl(&mut, Box)]
pub trait Ledger: Hasher {
    /// The error type for ledger faults such as resource exhaustion.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Creates an account running `init_code`, on behalf of `deployer`. The address is chosen by
    /// the ledger's account sequencing.
    fn create(&mut self, deployer: Address, init_code: &Bytes)
        -> Result<CreateOutcome, Self::Error>;

    /// Creates an account running `init_code`, on behalf of `deployer`, at the address derived
    /// from `deployer`, `salt` and the hash of `init_code`.
    ///
    /// Returns [`CreateOutcome::Occupied`] without any state change if that address is taken.
    fn create_deterministic(
        &mut self,
        deployer: Address,
        salt: Salt,
        init_code: &Bytes,
    ) -> Result<CreateOutcome, Self::Error>;
}

/// Errors raised by the ledgers in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The execution budget cannot cover the creation.
    #[error("Out of gas: required={required} > remaining={remaining}")]
    OutOfGas {
        /// Gas the creation costs
        required: u64,
        /// Gas left in the budget
        remaining: u64,
    },

    /// The init code exceeds the size limit.
    #[error("Init code size limit exceeded: size={size} > limit={limit}")]
    InitCodeSizeLimit {
        /// Size of the init code
        size: usize,
        /// Init code size limit
        limit: usize,
    },

    /// The deployed code exceeds the size limit.
    #[error("Code size limit exceeded: size={size} > limit={limit}")]
    CodeSizeLimit {
        /// Size of the deployed code
        size: usize,
        /// Code size limit
        limit: usize,
    },

    /// The deployer's nonce cannot be incremented.
    #[error("Nonce overflow for {0}")]
    NonceOverflow(Address),

    /// A thread panicked while holding the shared ledger.
    #[error("Ledger lock poisoned")]
    Poisoned,
}
