//! Fixed-size value types accepted by the factory.

use alloy_primitives::{Address, B256};

use crate::InputLengthError;

/// A 32-byte salt selecting one of many deterministic deployments of the same init code.
pub type Salt = B256;

/// The all-zero salt, a valid and commonly used default.
pub const DEFAULT_SALT: Salt = B256::ZERO;

/// The kind of fixed-size input, used to report length violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InputKind {
    /// A 20-byte address (target or deployer).
    #[display("address")]
    Address,
    /// A 32-byte salt.
    #[display("salt")]
    Salt,
    /// A 32-byte init code hash.
    #[display("init code hash")]
    InitCodeHash,
    /// ABI-encoded call data, of no fixed length.
    #[display("calldata")]
    Calldata,
}

impl InputKind {
    /// The number of bytes an input of this kind must have, if fixed.
    pub const fn expected_len(self) -> Option<usize> {
        match self {
            Self::Address => Some(20),
            Self::Salt | Self::InitCodeHash => Some(32),
            Self::Calldata => None,
        }
    }
}

/// Parses a 20-byte address from a raw slice.
pub fn address_from_slice(bytes: &[u8]) -> Result<Address, InputLengthError> {
    Address::try_from(bytes).map_err(|_| InputLengthError::new(InputKind::Address, bytes.len()))
}

/// Parses a 32-byte salt from a raw slice.
pub fn salt_from_slice(bytes: &[u8]) -> Result<Salt, InputLengthError> {
    B256::try_from(bytes).map_err(|_| InputLengthError::new(InputKind::Salt, bytes.len()))
}

/// Parses a 32-byte init code hash from a raw slice.
pub fn init_code_hash_from_slice(bytes: &[u8]) -> Result<B256, InputLengthError> {
    B256::try_from(bytes).map_err(|_| InputLengthError::new(InputKind::InitCodeHash, bytes.len()))
}
