//! Error types for the factory.

use alloy_primitives::Address;

use crate::{InputKind, Salt};

/// A fixed-size input had the wrong number of bytes.
///
/// This is a caller contract violation and is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} length: {}", describe_length(.expected, .actual))]
pub struct InputLengthError {
    /// The kind of input.
    pub kind: InputKind,
    /// The required length, if the input has a fixed size.
    pub expected: Option<usize>,
    /// The length that was supplied.
    pub actual: usize,
}

impl InputLengthError {
    /// Creates a new error for an input of the given kind and actual length.
    pub const fn new(kind: InputKind, actual: usize) -> Self {
        Self { kind, expected: kind.expected_len(), actual }
    }
}

fn describe_length(expected: &Option<usize>, actual: &usize) -> String {
    match expected {
        Some(expected) => format!("expected {expected} bytes, got {actual}"),
        None => format!("{actual} bytes do not decode"),
    }
}

/// Errors surfaced by the factory operations.
///
/// `E` is the error type of the ledger the factory deploys through. Ledger errors, including
/// resource exhaustion, are surfaced unchanged.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError<E> {
    /// A fixed-size input had the wrong length.
    #[error(transparent)]
    InvalidInputLength(#[from] InputLengthError),

    /// The ledger did not create an account, because the address is already occupied.
    #[error("Factory: failed deployment at {address}")]
    DeploymentFailed {
        /// The occupied address.
        address: Address,
        /// The salt of a deterministic deployment.
        salt: Option<Salt>,
    },

    /// The ledger created an account at a different address than the one derived.
    #[error("Deployed address mismatch: expected {expected}, got {actual}")]
    AddressMismatch {
        /// The derived address.
        expected: Address,
        /// The address reported by the ledger.
        actual: Address,
    },

    /// The ledger failed.
    #[error("Ledger error: {0}")]
    Ledger(#[source] E),
}

impl<E> FactoryError<E> {
    /// Returns `true` if the error is a [`FactoryError::DeploymentFailed`].
    pub const fn is_deployment_failed(&self) -> bool {
        matches!(self, Self::DeploymentFailed { .. })
    }

    /// Returns the ledger error, if any.
    pub fn as_ledger(&self) -> Option<&E> {
        match self {
            Self::Ledger(err) => Some(err),
            _ => None,
        }
    }
}
