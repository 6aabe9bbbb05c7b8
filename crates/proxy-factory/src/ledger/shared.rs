//! A ledger handle shared between threads.

use std::sync::{Arc, Mutex, MutexGuard};

use alloy_primitives::{Address, Bytes, B256};

use super::{CreateOutcome, Hasher, Keccak256, Ledger, LedgerError};
use crate::Salt;

/// A cloneable handle to one ledger.
///
/// Every creation holds the lock for its whole duration, so the occupancy check and the write
/// that follows it form a single step in the total order of mutations. Of two concurrent
/// deterministic deployments of the same init code with the same salt, exactly one succeeds.
///
/// Hashing goes through the handle's own stateless hasher `H` and never takes the lock, so
/// address calculations do not wait behind writes. `H` must agree with the wrapped ledger's hash
/// primitive; otherwise deterministic deployments are reported as address mismatches.
#[derive(Debug, Default)]
pub struct SharedLedger<L, H = Keccak256> {
    inner: Arc<Mutex<L>>,
    hasher: H,
}

impl<L, H: Clone> Clone for SharedLedger<L, H> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), hasher: self.hasher.clone() }
    }
}

impl<L> SharedLedger<L> {
    /// Wraps `ledger` into a shared handle hashing with Keccak-256.
    pub fn new(ledger: L) -> Self {
        Self::with_hasher(ledger, Keccak256)
    }
}

impl<L, H> SharedLedger<L, H> {
    /// Wraps `ledger` into a shared handle hashing with `hasher`.
    pub fn with_hasher(ledger: L, hasher: H) -> Self {
        Self { inner: Arc::new(Mutex::new(ledger)), hasher }
    }

    /// Runs `f` with shared access to the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&L) -> R) -> Result<R, LedgerError> {
        Ok(f(&*self.lock()?))
    }

    /// Runs `f` with exclusive access to the ledger.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut L) -> R) -> Result<R, LedgerError> {
        Ok(f(&mut *self.lock()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, L>, LedgerError> {
        self.inner.lock().map_err(|_| LedgerError::Poisoned)
    }
}

impl<L, H: Hasher> Hasher for SharedLedger<L, H> {
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        self.hasher.hash(data)
    }
}

impl<L, H> Ledger for SharedLedger<L, H>
where
    L: Ledger<Error = LedgerError>,
    H: Hasher,
{
    type Error = LedgerError;

    fn create(
        &mut self,
        deployer: Address,
        init_code: &Bytes,
    ) -> Result<CreateOutcome, Self::Error> {
        self.lock()?.create(deployer, init_code)
    }

    fn create_deterministic(
        &mut self,
        deployer: Address,
        salt: Salt,
        init_code: &Bytes,
    ) -> Result<CreateOutcome, Self::Error> {
        self.lock()?.create_deterministic(deployer, salt, init_code)
    }
}
