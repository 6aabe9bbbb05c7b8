//! Generic contract factory deploying arbitrary init code through a [`Ledger`].

use alloy_primitives::{Address, Bytes, B256};
use tracing::{debug, warn};

use crate::{calculate_deployment_address, CreateOutcome, FactoryError, Ledger, Salt};

/// A contract factory living at `address` on a ledger.
///
/// The factory deploys init code either through the ledger's ordinary creation, at an address
/// decided by the ledger, or deterministically, at an address derived from the factory address,
/// a salt and the init code hash which can be calculated before deploying.
#[derive(Debug, Clone)]
pub struct Factory<L> {
    address: Address,
    ledger: L,
}

impl<L> Factory<L> {
    /// Creates a factory at `address` deploying through `ledger`.
    pub const fn new(address: Address, ledger: L) -> Self {
        Self { address, ledger }
    }

    /// The address of the factory, the deployer of every account it creates.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns a reference to the ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns a mutable reference to the ledger.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Consumes the factory and returns the ledger.
    pub fn into_ledger(self) -> L {
        self.ledger
    }
}

impl<L: Ledger> Factory<L> {
    /// Hashes `init_code` with the ledger's hash primitive.
    pub fn init_code_hash(&self, init_code: &[u8]) -> B256 {
        self.ledger.hash(init_code)
    }

    /// Calculates the address a deterministic deployment of init code hashing to
    /// `init_code_hash` with `salt` occupies.
    pub fn calculate_deployment_address(&self, init_code_hash: B256, salt: Salt) -> Address {
        calculate_deployment_address(&self.ledger, self.address, salt, init_code_hash)
    }

    /// Deploys `init_code` through the ledger's ordinary creation and returns the new address.
    pub fn deploy(&mut self, init_code: &Bytes) -> Result<Address, FactoryError<L::Error>> {
        match self.ledger.create(self.address, init_code).map_err(FactoryError::Ledger)? {
            CreateOutcome::Created(address) => {
                debug!(factory = %self.address, %address, "Deployed contract");
                Ok(address)
            }
            CreateOutcome::Occupied(address) => {
                warn!(factory = %self.address, %address, "Deployment failed");
                Err(FactoryError::DeploymentFailed { address, salt: None })
            }
        }
    }

    /// Deploys `init_code` at the address derived from the factory address, `salt` and the init
    /// code hash, and returns that address.
    ///
    /// Fails with [`FactoryError::DeploymentFailed`] if the address is already occupied, in
    /// which case the ledger is left unchanged. Not idempotent: repeating a successful call
    /// fails.
    pub fn deploy_deterministic(
        &mut self,
        init_code: &Bytes,
        salt: Salt,
    ) -> Result<Address, FactoryError<L::Error>> {
        let init_code_hash = self.init_code_hash(init_code);
        let expected = self.calculate_deployment_address(init_code_hash, salt);

        let outcome = self
            .ledger
            .create_deterministic(self.address, salt, init_code)
            .map_err(FactoryError::Ledger)?;

        match outcome {
            CreateOutcome::Created(actual) if actual != expected => {
                Err(FactoryError::AddressMismatch { expected, actual })
            }
            CreateOutcome::Created(address) => {
                debug!(
                    factory = %self.address,
                    %address,
                    %salt,
                    %init_code_hash,
                    "Deployed contract deterministically"
                );
                Ok(address)
            }
            CreateOutcome::Occupied(address) => {
                debug!(factory = %self.address, %address, %salt, "Deterministic deployment failed");
                Err(FactoryError::DeploymentFailed { address, salt: Some(salt) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hasher, InMemoryLedger, LedgerError, DEFAULT_SALT};
    use alloy_primitives::{address, bytes, keccak256};

    const FACTORY: Address = address!("0x00000000000000000000000000000000000fac70");

    /// A ledger that creates deterministic deployments at a fixed wrong address.
    #[derive(Debug, Default)]
    struct MisroutingLedger;

    impl Hasher for MisroutingLedger {
        fn hash(&self, data: &[u8]) -> B256 {
            keccak256(data)
        }
    }

    impl Ledger for MisroutingLedger {
        type Error = LedgerError;

        fn create(
            &mut self,
            _deployer: Address,
            _init_code: &Bytes,
        ) -> Result<CreateOutcome, Self::Error> {
            Ok(CreateOutcome::Occupied(Address::ZERO))
        }

        fn create_deterministic(
            &mut self,
            _deployer: Address,
            _salt: Salt,
            _init_code: &Bytes,
        ) -> Result<CreateOutcome, Self::Error> {
            Ok(CreateOutcome::Created(Address::repeat_byte(0x01)))
        }
    }

    #[test]
    fn test_deploy_arbitrary_init_code() {
        let mut factory = Factory::new(FACTORY, InMemoryLedger::default());
        let init_code = bytes!("6080604052");

        let first = factory.deploy(&init_code).unwrap();
        let second = factory.deploy(&init_code).unwrap();
        assert_ne!(first, second);
        assert_eq!(first, FACTORY.create(0));
        assert_eq!(second, FACTORY.create(1));
        assert_eq!(factory.ledger().code_at(first), Some(init_code));
    }

    #[test]
    fn test_deploy_deterministic_matches_calculation() {
        let mut factory = Factory::new(FACTORY, InMemoryLedger::default());
        let init_code = bytes!("6080604052");
        let salt = B256::with_last_byte(7);

        let expected = factory.calculate_deployment_address(keccak256(&init_code), salt);
        assert!(!factory.ledger().is_occupied(expected));
        assert_eq!(factory.deploy_deterministic(&init_code, salt).unwrap(), expected);
        assert!(factory.ledger().is_occupied(expected));
    }

    #[test]
    fn test_deploy_deterministic_twice_fails() {
        let mut factory = Factory::new(FACTORY, InMemoryLedger::default());
        let init_code = bytes!("6080604052");

        let address = factory.deploy_deterministic(&init_code, DEFAULT_SALT).unwrap();
        let err = factory.deploy_deterministic(&init_code, DEFAULT_SALT).unwrap_err();
        assert!(err.is_deployment_failed());
        assert!(matches!(
            err,
            FactoryError::DeploymentFailed { address: a, salt: Some(s) }
                if a == address && s == DEFAULT_SALT
        ));
    }

    #[test]
    fn test_ordinary_collision_is_deployment_failure() {
        let mut factory = Factory::new(FACTORY, MisroutingLedger);
        let err = factory.deploy(&bytes!("00")).unwrap_err();
        assert!(matches!(
            err,
            FactoryError::DeploymentFailed { address, salt: None } if address.is_zero()
        ));
    }

    #[test]
    fn test_address_mismatch_is_reported() {
        let mut factory = Factory::new(FACTORY, MisroutingLedger);
        let init_code = bytes!("00");
        let expected = factory.calculate_deployment_address(keccak256(&init_code), DEFAULT_SALT);

        let err = factory.deploy_deterministic(&init_code, DEFAULT_SALT).unwrap_err();
        match err {
            FactoryError::AddressMismatch { expected: e, actual } => {
                assert_eq!(e, expected);
                assert_eq!(actual, Address::repeat_byte(0x01));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ledger_error_is_surfaced() {
        let ledger = InMemoryLedger::new(crate::LedgerConfig::default().with_gas_budget(0));
        let mut factory = Factory::new(FACTORY, ledger);

        let err = factory.deploy_deterministic(&bytes!("00"), DEFAULT_SALT).unwrap_err();
        assert_eq!(
            err.as_ledger(),
            Some(&LedgerError::OutOfGas { required: 32_000 + 200 + 6, remaining: 0 })
        );
        assert_eq!(factory.ledger().nonce_of(FACTORY), 0);
    }
}
