//! The minimal proxy factory.

use alloy_primitives::{Address, Bytes};
use tracing::info;

use crate::{generate_minimal_proxy_init_code, Factory, FactoryError, Ledger, Salt};

/// A factory deploying minimal proxies (EIP-1167) that delegate every call to a target.
///
/// Derefs to the underlying [`Factory`], so arbitrary init code can be deployed through it as
/// well.
#[derive(Debug, Clone, derive_more::Deref, derive_more::DerefMut)]
pub struct MinimalProxyFactory<L> {
    factory: Factory<L>,
}

impl<L> MinimalProxyFactory<L> {
    /// Creates a minimal proxy factory at `address` deploying through `ledger`.
    pub const fn new(address: Address, ledger: L) -> Self {
        Self { factory: Factory::new(address, ledger) }
    }

    /// Generates the init code of a minimal proxy delegating to `target`.
    ///
    /// The target is not validated; any address is accepted, including the zero address and
    /// addresses without code.
    pub fn generate_minimal_proxy_init_code(&self, target: Address) -> Bytes {
        generate_minimal_proxy_init_code(target)
    }

    /// Consumes the factory and returns the ledger.
    pub fn into_ledger(self) -> L {
        self.factory.into_ledger()
    }
}

impl<L: Ledger> MinimalProxyFactory<L> {
    /// Calculates the address `deploy_minimal_proxy_deterministic(target, salt)` would deploy
    /// to. Pure: the ledger is only used for its hash primitive.
    pub fn calculate_minimal_proxy_deployment_address(
        &self,
        target: Address,
        salt: Salt,
    ) -> Address {
        let init_code_hash = self.init_code_hash(&generate_minimal_proxy_init_code(target));
        self.calculate_deployment_address(init_code_hash, salt)
    }

    /// Deploys a minimal proxy delegating to `target` through ordinary creation.
    ///
    /// Every call creates a new, distinct proxy.
    pub fn deploy_minimal_proxy(
        &mut self,
        target: Address,
    ) -> Result<Address, FactoryError<L::Error>> {
        let proxy = self.deploy(&generate_minimal_proxy_init_code(target))?;
        info!(factory = %self.address(), %target, %proxy, "Deployed minimal proxy");
        Ok(proxy)
    }

    /// Deploys a minimal proxy delegating to `target` at the address
    /// [`calculate_minimal_proxy_deployment_address`](Self::calculate_minimal_proxy_deployment_address)
    /// returns for the same `target` and `salt`.
    ///
    /// Fails with [`FactoryError::DeploymentFailed`] if that address is already occupied, for
    /// example by an earlier call with the same arguments.
    pub fn deploy_minimal_proxy_deterministic(
        &mut self,
        target: Address,
        salt: Salt,
    ) -> Result<Address, FactoryError<L::Error>> {
        let proxy = self.deploy_deterministic(&generate_minimal_proxy_init_code(target), salt)?;
        info!(
            factory = %self.address(),
            %target,
            %salt,
            %proxy,
            "Deployed minimal proxy deterministically"
        );
        Ok(proxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{minimal_proxy_runtime_code, minimal_proxy_target, InMemoryLedger, DEFAULT_SALT};
    use alloy_primitives::{address, B256};

    const FACTORY: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const TARGET: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

    fn factory() -> MinimalProxyFactory<InMemoryLedger> {
        MinimalProxyFactory::new(FACTORY, InMemoryLedger::default())
    }

    #[test]
    fn test_calculate_known_addresses() {
        let factory = factory();
        assert_eq!(
            factory.calculate_minimal_proxy_deployment_address(TARGET, DEFAULT_SALT),
            address!("0x571795e8a41b9763de5805a9aef207f509d35f76")
        );
        assert_eq!(
            factory.calculate_minimal_proxy_deployment_address(TARGET, B256::with_last_byte(1)),
            address!("0xf31cf3edbb1885f3506d558b014bfa8cc16541f3")
        );

        let target = address!("0xbebebebebebebebebebebebebebebebebebebebe");
        assert_eq!(
            factory.calculate_minimal_proxy_deployment_address(target, DEFAULT_SALT),
            address!("0xd10a6e10f341f8e6812485a06748ffeae6d60cd4")
        );
        assert_eq!(
            factory.calculate_minimal_proxy_deployment_address(target, B256::with_last_byte(1)),
            address!("0xe7f08455c6e0f72819a122837fbe5962abac51a0")
        );
    }

    #[test]
    fn test_deploy_deterministic_then_collide() {
        let mut factory = factory();
        let expected = factory.calculate_minimal_proxy_deployment_address(TARGET, DEFAULT_SALT);

        let proxy = factory.deploy_minimal_proxy_deterministic(TARGET, DEFAULT_SALT).unwrap();
        assert_eq!(proxy, expected);
        assert_eq!(factory.ledger().code_at(proxy), Some(minimal_proxy_runtime_code(TARGET)));
        assert_eq!(
            factory.ledger().code_at(proxy).and_then(|code| minimal_proxy_target(&code)),
            Some(TARGET)
        );

        let before = factory.ledger().clone();
        let err = factory.deploy_minimal_proxy_deterministic(TARGET, DEFAULT_SALT).unwrap_err();
        assert!(err.is_deployment_failed());
        assert_eq!(err.to_string(), format!("Factory: failed deployment at {proxy}"));
        assert_eq!(factory.ledger().nonce_of(FACTORY), before.nonce_of(FACTORY));
        assert_eq!(factory.ledger().gas_used(), before.gas_used());
    }

    #[test]
    fn test_deploy_is_not_deterministic() {
        let mut factory = factory();
        let first = factory.deploy_minimal_proxy(TARGET).unwrap();
        let second = factory.deploy_minimal_proxy(TARGET).unwrap();
        assert_ne!(first, second);
        assert_eq!(factory.ledger().code_at(first), factory.ledger().code_at(second));
    }

    #[test]
    fn test_self_target() {
        // The factory may clone itself.
        let mut factory = factory();
        let expected = factory.calculate_minimal_proxy_deployment_address(FACTORY, DEFAULT_SALT);
        let proxy = factory.deploy_minimal_proxy_deterministic(FACTORY, DEFAULT_SALT).unwrap();
        assert_eq!(proxy, expected);
        assert_eq!(
            factory.generate_minimal_proxy_init_code(FACTORY),
            generate_minimal_proxy_init_code(FACTORY)
        );
    }
}
