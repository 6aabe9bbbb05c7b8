//! Solidity ABI of the minimal proxy factory.
//!
//! [`dispatch`] decodes calldata for one of the [`IMinimalProxyFactory`] functions, runs the
//! matching operation and returns the ABI-encoded return value. [`encode_revert`] turns a failed
//! call into the revert data a caller of the contract would observe.

use alloy_primitives::Bytes;
use alloy_sol_types::{sol, Revert, SolCall, SolError, SolInterface};
use tracing::debug;

use crate::{
    constants::DEPLOYMENT_FAILED_REASON, FactoryError, InputKind, InputLengthError, Ledger,
    MinimalProxyFactory,
};

sol! {
    /// External interface of the minimal proxy factory.
    interface IMinimalProxyFactory {
        /// Returns the init code of a minimal proxy delegating to `target`.
        function generateMinimalProxyInitCode(address target) external pure returns (bytes);

        /// Returns the address `deployMinimalProxy(target, salt)` deploys to.
        function calculateMinimalProxyDeploymentAddress(address target, bytes32 salt)
            external view returns (address);

        /// Deploys a minimal proxy through ordinary creation.
        function deployMinimalProxy(address target) external returns (address);

        /// Deploys a minimal proxy at the address derived from `salt`.
        function deployMinimalProxy(address target, bytes32 salt) external returns (address);
    }
}

use IMinimalProxyFactory::{
    calculateMinimalProxyDeploymentAddressCall, deployMinimalProxy_0Call, deployMinimalProxy_1Call,
    generateMinimalProxyInitCodeCall, IMinimalProxyFactoryCalls,
};

/// Runs the call encoded in `input` against `factory` and returns the ABI-encoded return value.
///
/// Calldata that does not decode into a known call fails with
/// [`FactoryError::InvalidInputLength`].
pub fn dispatch<L: Ledger>(
    factory: &mut MinimalProxyFactory<L>,
    input: &[u8],
) -> Result<Bytes, FactoryError<L::Error>> {
    let call = IMinimalProxyFactoryCalls::abi_decode(input).map_err(|err| {
        debug!(%err, len = input.len(), "Undecodable factory calldata");
        InputLengthError::new(InputKind::Calldata, input.len())
    })?;

    let output = match call {
        IMinimalProxyFactoryCalls::generateMinimalProxyInitCode(call) => {
            let init_code = factory.generate_minimal_proxy_init_code(call.target);
            generateMinimalProxyInitCodeCall::abi_encode_returns(&init_code)
        }
        IMinimalProxyFactoryCalls::calculateMinimalProxyDeploymentAddress(call) => {
            let address =
                factory.calculate_minimal_proxy_deployment_address(call.target, call.salt);
            calculateMinimalProxyDeploymentAddressCall::abi_encode_returns(&address)
        }
        IMinimalProxyFactoryCalls::deployMinimalProxy_0(call) => {
            let proxy = factory.deploy_minimal_proxy(call.target)?;
            deployMinimalProxy_0Call::abi_encode_returns(&proxy)
        }
        IMinimalProxyFactoryCalls::deployMinimalProxy_1(call) => {
            let proxy = factory.deploy_minimal_proxy_deterministic(call.target, call.salt)?;
            deployMinimalProxy_1Call::abi_encode_returns(&proxy)
        }
    };

    Ok(output.into())
}

/// Encodes the revert data of a failed call.
///
/// A failed deployment reverts with `Error("Factory: failed deployment")` and malformed calldata
/// reverts without data. Other errors are faults of the ledger rather than reverts of the
/// factory, and return `None`.
pub fn encode_revert<E>(error: &FactoryError<E>) -> Option<Bytes> {
    match error {
        FactoryError::DeploymentFailed { .. } => {
            Some(Revert { reason: DEPLOYMENT_FAILED_REASON.to_string() }.abi_encode().into())
        }
        FactoryError::InvalidInputLength(_) => Some(Bytes::new()),
        FactoryError::AddressMismatch { .. } | FactoryError::Ledger(_) => None,
    }
}
