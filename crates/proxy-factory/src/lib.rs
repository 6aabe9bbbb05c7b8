//! A factory for minimal proxies (EIP-1167).
//!
//! A minimal proxy is a 45-byte contract that forwards every call to a fixed target with
//! `DELEGATECALL`. The factory generates its init code, predicts deterministic (`CREATE2`)
//! deployment addresses, and deploys proxies through a [`Ledger`] that supplies the hash and
//! account creation primitives.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod abi;
pub use abi::*;

mod address;
pub use address::*;

mod error;
pub use error::*;

mod factory;
pub use factory::*;

mod initcode;
pub use initcode::*;

mod ledger;
pub use ledger::*;

mod minimal_proxy;
pub use minimal_proxy::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod types;
pub use types::*;
