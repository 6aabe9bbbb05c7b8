//! Constants for the minimal proxy factory.
//!
//! It groups the byte-layout constants of the minimal proxy and the gas schedule used by the
//! in-memory ledger as sub-modules.

/// Byte layout of the minimal proxy (EIP-1167) init code.
pub mod minimal_proxy {
    use alloy_primitives::hex;

    /// The init code prefix. The first [`LOADER_SIZE`] bytes copy the runtime code into memory
    /// and return it; the remaining bytes are the start of the runtime code, ending in `PUSH20`.
    pub const INIT_CODE_PREFIX: [u8; 20] = hex!("3d602d80600a3d3981f3363d3d373d3d3d363d73");
    /// The init code suffix following the embedded target address.
    pub const INIT_CODE_SUFFIX: [u8; 15] = hex!("5af43d82803e903d91602b57fd5bf3");

    /// The size of an address embedded in the init code.
    pub const TARGET_SIZE: usize = 20;
    /// The total size of the init code.
    pub const INIT_CODE_SIZE: usize = INIT_CODE_PREFIX.len() + TARGET_SIZE + INIT_CODE_SUFFIX.len();

    /// The size of the loader at the start of the init code.
    pub const LOADER_SIZE: usize = 10;
    /// The size of the runtime code left at the clone address.
    pub const RUNTIME_CODE_SIZE: usize = INIT_CODE_SIZE - LOADER_SIZE;

    /// Offset of the target address inside the init code.
    pub const TARGET_OFFSET: usize = INIT_CODE_PREFIX.len();
}

/// Constants of the deterministic (`CREATE2`) addressing rule.
pub mod create2 {
    /// The constant leading byte of the `CREATE2` preimage.
    pub const PREFIX: u8 = 0xff;
    /// The size of the `CREATE2` preimage: `0xff ‖ deployer ‖ salt ‖ init_code_hash`.
    pub const PREIMAGE_SIZE: usize = 1 + 20 + 32 + 32;
}

/// Gas schedule charged by the in-memory ledger.
pub mod gas {
    /// Base cost of a contract creation.
    pub const CREATE: u64 = 32_000;
    /// Cost per 32-byte word of init code hashed by `CREATE2`.
    pub const KECCAK256WORD: u64 = 6;
    /// Cost per byte of deposited runtime code.
    pub const CODEDEPOSIT: u64 = 200;
}

/// Size limits enforced by the in-memory ledger.
pub mod limits {
    /// Maximum runtime code size (EIP-170).
    pub const MAX_CODE_SIZE: usize = 0x6000;
    /// Maximum init code size (EIP-3860).
    pub const MAX_INITCODE_SIZE: usize = 2 * MAX_CODE_SIZE;
}

/// The revert reason used when a creation does not produce an account.
pub const DEPLOYMENT_FAILED_REASON: &str = "Factory: failed deployment";
