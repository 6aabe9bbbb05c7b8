//! Deployment address derivation.

use alloy_primitives::{Address, B256};

use crate::{
    constants::create2::{PREFIX, PREIMAGE_SIZE},
    address_from_slice, init_code_hash_from_slice, salt_from_slice, Hasher, InputLengthError,
    Salt,
};

/// Calculates the address a deterministic (`CREATE2`) deployment by `deployer` occupies.
///
/// The address is the low 20 bytes of `hash(0xff ‖ deployer ‖ salt ‖ init_code_hash)`, where
/// `hash` is the ledger's hash primitive.
pub fn calculate_deployment_address<H: Hasher + ?Sized>(
    hasher: &H,
    deployer: Address,
    salt: Salt,
    init_code_hash: B256,
) -> Address {
    let mut preimage = [0u8; PREIMAGE_SIZE];
    preimage[0] = PREFIX;
    preimage[1..21].copy_from_slice(deployer.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..].copy_from_slice(init_code_hash.as_slice());

    let digest = hasher.hash(&preimage);
    Address::from_slice(&digest[12..])
}

/// Same as [`calculate_deployment_address`], for raw byte inputs.
///
/// Fails with an [`InputLengthError`] if any input has the wrong length.
pub fn calculate_deployment_address_from_slices<H: Hasher + ?Sized>(
    hasher: &H,
    deployer: &[u8],
    salt: &[u8],
    init_code_hash: &[u8],
) -> Result<Address, InputLengthError> {
    Ok(calculate_deployment_address(
        hasher,
        address_from_slice(deployer)?,
        salt_from_slice(salt)?,
        init_code_hash_from_slice(init_code_hash)?,
    ))
}

/// Calculates the address of the `nonce`-th ordinary (`CREATE`) deployment by `deployer`:
/// `keccak256(rlp([deployer, nonce]))[12:]`.
#[inline]
pub fn calculate_create_address(deployer: Address, nonce: u64) -> Address {
    deployer.create(nonce)
}
