//! Init code of the minimal proxy (EIP-1167).
//!
//! The init code is a pure function of the target address:
//!
//! ```text
//! 3d602d80600a3d3981f3 | 363d3d373d3d3d363d73 | <target> | 5af43d82803e903d91602b57fd5bf3
//!       loader (10)    |            runtime code (45), target at offset 10
//! ```
//!
//! The loader copies the 45 bytes following it into memory and returns them, so the code left
//! at the clone address is the init code without its first 10 bytes.

use alloy_primitives::{Address, Bytes};

use crate::constants::minimal_proxy::{
    INIT_CODE_PREFIX, INIT_CODE_SIZE, INIT_CODE_SUFFIX, LOADER_SIZE, RUNTIME_CODE_SIZE,
    TARGET_OFFSET, TARGET_SIZE,
};

/// Generates the init code of a minimal proxy delegating to `target`.
///
/// The result is always [`INIT_CODE_SIZE`] bytes: `prefix ‖ target ‖ suffix`.
pub fn generate_minimal_proxy_init_code(target: Address) -> Bytes {
    let mut init_code = [0u8; INIT_CODE_SIZE];
    init_code[..TARGET_OFFSET].copy_from_slice(&INIT_CODE_PREFIX);
    init_code[TARGET_OFFSET..TARGET_OFFSET + TARGET_SIZE].copy_from_slice(target.as_slice());
    init_code[TARGET_OFFSET + TARGET_SIZE..].copy_from_slice(&INIT_CODE_SUFFIX);
    Bytes::copy_from_slice(&init_code)
}

/// Returns the runtime code a minimal proxy delegating to `target` leaves at its address.
pub fn minimal_proxy_runtime_code(target: Address) -> Bytes {
    generate_minimal_proxy_init_code(target).slice(LOADER_SIZE..)
}

/// Extracts the target address from minimal proxy code.
///
/// Both the init code and the runtime code are recognised. Returns `None` for any other code.
pub fn minimal_proxy_target(code: &[u8]) -> Option<Address> {
    let offset = match code.len() {
        INIT_CODE_SIZE => {
            if code[..TARGET_OFFSET] != INIT_CODE_PREFIX {
                return None;
            }
            TARGET_OFFSET
        }
        RUNTIME_CODE_SIZE => {
            if code[..TARGET_OFFSET - LOADER_SIZE] != INIT_CODE_PREFIX[LOADER_SIZE..] {
                return None;
            }
            TARGET_OFFSET - LOADER_SIZE
        }
        _ => return None,
    };

    let (target, suffix) = code[offset..].split_at(TARGET_SIZE);
    (suffix == INIT_CODE_SUFFIX).then(|| Address::from_slice(target))
}

/// Returns the code a creation with `init_code` deposits.
///
/// Loader-style init code (`RETURNDATASIZE PUSH1 len DUP1 PUSH1 10 RETURNDATASIZE CODECOPY DUP2
/// RETURN`) returns the `len` bytes following the loader. Any other init code is returned as is,
/// since there is no interpreter behind this.
pub fn deployed_code(init_code: &Bytes) -> Bytes {
    match &init_code[..] {
        [0x3d, 0x60, len, 0x80, 0x60, 0x0a, 0x3d, 0x39, 0x81, 0xf3, rest @ ..]
            if rest.len() >= *len as usize =>
        {
            init_code.slice(LOADER_SIZE..LOADER_SIZE + *len as usize)
        }
        _ => init_code.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes, hex};

    const TARGET: Address = address!("0xbebebebebebebebebebebebebebebebebebebebe");

    #[test]
    fn test_init_code_layout() {
        let init_code = generate_minimal_proxy_init_code(TARGET);
        assert_eq!(init_code.len(), 55);
        assert_eq!(
            init_code,
            bytes!(
                "3d602d80600a3d3981f3363d3d373d3d3d363d73bebebebebebebebebebebebebebebebebebebebe5af43d82803e903d91602b57fd5bf3"
            )
        );
    }

    #[test]
    fn test_init_code_lowercase_hex() {
        let target = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        let init_code = generate_minimal_proxy_init_code(target);
        let expected = [
            "3d602d80600a3d3981f3363d3d373d3d3d363d73",
            "5fbdb2315678afecb367f032d93f642f64180aa3",
            "5af43d82803e903d91602b57fd5bf3",
        ]
        .concat();
        assert_eq!(hex::encode(&init_code), expected);
    }

    #[test]
    fn test_zero_target_is_accepted() {
        let init_code = generate_minimal_proxy_init_code(Address::ZERO);
        assert_eq!(&init_code[20..40], &[0u8; 20]);
        assert_eq!(minimal_proxy_target(&init_code), Some(Address::ZERO));
    }

    #[test]
    fn test_runtime_code() {
        let runtime = minimal_proxy_runtime_code(TARGET);
        assert_eq!(
            runtime,
            bytes!(
                "363d3d373d3d3d363d73bebebebebebebebebebebebebebebebebebebebe5af43d82803e903d91602b57fd5bf3"
            )
        );
        assert_eq!(runtime.len(), RUNTIME_CODE_SIZE);
    }

    #[test]
    fn test_minimal_proxy_target() {
        assert_eq!(minimal_proxy_target(&generate_minimal_proxy_init_code(TARGET)), Some(TARGET));
        assert_eq!(minimal_proxy_target(&minimal_proxy_runtime_code(TARGET)), Some(TARGET));

        // Corrupted suffix.
        let mut code = minimal_proxy_runtime_code(TARGET).to_vec();
        *code.last_mut().unwrap() = 0x00;
        assert_eq!(minimal_proxy_target(&code), None);

        // Corrupted prefix.
        let mut code = generate_minimal_proxy_init_code(TARGET).to_vec();
        code[0] = 0x60;
        assert_eq!(minimal_proxy_target(&code), None);

        assert_eq!(minimal_proxy_target(&[]), None);
        assert_eq!(minimal_proxy_target(&hex!("6080604052")), None);
    }

    #[test]
    fn test_deployed_code() {
        let init_code = generate_minimal_proxy_init_code(TARGET);
        assert_eq!(deployed_code(&init_code), minimal_proxy_runtime_code(TARGET));

        // Loader asking for more bytes than available is kept verbatim.
        let short = bytes!("3d602d80600a3d3981f3363d");
        assert_eq!(deployed_code(&short), short);

        let other = bytes!("6080604052");
        assert_eq!(deployed_code(&other), other);
    }
}
