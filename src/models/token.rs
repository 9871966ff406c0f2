use alloy::primitives::Address;
use std::str::FromStr;

use crate::error::InvalidInputError;

/// An on-chain asset, identified by its 20 byte contract address.
///
/// Alloy's `Address` orders by its big-endian bytes, which is the same order as
/// the lowercase `0x` hex strings compare in, and the same order the pool
/// contract uses to pick `token0`/`token1`.
pub type TokenAddress = Address;

/// Parses a token address the way the API receives it.
///
/// Any letter case is accepted and mixed-case input is not checksum-verified,
/// so `0xC02a...` and `0xc02a...` name the same token.
///
/// # Errors
/// * If `raw` is not `0x` followed by exactly 40 hex digits
pub fn parse_token_address(
    field: &'static str,
    raw: &str,
) -> Result<TokenAddress, InvalidInputError> {
    let invalid = || InvalidInputError::Address {
        field,
        value: raw.to_string(),
    };

    if !raw.starts_with("0x") {
        return Err(invalid());
    }
    Address::from_str(raw).map_err(|_| invalid())
}

/// Canonical lowercase hex form of a token address.
#[must_use]
pub fn canonical_hex(token: &TokenAddress) -> String {
    format!("{token:#x}")
}
