use alloy::primitives::U256;

use crate::error::InvalidInputError;
use crate::models::token::parse_token_address;
use crate::models::TokenAddress;

/// A quote request that passed boundary validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Token sold
    pub from_token: TokenAddress,
    /// Token bought
    pub to_token: TokenAddress,
    /// Amount sold, in base units of `from_token`, always positive
    pub amount_in: U256,
}

/// Validates the raw path parameters of a quote request.
///
/// # Errors
/// * If either address is malformed
/// * If both addresses name the same token
/// * If the amount is not a positive base-10 integer below `2^256`
pub fn validate_quote_request(
    from_token: &str,
    to_token: &str,
    amount_in: &str,
) -> Result<QuoteRequest, InvalidInputError> {
    let from_token = parse_token_address("fromTokenAddress", from_token)?;
    let to_token = parse_token_address("toTokenAddress", to_token)?;
    let amount_in = parse_amount(amount_in)?;

    if from_token == to_token {
        return Err(InvalidInputError::SameToken);
    }

    Ok(QuoteRequest {
        from_token,
        to_token,
        amount_in,
    })
}

/// Parses a strictly positive amount of base units.
///
/// # Errors
/// * If `raw` is empty, has anything but ASCII digits, is zero, or overflows 256 bits
pub fn parse_amount(raw: &str) -> Result<U256, InvalidInputError> {
    let invalid = || InvalidInputError::Amount(raw.to_string());

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let amount = U256::from_str_radix(raw, 10).map_err(|_| invalid())?;
    if amount.is_zero() {
        return Err(invalid());
    }
    Ok(amount)
}
