//! Constant-product (`x * y = k`) output amount with a 0.3% input fee.

use alloy::primitives::U256;
use num_bigint::BigUint;

/// Numerator of the fee factor applied to the input leg (0.3% fee)
pub const FEE_NUMERATOR: u32 = 997;
/// Denominator of the fee factor
pub const FEE_DENOMINATOR: u32 = 1000;

/// Output amount for swapping `amount_in` into a pool holding `reserve_in` of
/// the input token and `reserve_out` of the output token.
///
/// ```text
/// amount_in_with_fee = amount_in * 997
/// numerator          = amount_in_with_fee * reserve_out
/// denominator        = reserve_in * 1000 + amount_in_with_fee
/// amount_out         = floor(numerator / denominator)
/// ```
///
/// Intermediates are unbounded integers: `amount_in * 997 * reserve_out` can
/// exceed 512 bits for 256-bit inputs. The result is always below
/// `reserve_out` so it fits back into a `U256`. A zero denominator (empty pool
/// and zero input) yields zero.
#[must_use]
pub fn get_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> U256 {
    let amount_in_with_fee = to_big(amount_in) * FEE_NUMERATOR;
    let numerator = &amount_in_with_fee * to_big(reserve_out);
    let denominator = to_big(reserve_in) * FEE_DENOMINATOR + amount_in_with_fee;

    if denominator.bits() == 0 {
        return U256::ZERO;
    }
    from_big(&(numerator / denominator))
}

/// Widens a `U256` into an unbounded integer
fn to_big(value: U256) -> BigUint {
    BigUint::from_bytes_le(&value.to_le_bytes::<32>())
}

/// Narrows an unbounded integer known to be below `2^256`
fn from_big(value: &BigUint) -> U256 {
    U256::try_from_le_slice(&value.to_bytes_le()).unwrap_or(U256::MAX)
}
