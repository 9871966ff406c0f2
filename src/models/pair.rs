use std::fmt::{self, Display};

use crate::error::InvalidInputError;
use crate::models::token::{canonical_hex, TokenAddress};

/// A Uniswap V2 style pair: the unordered combination of two distinct tokens.
///
/// The tokens are kept sorted, so `Pair::new(a, b) == Pair::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    /// The lower token address, `token0` of the pool
    token0: TokenAddress,
    /// The higher token address, `token1` of the pool
    token1: TokenAddress,
}

impl Pair {
    /// Create a new pair from two tokens in any order
    ///
    /// # Errors
    /// * If both tokens are the same
    pub fn new(token_a: TokenAddress, token_b: TokenAddress) -> Result<Self, InvalidInputError> {
        if token_a == token_b {
            return Err(InvalidInputError::SameToken);
        }
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Ok(Self { token0, token1 })
    }

    /// The token the pool reports as `token0`
    #[must_use]
    pub const fn token0(&self) -> TokenAddress {
        self.token0
    }

    /// The token the pool reports as `token1`
    #[must_use]
    pub const fn token1(&self) -> TokenAddress {
        self.token1
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", canonical_hex(&self.token0), canonical_hex(&self.token1))
    }
}
