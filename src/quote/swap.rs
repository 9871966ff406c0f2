//! A swap side is one of the two sides of a pool: `ZeroForOne` or `OneForZero`.
//! Used to orient the pool's reserves to the caller's `(from, to)` request.

use std::fmt::{self, Debug, Display};

use alloy::primitives::U256;

use crate::models::{Reserves, TokenAddress};

/// The direction of a swap in a liquidity pool.
///
/// The pool orders its tokens by address (`token0 < token1`); a swap either
/// goes from token0 to token1 or the other way round.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Direction {
    /// Swap from token0 to token1 in the pool
    ZeroForOne,
    /// Swap from token1 to token0 in the pool
    OneForZero,
}

impl Direction {
    /// Derives the direction of swapping `from` into `to` using the pool's own
    /// token ordering.
    #[must_use]
    pub fn of(from: TokenAddress, to: TokenAddress) -> Self {
        if from < to {
            Self::ZeroForOne
        } else {
            Self::OneForZero
        }
    }

    /// Splits the pool's reserves into `(reserve_in, reserve_out)` for this direction.
    #[must_use]
    pub const fn orient(self, reserves: &Reserves) -> (U256, U256) {
        match self {
            Self::ZeroForOne => (reserves.reserve0, reserves.reserve1),
            Self::OneForZero => (reserves.reserve1, reserves.reserve0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "0>1"),
            Self::OneForZero => write!(f, "1>0"),
        }
    }
}
