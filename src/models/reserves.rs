use alloy::primitives::U256;

/// Reserves information, as returned by the pool's `getReserves`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    /// Reserve of `token0`
    pub reserve0: U256,
    /// Reserve of `token1`
    pub reserve1: U256,
    /// Block timestamp of the last reserve update, reported by the pool
    pub block_timestamp_last: u32,
}

impl Reserves {
    /// Create a reserves snapshot with no update timestamp
    #[must_use]
    pub const fn new(reserve0: U256, reserve1: U256) -> Self {
        Self {
            reserve0,
            reserve1,
            block_timestamp_last: 0,
        }
    }
}

impl From<(u128, u128)> for Reserves {
    fn from((reserve0, reserve1): (u128, u128)) -> Self {
        Self::new(U256::from(reserve0), U256::from(reserve1))
    }
}
