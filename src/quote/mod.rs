//! # Quote Module
//!
//! Quotes the output of a single swap through a Uniswap V2 style pool.
//! Nothing is cached: every quote resolves the pool and reads fresh reserves.

use std::sync::Arc;

use alloy::primitives::{Address, U256};

use crate::chain::ChainReader;
use crate::error::QuoteError;
use crate::models::{Pair, TokenAddress};

/// Constant-product math
pub mod math;
/// Swap direction within a pool
pub mod swap;

pub use math::get_amount_out;
pub use swap::Direction;

/// Computes swap output amounts from live pool reserves.
#[derive(Clone)]
pub struct QuoteEngine {
    /// Node access
    reader: Arc<dyn ChainReader>,
}

impl QuoteEngine {
    /// Creates a quote engine reading through `reader`.
    pub fn new(reader: Arc<dyn ChainReader>) -> Self {
        Self { reader }
    }

    /// Output amount, in base units of `to_token`, for swapping `amount_in`
    /// base units of `from_token` through the pair's pool.
    ///
    /// Tokens and amount are expected to be validated already. A single read
    /// failure fails the quote; there is no retry.
    ///
    /// # Errors
    /// * `QuoteError::InvalidPair` if both tokens are the same
    /// * `QuoteError::PairNotFound` if the factory has no pool for the tokens
    /// * `QuoteError::ChainRead` if any node read fails
    pub async fn compute_output_amount(
        &self,
        from_token: TokenAddress,
        to_token: TokenAddress,
        amount_in: U256,
    ) -> Result<U256, QuoteError> {
        let pair = Pair::new(from_token, to_token)?;
        let pool = self
            .reader
            .get_pair_address(pair.token0(), pair.token1())
            .await?;
        if pool == Address::ZERO {
            log::debug!("quote: no pool for {pair}");
            return Err(QuoteError::PairNotFound {
                token_a: from_token,
                token_b: to_token,
            });
        }

        let reserves = self.reader.get_reserves(pool).await?;
        let direction = Direction::of(from_token, to_token);
        let (reserve_in, reserve_out) = direction.orient(&reserves);
        let amount_out = get_amount_out(amount_in, reserve_in, reserve_out);

        log::debug!(
            "quote: pool {pool:#x} {direction} reserves {reserve_in}/{reserve_out}, {amount_in} in -> {amount_out} out"
        );
        Ok(amount_out)
    }
}
