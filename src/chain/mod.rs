//! # Chain Module
//!
//! The read-only view of the blockchain node that the quote engine and the gas
//! price cache depend on. Every call here is a suspension point and the only
//! place a [`ChainReadError`] can originate.

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::error::ChainReadError;
use crate::models::Reserves;

/// Alloy provider backed reader
pub mod provider;

pub use provider::AlloyChainReader;

/// Read access to the node, bound to a single AMM factory.
///
/// Implementations do no retrying of their own; timeouts and transport
/// failures surface as [`ChainReadError`].
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Looks up the pool for two tokens through the factory's `getPair`.
    ///
    /// Returns [`Address::ZERO`] when the factory has no such pool.
    ///
    /// # Errors
    /// * If the node cannot be reached or the response cannot be decoded
    async fn get_pair_address(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, ChainReadError>;

    /// Reads the pool's current `(reserve0, reserve1, blockTimestampLast)`.
    ///
    /// # Errors
    /// * If the node cannot be reached or the response cannot be decoded
    async fn get_reserves(&self, pool: Address) -> Result<Reserves, ChainReadError>;

    /// Reads the node's current gas price, in wei.
    ///
    /// # Errors
    /// * If the node cannot be reached or returns no gas price
    async fn get_gas_price(&self) -> Result<u128, ChainReadError>;
}
