use alloy::{
    network::Ethereum,
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    sol,
};
use async_trait::async_trait;
use eyre::{Error, Result};
use url::Url;

use super::ChainReader;
use crate::error::{ChainOperation, ChainReadError};
use crate::models::Reserves;

sol!(
    #[sol(rpc)]
    interface IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }
);

sol!(
    #[sol(rpc)]
    interface IUniswapV2Pair {
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }
);

/// Chain reader talking JSON-RPC to a single node over HTTP.
#[derive(Clone)]
pub struct AlloyChainReader {
    /// Node connection
    provider: RootProvider<Ethereum>,
    /// The Uniswap V2 factory used for pair lookups
    factory: Address,
}

impl AlloyChainReader {
    /// Creates a reader for the node at `node_url`, resolving pairs through `factory`.
    ///
    /// # Errors
    /// * If `node_url` is not a valid URL
    pub fn new(node_url: &str, factory: Address) -> Result<Self, Error> {
        let url = Url::parse(node_url)
            .map_err(|e| Error::msg(format!("Invalid node url {node_url}: {e}")))?;
        let provider = ProviderBuilder::new().on_http(url);
        Ok(Self::with_provider((*provider.root()).clone(), factory))
    }

    /// Wraps an existing provider.
    #[must_use]
    pub const fn with_provider(provider: RootProvider<Ethereum>, factory: Address) -> Self {
        Self { provider, factory }
    }

    /// The factory this reader resolves pairs through
    #[must_use]
    pub const fn factory(&self) -> Address {
        self.factory
    }
}

#[async_trait]
impl ChainReader for AlloyChainReader {
    async fn get_pair_address(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, ChainReadError> {
        let factory = IUniswapV2Factory::new(self.factory, self.provider.clone());
        let pair = factory
            .getPair(token_a, token_b)
            .call()
            .await
            .map_err(|e| ChainReadError::new(ChainOperation::GetPair, e))?
            .pair;
        Ok(pair)
    }

    async fn get_reserves(&self, pool: Address) -> Result<Reserves, ChainReadError> {
        let pair = IUniswapV2Pair::new(pool, self.provider.clone());
        let reserves = pair
            .getReserves()
            .call()
            .await
            .map_err(|e| ChainReadError::new(ChainOperation::GetReserves, e))?;

        // uint112 always fits in a u128
        Ok(Reserves {
            reserve0: U256::from(reserves.reserve0.to::<u128>()),
            reserve1: U256::from(reserves.reserve1.to::<u128>()),
            block_timestamp_last: reserves.blockTimestampLast,
        })
    }

    async fn get_gas_price(&self) -> Result<u128, ChainReadError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ChainReadError::new(ChainOperation::GasPrice, e))
    }
}
