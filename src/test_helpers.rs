#![allow(clippy::unwrap_used, dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::time::Instant;

use crate::chain::ChainReader;
use crate::error::{ChainOperation, ChainReadError};
use crate::models::{Pair, Reserves};

/// Scripted chain reader counting every call it receives.
#[derive(Default)]
pub struct MockChainReader {
    pairs: HashMap<Pair, Address>,
    reserves: HashMap<Address, Reserves>,
    fail_reads: Mutex<Option<ChainOperation>>,
    gas_prices: Mutex<VecDeque<Result<u128, ChainReadError>>>,
    gas_latency: Option<Duration>,
    clock_base: Option<Instant>,
    pub pair_calls: AtomicUsize,
    pub reserve_calls: AtomicUsize,
    pub gas_calls: AtomicUsize,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pool for `token_a`/`token_b` holding `(reserve0, reserve1)`.
    pub fn with_pool(
        mut self,
        token_a: Address,
        token_b: Address,
        pool: Address,
        reserve0: u128,
        reserve1: u128,
    ) -> Self {
        self.pairs.insert(Pair::new(token_a, token_b).unwrap(), pool);
        self.reserves.insert(pool, Reserves::from((reserve0, reserve1)));
        self
    }

    /// Makes every call of `operation` fail.
    pub fn failing(self, operation: ChainOperation) -> Self {
        *self.fail_reads.lock().unwrap() = Some(operation);
        self
    }

    /// Queues gas price answers; the last one repeats once the queue drains.
    pub fn with_gas_prices(self, prices: Vec<Result<u128, ChainReadError>>) -> Self {
        *self.gas_prices.lock().unwrap() = prices.into();
        self
    }

    /// Delays every gas price answer by `latency`.
    pub fn with_gas_latency(mut self, latency: Duration) -> Self {
        self.gas_latency = Some(latency);
        self
    }

    /// Answers gas price reads with the milliseconds elapsed since `base`.
    pub fn with_clock_prices(mut self, base: Instant) -> Self {
        self.clock_base = Some(base);
        self
    }

    pub fn gas_calls(&self) -> usize {
        self.gas_calls.load(Ordering::SeqCst)
    }

    fn check(&self, operation: ChainOperation) -> Result<(), ChainReadError> {
        if *self.fail_reads.lock().unwrap() == Some(operation) {
            return Err(chain_error(operation, "connection refused"));
        }
        Ok(())
    }
}

pub fn chain_error(operation: ChainOperation, message: &str) -> ChainReadError {
    ChainReadError::new(operation, message)
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn get_pair_address(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, ChainReadError> {
        self.pair_calls.fetch_add(1, Ordering::SeqCst);
        self.check(ChainOperation::GetPair)?;
        let pair = Pair::new(token_a, token_b).unwrap();
        Ok(self.pairs.get(&pair).copied().unwrap_or(Address::ZERO))
    }

    async fn get_reserves(&self, pool: Address) -> Result<Reserves, ChainReadError> {
        self.reserve_calls.fetch_add(1, Ordering::SeqCst);
        self.check(ChainOperation::GetReserves)?;
        Ok(self
            .reserves
            .get(&pool)
            .copied()
            .unwrap_or_else(|| Reserves::new(U256::ZERO, U256::ZERO)))
    }

    async fn get_gas_price(&self) -> Result<u128, ChainReadError> {
        self.gas_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.gas_latency {
            tokio::time::sleep(latency).await;
        }
        self.check(ChainOperation::GasPrice)?;
        if let Some(base) = self.clock_base {
            return Ok(Instant::now().duration_since(base).as_millis());
        }
        let mut queue = self.gas_prices.lock().unwrap();
        let answer = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        answer.unwrap_or_else(|| Err(chain_error(ChainOperation::GasPrice, "no gas price scripted")))
    }
}
