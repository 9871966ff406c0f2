//! Error types shared by the quote engine, the gas price cache and the API boundary.

use alloy::primitives::Address;
use derive_more::Display;
use thiserror::Error;

/// The chain read that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChainOperation {
    /// Factory `getPair` lookup
    #[display("get_pair")]
    GetPair,
    /// Pool `getReserves` read
    #[display("get_reserves")]
    GetReserves,
    /// Node fee data read
    #[display("gas_price")]
    GasPrice,
}

/// Any failure talking to the blockchain node: transport, timeout, node error
/// or a response that could not be decoded.
#[derive(Debug, Clone, Error)]
#[error("chain read `{operation}` failed: {message}")]
pub struct ChainReadError {
    /// Which read failed
    pub operation: ChainOperation,
    /// Underlying failure detail
    pub message: String,
}

impl ChainReadError {
    /// Wraps any displayable failure as a chain read error.
    pub fn new(operation: ChainOperation, source: impl std::fmt::Display) -> Self {
        Self {
            operation,
            message: source.to_string(),
        }
    }
}

/// Failure of a single quote request.
#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    /// The factory has no pool for the requested tokens
    #[error("Pair does not exist")]
    PairNotFound {
        /// First token of the lookup
        token_a: Address,
        /// Second token of the lookup
        token_b: Address,
    },
    /// The tokens do not form a pair
    #[error(transparent)]
    InvalidPair(#[from] InvalidInputError),
    /// The node could not be read
    #[error(transparent)]
    ChainRead(#[from] ChainReadError),
}

/// Request rejected at the boundary before it reaches the quote engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// Not a 20 byte hex address
    #[error("Invalid {field}")]
    Address {
        /// Name of the offending parameter
        field: &'static str,
        /// The raw value received
        value: String,
    },
    /// Not a positive base-10 integer that fits in 256 bits
    #[error("Invalid amountIn")]
    Amount(String),
    /// Both sides of the swap name the same token
    #[error("fromTokenAddress and toTokenAddress must differ")]
    SameToken,
}
