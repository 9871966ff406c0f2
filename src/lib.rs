/*!
 * # Swapquote - Constant-Product Swap Quotes and Gas Prices
 *
 * Swapquote quotes swap output amounts for Uniswap V2 style pairs straight
 * from on-chain reserves, and serves a periodically refreshed network gas price.
 *
 * ## Core Features
 *
 * - **Swap Quotes**: Resolves the pair through the factory, reads fresh reserves and
 *   applies the `x * y = k` formula with the 0.3% input fee in exact integer math
 * - **Gas Price Cache**: Keeps the latest gas price in memory, refreshed in the
 *   background and on demand when a read finds it stale
 * - **HTTP API**: Versioned endpoints for both, with input validation
 *
 * ## Module Structure
 *
 * - `api`: HTTP boundary and request validation
 * - `chain`: Read access to the blockchain node
 * - `config`: Configuration management for the service
 * - `error`: Error types
 * - `gas`: Gas price cache and its background refresher
 * - `models`: Tokens, pairs and reserves
 * - `quote`: Constant-product quote engine
 * - `utils`: Utility functions and helpers
 */

/// HTTP boundary and request validation
pub mod api;
/// Read access to the blockchain node
pub mod chain;
/// Configuration management for the service
pub mod config;
/// Error types
pub mod error;
/// Gas price cache
pub mod gas;
/// Data models for the application
pub mod models;
/// Constant-product quote engine
pub mod quote;
/// Utility functions and helpers
pub mod utils;

/// Test helpers and utilities
#[cfg(test)]
mod test_helpers;
