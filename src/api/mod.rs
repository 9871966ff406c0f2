//! # API Module
//!
//! HTTP boundary in front of the quote engine and the gas price cache.
//! Requests are validated here; nothing malformed reaches the core.
//!
//! - `GET /v1/gasPrice`
//! - `GET /v1/return/:fromTokenAddress/:toTokenAddress/:amountIn`

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use eyre::{Error, Result, WrapErr};
use serde::Serialize;
use thiserror::Error;

use crate::error::{InvalidInputError, QuoteError};
use crate::gas::GasPriceCache;
use crate::quote::QuoteEngine;

/// Request validation
pub mod validate;

pub use validate::{validate_quote_request, QuoteRequest};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Quote engine
    pub quotes: QuoteEngine,
    /// Gas price cache
    pub gas: Arc<GasPriceCache>,
}

/// Body of `GET /v1/gasPrice`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GasPriceResponse {
    /// Gas price in wei, `null` if it could never be read
    #[serde(rename = "gasPrice")]
    pub gas_price: Option<String>,
}

/// Body of `GET /v1/return/...`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReturnAmountResponse {
    /// Output amount in base units of the bought token
    #[serde(rename = "amountOut")]
    pub amount_out: String,
}

/// Body of every error response
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Human readable reason
    error: String,
}

/// A failed API request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before reaching the core
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    /// The quote itself failed
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl ApiError {
    /// HTTP status for this failure
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Quote(QuoteError::InvalidPair(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Quote(QuoteError::PairNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Quote(QuoteError::ChainRead(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("api: {self}");
        } else {
            log::debug!("api: {self}");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Builds the versioned router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/gasPrice", get(gas_price))
        .route(
            "/v1/return/:from_token/:to_token/:amount_in",
            get(return_amount),
        )
        .with_state(state)
}

/// `GET /v1/gasPrice`
pub async fn gas_price(State(state): State<AppState>) -> Json<GasPriceResponse> {
    Json(GasPriceResponse {
        gas_price: state.gas.read_gas_price().await,
    })
}

/// `GET /v1/return/:fromTokenAddress/:toTokenAddress/:amountIn`
///
/// # Errors
/// * 400 for malformed input, 404 for a missing pair, 502 when the node fails
pub async fn return_amount(
    State(state): State<AppState>,
    Path((from_token, to_token, amount_in)): Path<(String, String, String)>,
) -> Result<Json<ReturnAmountResponse>, ApiError> {
    let request = validate_quote_request(&from_token, &to_token, &amount_in)?;
    let amount_out = state
        .quotes
        .compute_output_amount(request.from_token, request.to_token, request.amount_in)
        .await?;
    Ok(Json(ReturnAmountResponse {
        amount_out: amount_out.to_string(),
    }))
}

/// Serves the API on `addr` until `shutdown` resolves.
///
/// # Errors
/// * If the address cannot be bound
/// * If the server fails while running
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Error> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    log::info!("api: Listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .wrap_err("API server failed")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ChainOperation;
    use crate::test_helpers::MockChainReader;
    use alloy::primitives::{address, Address};
    use std::time::Duration;

    const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    const CGT: Address = address!("0xe2bdE374DA060F2aaC31a8261DB395b3CFda8f66");
    const POOL: Address = address!("0x00000000000000000000000000000000000000b0");

    fn state(reader: MockChainReader) -> AppState {
        let reader = Arc::new(reader);
        AppState {
            quotes: QuoteEngine::new(reader.clone()),
            gas: Arc::new(GasPriceCache::new(reader, Duration::from_secs(5))),
        }
    }

    fn path(from: &str, to: &str, amount: &str) -> Path<(String, String, String)> {
        Path((from.to_string(), to.to_string(), amount.to_string()))
    }

    /// Serves `router(state)` on a loopback port and issues one `GET uri`.
    async fn request_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {uri} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        server.abort();

        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        let code: u16 = head.split_whitespace().nth(1).unwrap().parse().unwrap();
        (
            StatusCode::from_u16(code).unwrap(),
            serde_json::from_str(body).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_return_amount() {
        let state = state(MockChainReader::new().with_pool(WETH, CGT, POOL, 1000, 1000));
        let Json(body) = return_amount(
            State(state),
            path(
                "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                "0xe2bde374da060f2aac31a8261db395b3cfda8f66",
                "100",
            ),
        )
        .await
        .unwrap();
        assert_eq!(body.amount_out, "90");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "amountOut": "90" })
        );
    }

    #[tokio::test]
    async fn test_return_amount_errors() {
        let cases = [
            (
                MockChainReader::new(),
                ("0xTokenA", "0xe2bde374da060f2aac31a8261db395b3cfda8f66", "100"),
                StatusCode::BAD_REQUEST,
                "Invalid fromTokenAddress",
            ),
            (
                MockChainReader::new(),
                ("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "0xe2bde374da060f2aac31a8261db395b3cfda8f66", "0"),
                StatusCode::BAD_REQUEST,
                "Invalid amountIn",
            ),
            (
                MockChainReader::new(),
                ("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "0xe2bde374da060f2aac31a8261db395b3cfda8f66", "100"),
                StatusCode::NOT_FOUND,
                "Pair does not exist",
            ),
            (
                MockChainReader::new()
                    .with_pool(WETH, CGT, POOL, 1000, 1000)
                    .failing(ChainOperation::GetReserves),
                ("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "0xe2bde374da060f2aac31a8261db395b3cfda8f66", "100"),
                StatusCode::BAD_GATEWAY,
                "chain read `get_reserves` failed: connection refused",
            ),
        ];

        for (reader, (from, to, amount), status, message) in cases {
            let err = return_amount(State(state(reader)), path(from, to, amount))
                .await
                .unwrap_err();
            assert_eq!(err.status(), status);
            assert_eq!(err.to_string(), message);
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_routes() {
        let ok = || {
            state(
                MockChainReader::new()
                    .with_pool(WETH, CGT, POOL, 1000, 1000)
                    .with_gas_prices(vec![Ok(20_000_000_000)]),
            )
        };
        let weth = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
        let cgt = "0xe2bde374da060f2aac31a8261db395b3cfda8f66";

        let (status, body) = request_json(ok(), &format!("/v1/return/{weth}/{cgt}/100")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "amountOut": "90" }));

        let (status, body) = request_json(ok(), "/v1/gasPrice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "gasPrice": "20000000000" }));

        let (status, body) = request_json(ok(), &format!("/v1/return/0xTokenA/{cgt}/100")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Invalid fromTokenAddress" }));

        let (status, body) = request_json(ok(), &format!("/v1/return/{weth}/{weth}/100")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) =
            request_json(state(MockChainReader::new()), &format!("/v1/return/{weth}/{cgt}/100")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Pair does not exist" }));

        let failing = MockChainReader::new()
            .with_pool(WETH, CGT, POOL, 1000, 1000)
            .failing(ChainOperation::GetReserves);
        let (status, body) = request_json(state(failing), &format!("/v1/return/{weth}/{cgt}/100")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            serde_json::json!({ "error": "chain read `get_reserves` failed: connection refused" })
        );

        let (status, body) = request_json(
            state(MockChainReader::new().failing(ChainOperation::GasPrice)),
            "/v1/gasPrice",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "gasPrice": null }));
    }

    #[tokio::test]
    async fn test_gas_price() {
        let Json(body) = gas_price(State(state(
            MockChainReader::new().with_gas_prices(vec![Ok(20_000_000_000)]),
        )))
        .await;
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "gasPrice": "20000000000" })
        );
    }

    #[tokio::test]
    async fn test_gas_price_unavailable() {
        let Json(body) = gas_price(State(state(
            MockChainReader::new().failing(ChainOperation::GasPrice),
        )))
        .await;
        assert_eq!(body, GasPriceResponse { gas_price: None });
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "gasPrice": null })
        );
    }
}
