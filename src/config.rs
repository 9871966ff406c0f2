//! Configuration loaded from the environment (and a `.env` file, if present).

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use eyre::{eyre, Error, Result, WrapErr};

use crate::gas::GasCacheSettings;

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON-RPC endpoint of the node (`NODE_URL`)
    pub node_url: String,
    /// Uniswap V2 factory used for pair lookups (`UNISWAP_V2_FACTORY_ADDRESS`)
    pub factory_address: Address,
    /// Interface the HTTP server binds to (`HOST`)
    pub host: String,
    /// Port the HTTP server binds to (`PORT`), only needed to serve
    pub port: Option<u16>,
    /// Gas price cache timing (`GAS_REFRESH_INTERVAL_MS`, `GAS_STALENESS_MS`)
    pub gas: GasCacheSettings,
}

impl Config {
    /// Loads `.env` and reads the configuration from the process environment.
    ///
    /// # Errors
    /// * If a required variable is missing
    /// * If a variable cannot be parsed
    pub fn from_env() -> Result<Self, Error> {
        // a missing .env is fine, the variables may come from the real environment
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// * If a required variable is missing
    /// * If a variable cannot be parsed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let required = |key: &str| lookup(key).ok_or_else(|| eyre!("{key} must be set"));

        let defaults = GasCacheSettings::default();
        let millis = |key: &str, default: Duration| -> Result<Duration> {
            lookup(key).map_or(Ok(default), |raw| {
                raw.parse::<u64>()
                    .map(Duration::from_millis)
                    .wrap_err_with(|| format!("{key} must be a number of milliseconds, got {raw}"))
            })
        };

        let factory_raw = required("UNISWAP_V2_FACTORY_ADDRESS")?;
        let factory_address = Address::from_str(&factory_raw)
            .wrap_err_with(|| format!("UNISWAP_V2_FACTORY_ADDRESS is not an address: {factory_raw}"))?;

        let port = lookup("PORT")
            .map(|raw| {
                raw.parse::<u16>()
                    .wrap_err_with(|| format!("PORT must be a port number, got {raw}"))
            })
            .transpose()?;

        let refresh_interval = millis("GAS_REFRESH_INTERVAL_MS", defaults.refresh_interval)?;
        if refresh_interval.is_zero() {
            return Err(eyre!("GAS_REFRESH_INTERVAL_MS must be positive"));
        }

        Ok(Self {
            node_url: required("NODE_URL")?,
            factory_address,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            gas: GasCacheSettings {
                refresh_interval,
                staleness_threshold: millis("GAS_STALENESS_MS", defaults.staleness_threshold)?,
            },
        })
    }

    /// The socket address the HTTP server listens on
    ///
    /// # Errors
    /// * If `PORT` was not set
    /// * If `host` is not an IP address
    pub fn listen_addr(&self) -> Result<SocketAddr, Error> {
        let port = self.port.ok_or_else(|| eyre!("PORT must be set"))?;
        format!("{}:{port}", self.host)
            .parse()
            .wrap_err_with(|| format!("Invalid listen address {}:{port}", self.host))
    }
}
