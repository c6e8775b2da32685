//! Fee oracle client.
//!
//! # Responsibilities
//! - Fetch the current recommended gas prices from the pricing service
//! - Parse the `denom → decimal price` map and reject malformed payloads
//! - Require the configured fee denomination to be present
//!
//! The result is consumed once at ledger-client construction. There is no
//! refresh policy: the runner is a short-lived script, and a long-running
//! process would need to re-fetch.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Current gas prices per denomination, as fetched from the pricing service.
#[derive(Debug, Clone, PartialEq)]
pub struct GasPrices {
    prices: BTreeMap<String, f64>,
}

impl GasPrices {
    /// Build a pricing table directly. Mainly useful for tests and for
    /// ledgers with statically configured pricing.
    pub fn new(prices: BTreeMap<String, f64>) -> Self {
        Self { prices }
    }

    /// Price of one gas unit in the given denomination, if listed.
    pub fn price(&self, denom: &str) -> Option<f64> {
        self.prices.get(denom).copied()
    }
}

/// Client for the HTTP gas-price service.
pub struct FeeOracleClient {
    http: reqwest::Client,
    url: String,
}

impl FeeOracleClient {
    /// Create a client for the given pricing endpoint.
    pub fn new(url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Perform one network read of the current prices.
    ///
    /// Fails with a network error on transport failure, a non-2xx
    /// response, a payload that is not a `denom → decimal string` map, or
    /// a payload missing `required_denom`.
    pub async fn current_prices(&self, required_denom: &str) -> Result<GasPrices> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("fee oracle unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "fee oracle returned {} for {}",
                status, self.url
            )));
        }

        let raw: BTreeMap<String, String> = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("malformed fee oracle payload: {}", e)))?;

        let mut prices = BTreeMap::new();
        for (denom, price) in raw {
            let parsed: f64 = price.parse().map_err(|_| {
                Error::Network(format!(
                    "fee oracle returned non-decimal price '{}' for {}",
                    price, denom
                ))
            })?;
            prices.insert(denom, parsed);
        }

        if !prices.contains_key(required_denom) {
            return Err(Error::Network(format!(
                "fee oracle payload is missing the '{}' denomination",
                required_denom
            )));
        }

        tracing::info!(
            denoms = prices.len(),
            fee_denom = %required_denom,
            "gas prices fetched"
        );
        Ok(GasPrices { prices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_lookup() {
        let mut table = BTreeMap::new();
        table.insert("uluna".to_string(), 0.01133);
        table.insert("uusd".to_string(), 0.15);
        let prices = GasPrices::new(table);

        assert_eq!(prices.price("uluna"), Some(0.01133));
        assert_eq!(prices.price("ukrw"), None);
    }
}
