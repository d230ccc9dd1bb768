//! Exchange rate fetching (requires "fetch" feature)
//!
//! Gated behind the "fetch" feature to keep smartconvert-core
//! WASM-compatible by default.

use std::collections::HashMap;
use std::future::Future;

use serde::Deserialize;
use tracing::debug;

use crate::rates::{RateProvider, Rates, BASE_CURRENCY};

const ER_API_URL: &str = "https://open.er-api.com/v6/latest";

#[derive(Deserialize)]
struct FiatRatesResponse {
    rates: HashMap<String, f64>,
}

/// Fetch USD-based rates: "1 USD = X units" (e.g. EUR -> 0.92)
pub async fn fetch_rates() -> Result<Rates, String> {
    let url = format!("{ER_API_URL}/{BASE_CURRENCY}");
    debug!(%url, "fetching exchange rates");
    let response = reqwest::get(&url)
        .await
        .map_err(|e| format!("Failed to fetch exchange rates: {e}"))?;
    let data: FiatRatesResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse exchange rates: {e}"))?;
    Ok(data.rates)
}

/// [`RateProvider`] backed by open.er-api.com
#[derive(Debug, Clone, Copy, Default)]
pub struct ErApiProvider;

impl RateProvider for ErApiProvider {
    fn fetch_rates(&self) -> impl Future<Output = Result<Rates, String>> + Send {
        fetch_rates()
    }
}
