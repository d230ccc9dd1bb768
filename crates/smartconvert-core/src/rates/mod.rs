//! Exchange-rate state for currency conversion
//!
//! Rates arrive from an external provider as `code -> units per USD`.
//! [`RateBook`] tracks the single outstanding fetch as
//! pending / ready / failed, and a resolved mapping is only ever replaced
//! as a whole.

#[cfg(not(target_arch = "wasm32"))]
pub mod cache;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clock::now_secs;
use crate::convert::Conversion;
use crate::error::CalcError;

/// Currency every rate is expressed against
pub const BASE_CURRENCY: &str = "USD";

/// Raw rates as returned by a provider: "1 USD = X units"
pub type Rates = HashMap<String, f64>;

/// Source of exchange rates, fetched once per session
pub trait RateProvider {
    fn fetch_rates(&self) -> impl Future<Output = Result<Rates, String>> + Send;
}

/// Provider serving a fixed table (offline mode and tests)
#[derive(Debug, Clone, Default)]
pub struct StaticRates(pub Rates);

impl RateProvider for StaticRates {
    fn fetch_rates(&self) -> impl Future<Output = Result<Rates, String>> + Send {
        let rates = self.0.clone();
        async move { Ok(rates) }
    }
}

/// Observable state of the rate fetch
#[derive(Debug, Clone, PartialEq)]
pub enum RateStatus {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
enum State {
    Pending,
    Ready {
        rates: Arc<Rates>,
        /// Unix timestamp of the fetch
        fetched_at: u64,
    },
    Failed(String),
}

/// Most recently resolved exchange rates
#[derive(Debug, Clone)]
pub struct RateBook {
    state: State,
}

impl RateBook {
    /// A book waiting for its first fetch
    pub fn new() -> Self {
        Self {
            state: State::Pending,
        }
    }

    /// A book resolved with the given rates
    pub fn with_rates(rates: Rates) -> Self {
        let mut book = Self::new();
        book.resolve(rates);
        book
    }

    /// A book resolved with built-in approximate rates (offline fallback)
    pub fn with_defaults() -> Self {
        Self::with_rates(default_rates())
    }

    pub fn status(&self) -> RateStatus {
        match &self.state {
            State::Pending => RateStatus::Pending,
            State::Ready { .. } => RateStatus::Ready,
            State::Failed(msg) => RateStatus::Failed(msg.clone()),
        }
    }

    /// Unix timestamp of the last successful fetch
    pub fn fetched_at(&self) -> Option<u64> {
        match &self.state {
            State::Ready { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }

    /// Replace all rates at once. The base currency is injected when the
    /// provider leaves it out.
    pub fn resolve(&mut self, rates: Rates) {
        self.resolve_at(rates, now_secs());
    }

    pub(crate) fn resolve_at(&mut self, mut rates: Rates, fetched_at: u64) {
        rates.entry(BASE_CURRENCY.to_string()).or_insert(1.0);
        info!(count = rates.len(), "exchange rates loaded");
        self.state = State::Ready {
            rates: Arc::new(rates),
            fetched_at,
        };
    }

    /// Mark the fetch as failed; previously loaded rates are dropped
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "exchange rate fetch failed");
        self.state = State::Failed(message);
    }

    /// Apply the outcome of a fetch
    pub fn apply(&mut self, result: Result<Rates, String>) {
        match result {
            Ok(rates) => self.resolve(rates),
            Err(e) => self.fail(e),
        }
    }

    /// Start a fresh fetch, overwriting whatever state came before
    pub async fn refresh<P: RateProvider>(&mut self, provider: &P) {
        self.state = State::Pending;
        let result = provider.fetch_rates().await;
        self.apply(result);
    }

    /// Snapshot of the raw rates, if resolved
    pub fn rates(&self) -> Option<Arc<Rates>> {
        match &self.state {
            State::Ready { rates, .. } => Some(Arc::clone(rates)),
            _ => None,
        }
    }

    /// Rate of a currency relative to the base
    pub fn rate(&self, code: &str) -> Option<f64> {
        match &self.state {
            State::Ready { rates, .. } => rates.get(code).copied(),
            _ => None,
        }
    }

    /// Convert an amount: `value * (to_rate / from_rate)`.
    ///
    /// While pending the result is [`Conversion::Loading`]; after a failed
    /// fetch, or when either currency has no rate, it is
    /// [`Conversion::RatesUnavailable`]. A zero source rate is a domain
    /// error.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<Conversion, CalcError> {
        let rates = match &self.state {
            State::Pending => return Ok(Conversion::Loading),
            State::Failed(_) => return Ok(Conversion::RatesUnavailable),
            State::Ready { rates, .. } => rates,
        };
        if from == to {
            return Ok(Conversion::Value(value));
        }

        let (Some(from_rate), Some(to_rate)) = (rates.get(from), rates.get(to)) else {
            warn!(from, to, "exchange rate unavailable");
            return Ok(Conversion::RatesUnavailable);
        };
        if *from_rate == 0.0 {
            warn!(currency = from, "exchange rate is zero");
            return Err(CalcError::Domain(format!(
                "Exchange rate for {from} cannot be zero"
            )));
        }

        let result = value * (to_rate / from_rate);
        debug!(value, from, to, result, "currency conversion");
        Ok(Conversion::Value(result))
    }

    /// Human-readable rate line, e.g. "1 USD = 0.9200 EUR"
    pub fn rate_info(&self, from: &str, to: &str) -> Option<String> {
        if from == to {
            return None;
        }
        let from_rate = self.rate(from).filter(|r| *r != 0.0)?;
        let to_rate = self.rate(to)?;
        Some(format!("1 {from} = {:.4} {to}", to_rate / from_rate))
    }
}

impl Default for RateBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Approximate rates used when no fetch has succeeded and no cache exists
pub fn default_rates() -> Rates {
    [
        ("USD", 1.0),
        ("EUR", 0.92),
        ("GBP", 0.79),
        ("JPY", 157.0),
        ("CAD", 1.37),
        ("AUD", 1.50),
        ("INR", 83.50),
        ("CHF", 0.88),
        ("CNY", 7.25),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}
