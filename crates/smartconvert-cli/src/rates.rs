//! Exchange-rate loading for the CLI: cache, then network, then defaults

use smartconvert_core::fetch::ErApiProvider;
use smartconvert_core::rates::{cache, RateBook, RateStatus};
use tracing::{info, warn};

/// Rate book for this run. `offline` skips the cache and the network.
pub fn load(offline: bool) -> RateBook {
    if offline {
        return RateBook::with_defaults();
    }
    if let Some(book) = cache::default_path().as_deref().and_then(cache::load) {
        info!("using cached exchange rates");
        return book;
    }
    fetch()
}

/// Fetch fresh rates, caching them on success and falling back to the
/// built-in table on failure
pub fn fetch() -> RateBook {
    let mut book = RateBook::new();
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(book.refresh(&ErApiProvider)),
        Err(e) => book.fail(format!("Failed to create runtime: {e}")),
    }

    match book.status() {
        RateStatus::Ready => {
            if let Some(path) = cache::default_path() {
                cache::save(&path, &book);
            }
            book
        }
        RateStatus::Failed(message) => {
            warn!(%message, "using built-in exchange rates");
            RateBook::with_defaults()
        }
        RateStatus::Pending => RateBook::with_defaults(),
    }
}
