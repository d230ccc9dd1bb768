//! Unix timestamps for rate fetches and history entries

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// No system clock on wasm32-unknown-unknown
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_secs() -> u64 {
    0
}
