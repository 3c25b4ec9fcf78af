use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::types::ToastId;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Resolve the identity of a toast about to be shown.
///
/// Every call advances the process-wide counter, even when the caller
/// supplied its own id.
pub(crate) fn resolve(requested: Option<&ToastId>) -> ToastId {
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    match requested {
        Some(id) => id.clone(),
        None => ToastId::new(format!("toast-{}-{seq}", Utc::now().timestamp_millis())),
    }
}
