//! Optional metrics instrumentation.
//!
//! When the `observe` feature is enabled, store and memoizer operations emit
//! counters and histograms via the [`metrics`] crate. A downstream
//! application must install a metrics recorder to collect the data.
//!
//! Without the feature every function here is a no-op.

/// Record a point lookup.
///
/// - `cachedb.lookups_total` – counter with `result` label (`hit` / `miss`)
#[inline]
pub fn record_lookup(hit: bool) {
    #[cfg(feature = "observe")]
    {
        let result = if hit { "hit" } else { "miss" };
        metrics::counter!("cachedb.lookups_total", "result" => result).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = hit;
    }
}

/// Record an upsert (counter + latency histogram).
///
/// - `cachedb.writes_total`
/// - `cachedb.write_duration_seconds`
#[inline]
pub fn record_write(duration: std::time::Duration) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("cachedb.writes_total").increment(1);
        metrics::histogram!("cachedb.write_duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = duration;
    }
}

/// Record the number of rows removed by an expiry purge.
///
/// - `cachedb.purged_entries_total`
#[inline]
pub fn record_purge(removed: u64) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("cachedb.purged_entries_total").increment(removed);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = removed;
    }
}

/// Record a memoized call.
///
/// - `cachedb.memo_calls_total` – counter with `function` and `result` labels
#[inline]
pub fn record_memo_call(function: &str, hit: bool) {
    #[cfg(feature = "observe")]
    {
        let result = if hit { "hit" } else { "miss" };
        metrics::counter!(
            "cachedb.memo_calls_total",
            "function" => function.to_string(),
            "result" => result
        )
        .increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (function, hit);
    }
}
