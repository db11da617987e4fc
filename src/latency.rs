//! Simulated provider latency with cancellation.
//!
//! [`spawn_delayed_search`] runs a [`SearchProvider`] call on the tokio
//! runtime after a fixed delay and hands back a [`PendingSearch`]. The
//! owner either awaits it with [`PendingSearch::finish`] or lets it go:
//! cancelling or dropping the handle aborts the task, so a torn-down screen
//! never leaves a timer running.

use anyhow::{anyhow, bail, Result};
use platebook_core::models::Restaurant;
use platebook_core::search::SearchProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// A single-shot search that resolves after its delay.
pub struct PendingSearch {
    query: String,
    handle: Option<JoinHandle<Result<Vec<Restaurant>>>>,
}

/// Start `provider.search(query, limit)` once `delay` has elapsed.
///
/// Must be called from within a tokio runtime.
pub fn spawn_delayed_search(
    provider: Arc<dyn SearchProvider>,
    query: impl Into<String>,
    limit: usize,
    delay: Duration,
) -> PendingSearch {
    let query = query.into();
    let task_query = query.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        debug!(provider = provider.name(), query = %task_query, "delayed search firing");
        provider.search(&task_query, limit).await
    });
    PendingSearch {
        query,
        handle: Some(handle),
    }
}

impl PendingSearch {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Handle that cancels the task without consuming `self`.
    pub fn abort_handle(&self) -> Option<AbortHandle> {
        self.handle.as_ref().map(|h| h.abort_handle())
    }

    /// Wait for the results. Errors if the task was cancelled or the
    /// provider failed.
    pub async fn finish(mut self) -> Result<Vec<Restaurant>> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| anyhow!("search for '{}' already consumed", self.query))?;
        match handle.await {
            Ok(results) => results,
            Err(e) if e.is_cancelled() => bail!("search for '{}' was cancelled", self.query),
            Err(e) => Err(anyhow!("search task for '{}' failed: {}", self.query, e)),
        }
    }

    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(h) = self.handle.take() {
            if !h.is_finished() {
                debug!(query = %self.query, "cancelling pending search");
            }
            h.abort();
        }
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use platebook_core::models::{Category, PriceTier};
    use platebook_core::search::FixtureSearchProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Restaurant>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn fixture() -> Arc<dyn SearchProvider> {
        let mut r = Restaurant::new("Tartine Bakery", Category::Cafe, PriceTier::Moderate);
        r.tags = vec!["bakery".into()];
        Arc::new(FixtureSearchProvider::new(vec![r]))
    }

    #[tokio::test]
    async fn test_finish_returns_results_after_delay() {
        let started = tokio::time::Instant::now();
        let pending = spawn_delayed_search(fixture(), "bakery", 5, Duration::from_millis(20));
        assert_eq!(pending.query(), "bakery");
        let results = pending.finish().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Tartine Bakery");
    }

    #[tokio::test]
    async fn test_drop_cancels_before_firing() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let pending = spawn_delayed_search(
            provider.clone(),
            "anything",
            5,
            Duration::from_millis(30),
        );
        drop(pending);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_aborted_search_reports_cancellation() {
        let pending = spawn_delayed_search(fixture(), "bakery", 5, Duration::from_secs(30));
        pending.abort_handle().unwrap().abort();
        let err = pending.finish().await.unwrap_err();
        assert!(err.to_string().contains("cancelled"));
    }

    #[tokio::test]
    async fn test_cancel_consumes_handle() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let pending = spawn_delayed_search(provider.clone(), "q", 5, Duration::from_millis(10));
        pending.cancel();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
