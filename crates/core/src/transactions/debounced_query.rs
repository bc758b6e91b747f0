//! Debounced re-querying for interactive filter inputs.
//!
//! Every call to [`DebouncedQuery::submit`] supersedes the previous one. A
//! superseded call stops waiting (or stops its in-flight query) and yields
//! `None`, so only the latest submission ever delivers a result. The query
//! engine itself stays stateless; all cancellation lives here.

use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use tokio::sync::watch;

/// Latest-wins wrapper around queries producing `T`.
pub struct DebouncedQuery<T> {
    quiet_period: Duration,
    generation: watch::Sender<u64>,
    _output: PhantomData<fn() -> T>,
}

impl<T> DebouncedQuery<T> {
    pub fn new(quiet_period: Duration) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            quiet_period,
            generation,
            _output: PhantomData,
        }
    }

    /// Waits for the quiet period, then runs `query`. Returns `None` if a
    /// newer call arrives before the result is ready.
    pub async fn submit<F, Fut>(&self, query: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut changes = self.generation.subscribe();
        let mut ticket = 0;
        self.generation.send_modify(|current| {
            *current += 1;
            ticket = *current;
        });
        if *changes.borrow_and_update() != ticket {
            return None;
        }

        let superseded = async move {
            // Any change means a newer ticket was issued.
            let _ = changes.changed().await;
        };

        tokio::select! {
            _ = superseded => None,
            output = async {
                tokio::time::sleep(self.quiet_period).await;
                query().await
            } => Some(output),
        }
    }

    /// Supersedes whatever call is pending without issuing a new query.
    pub fn cancel(&self) {
        self.generation.send_modify(|current| *current += 1);
    }
}
