pub mod api_client;
pub mod catalog_client;
pub mod component;
pub mod config;
pub mod use_games;

pub use api_client::ApiClient;
pub use catalog_client::CatalogClient;
pub use component::GameGrid;
pub use config::ClientConfig;
pub use use_games::UseGames;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde::de::DeserializeOwned;
    use tokio_util::sync::CancellationToken;

    use gamehub_core::outcome::{FetchError, FetchOutcome};

    use crate::catalog_client::CatalogClient;

    enum Scripted {
        Body(serde_json::Value),
        Fail(FetchError),
    }

    /// Scripted in-memory catalog.
    ///
    /// Responses are handed out in order, one per request; once the script
    /// runs out every request gets an empty game list.
    pub struct MockCatalog {
        script: Mutex<VecDeque<Scripted>>,
        delay: Duration,
        honor_cancel: bool,
        requests: AtomicUsize,
        cancelled: AtomicUsize,
        completed_after_cancel: AtomicUsize,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl Default for MockCatalog {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockCatalog {
        pub fn new() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                delay: Duration::ZERO,
                honor_cancel: true,
                requests: AtomicUsize::new(0),
                cancelled: AtomicUsize::new(0),
                completed_after_cancel: AtomicUsize::new(0),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue a successful JSON body.
        pub fn respond_with(self, body: serde_json::Value) -> Self {
            self.script.lock().unwrap().push_back(Scripted::Body(body));
            self
        }

        /// Queue a failure.
        pub fn fail_with(self, err: FetchError) -> Self {
            self.script.lock().unwrap().push_back(Scripted::Fail(err));
            self
        }

        /// Delay every response by `delay`.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Resolve requests even after their token fired, like a transport
        /// that cannot be aborted.
        pub fn ignore_cancellation(mut self) -> Self {
            self.honor_cancel = false;
            self
        }

        pub fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }

        /// Requests that observed their token and returned `Cancelled`.
        pub fn cancelled(&self) -> usize {
            self.cancelled.load(Ordering::SeqCst)
        }

        /// Requests that resolved although their token had fired.
        pub fn completed_after_cancel(&self) -> usize {
            self.completed_after_cancel.load(Ordering::SeqCst)
        }

        pub fn paths(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
        }

        pub fn params(&self) -> Vec<Vec<(String, String)>> {
            self.calls.lock().unwrap().iter().map(|(_, q)| q.clone()).collect()
        }

        fn next(&self) -> Scripted {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Scripted::Body(serde_json::json!({"count": 0, "results": []})))
        }
    }

    impl CatalogClient for MockCatalog {
        async fn get<T>(
            &self,
            path: &str,
            params: &[(String, String)],
            cancel: &CancellationToken,
        ) -> FetchOutcome<T>
        where
            T: DeserializeOwned + Send + 'static,
        {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), params.to_vec()));
            let scripted = self.next();

            if self.honor_cancel {
                let aborted = if cancel.is_cancelled() {
                    true
                } else {
                    tokio::select! {
                        () = cancel.cancelled() => true,
                        () = tokio::time::sleep(self.delay) => false,
                    }
                };
                if aborted {
                    self.cancelled.fetch_add(1, Ordering::SeqCst);
                    return FetchOutcome::Cancelled;
                }
            } else {
                tokio::time::sleep(self.delay).await;
                if cancel.is_cancelled() {
                    self.completed_after_cancel.fetch_add(1, Ordering::SeqCst);
                }
            }

            match scripted {
                Scripted::Body(body) => match serde_json::from_value::<T>(body) {
                    Ok(value) => FetchOutcome::Ok(value),
                    Err(e) => FetchOutcome::Failed(FetchError::malformed(e)),
                },
                Scripted::Fail(err) => FetchOutcome::Failed(err),
            }
        }
    }
}
