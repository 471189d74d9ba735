use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use gamehub_core::outcome::FetchOutcome;
use gamehub_core::query::GameQuery;
use gamehub_core::state::FetchState;

use crate::catalog_client::CatalogClient;

/// Data-fetch hook for the game list.
///
/// Each activation issues exactly one catalog read and owns one
/// cancellation token. [`UseGames::render`] may be called on every render
/// pass; it only starts a new activation on the first call or when the
/// query changes. Dropping the hook (or its current activation) triggers
/// the token, and a cancelled activation never writes to the state.
pub struct UseGames<C: CatalogClient> {
    client: Arc<C>,
    state: Arc<watch::Sender<FetchState>>,
    activation: Option<Activation>,
    activations: usize,
}

/// One fetch-and-cancel cycle. The token is triggered when this is dropped.
struct Activation {
    query: GameQuery,
    cancel: CancellationToken,
    state: Arc<watch::Sender<FetchState>>,
    task: JoinHandle<()>,
}

impl Drop for Activation {
    fn drop(&mut self) {
        // Cancel under the state lock: a write that already passed its token
        // check completes before this returns, and none can start after.
        let cancel = &self.cancel;
        self.state.send_if_modified(|_| {
            cancel.cancel();
            false
        });
    }
}

impl<C: CatalogClient> UseGames<C> {
    pub fn new(client: Arc<C>) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            client,
            state: Arc::new(state),
            activation: None,
            activations: 0,
        }
    }

    /// Render pass: activate if needed and return the current `{games, error}`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn render(&mut self, query: &GameQuery) -> FetchState {
        let unchanged = self.activation.as_ref().is_some_and(|a| a.query == *query);
        if !unchanged {
            self.activate(query.clone());
        }
        self.state()
    }

    fn activate(&mut self, query: GameQuery) {
        if self.activation.take().is_some() {
            tracing::debug!(?query, "Query changed, cancelled previous activation");
        }

        let cancel = CancellationToken::new();
        self.state.send_modify(FetchState::begin_loading);
        let task = tokio::spawn(run_activation(
            Arc::clone(&self.client),
            Arc::clone(&self.state),
            query.clone(),
            cancel.clone(),
        ));
        self.activations += 1;
        self.activation = Some(Activation {
            query,
            cancel,
            state: Arc::clone(&self.state),
            task,
        });
    }

    /// Deactivate: cancel any in-flight read and release the hook.
    pub fn unmount(self) {
        tracing::debug!(activations = self.activations, "Unmounting games hook");
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState {
        FetchState::clone(&self.state.borrow())
    }

    /// Receiver that observes every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Number of activations started so far.
    pub fn activations(&self) -> usize {
        self.activations
    }

    /// Whether the current activation's read has not resolved yet.
    pub fn in_flight(&self) -> bool {
        self.activation.as_ref().is_some_and(|a| !a.task.is_finished())
    }
}

async fn run_activation<C: CatalogClient>(
    client: Arc<C>,
    state: Arc<watch::Sender<FetchState>>,
    query: GameQuery,
    cancel: CancellationToken,
) {
    let outcome = client.get_games(&query, &cancel).await;
    if let FetchOutcome::Failed(e) = &outcome {
        tracing::warn!(kind = e.kind(), error = %e, "Failed to fetch games");
    }

    // The token is checked again under the write lock, which is also held
    // while it is triggered, so a late response from a cancelled activation
    // is dropped even if the client ignored the token.
    let changed = state.send_if_modified(|s| !cancel.is_cancelled() && s.apply(outcome));
    if !changed && cancel.is_cancelled() {
        tracing::debug!(?query, "Discarded result of cancelled activation");
    }
}
