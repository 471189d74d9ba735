use std::future::Future;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use gamehub_core::catalog::{FetchGamesResponse, GAMES_PATH};
use gamehub_core::outcome::FetchOutcome;
use gamehub_core::query::GameQuery;

/// Typed, cancellable read access to the catalog API.
///
/// Implementations are injected into the fetch hook, so tests can swap the
/// HTTP client for a scripted one. A read whose token fires before it
/// completes resolves to [`FetchOutcome::Cancelled`].
pub trait CatalogClient: Send + Sync + 'static {
    /// GET `path` (relative to the API base URL) and decode the body as `T`.
    fn get<T>(
        &self,
        path: &str,
        params: &[(String, String)],
        cancel: &CancellationToken,
    ) -> impl Future<Output = FetchOutcome<T>> + Send
    where
        T: DeserializeOwned + Send + 'static;

    /// Read the game collection for `query`.
    fn get_games(
        &self,
        query: &GameQuery,
        cancel: &CancellationToken,
    ) -> impl Future<Output = FetchOutcome<FetchGamesResponse>> + Send {
        let params = query.to_params();
        async move { self.get(GAMES_PATH, &params, cancel).await }
    }
}
