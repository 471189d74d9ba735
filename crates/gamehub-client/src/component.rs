use std::sync::Arc;

use gamehub_core::grid::GridView;
use gamehub_core::query::GameQuery;
use gamehub_core::state::FetchState;

use crate::catalog_client::CatalogClient;
use crate::use_games::UseGames;

/// Game grid component: the games hook plus its presentation.
///
/// Every render call is a render pass of the hook, so repeated renders with
/// the same query reuse the running activation.
pub struct GameGrid<C: CatalogClient> {
    hook: UseGames<C>,
    query: GameQuery,
}

impl<C: CatalogClient> GameGrid<C> {
    /// Mount the grid and run its first render pass.
    pub fn mount(client: Arc<C>, query: GameQuery) -> Self {
        let mut grid = Self {
            hook: UseGames::new(client),
            query,
        };
        grid.view();
        grid
    }

    pub fn query(&self) -> &GameQuery {
        &self.query
    }

    /// Change the grid's dependencies. The next render re-activates the hook.
    pub fn set_query(&mut self, query: GameQuery) {
        if query != self.query {
            tracing::debug!(?query, "Game grid query changed");
            self.query = query;
            self.view();
        }
    }

    /// Run a render pass and project the hook state.
    pub fn view(&mut self) -> GridView {
        GridView::from_state(&self.hook.render(&self.query))
    }

    pub fn render_html(&mut self) -> String {
        self.view().render_html()
    }

    pub fn render_text(&mut self) -> String {
        self.view().render_text()
    }

    /// Current hook state without running a render pass.
    pub fn state(&self) -> FetchState {
        self.hook.state()
    }

    /// Wait until the current activation has resolved.
    pub async fn settled(&self) -> FetchState {
        let mut rx = self.hook.subscribe();
        let settled = match rx.wait_for(|s| !s.is_loading()).await {
            Ok(state) => FetchState::clone(&state),
            Err(_) => self.hook.state(),
        };
        settled
    }

    pub fn hook(&self) -> &UseGames<C> {
        &self.hook
    }

    /// Remove the grid, cancelling any in-flight read.
    pub fn unmount(self) {
        tracing::debug!(query = ?self.query, "Unmounting game grid");
        self.hook.unmount();
    }
}
