use crate::catalog::{FetchGamesResponse, Game};
use crate::outcome::FetchOutcome;

/// Lifecycle phase of one component instance.
///
/// `Idle -> Loading -> {Loaded | Failed}`. An activation cancelled while
/// loading leaves the state exactly as it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// The `{games, error}` pair a fetch hook exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    pub games: Vec<Game>,
    /// Empty when there is nothing to report.
    pub error: String,
    pub phase: Phase,
}

impl FetchState {
    /// Enter `Loading`. Games and error from earlier cycles stay visible.
    pub fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Fold a completed read into the state. Returns whether anything changed.
    pub fn apply(&mut self, outcome: FetchOutcome<FetchGamesResponse>) -> bool {
        match outcome {
            FetchOutcome::Ok(resp) => {
                tracing::trace!(count = resp.results.len(), "Applying game list");
                self.games = resp.results;
                self.error.clear();
                self.phase = Phase::Loaded;
                true
            },
            FetchOutcome::Failed(err) => {
                tracing::trace!(kind = err.kind(), "Applying fetch failure");
                self.error = err.to_string();
                self.phase = Phase::Failed;
                true
            },
            FetchOutcome::Cancelled => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}
