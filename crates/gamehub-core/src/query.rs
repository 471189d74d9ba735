use serde::{Deserialize, Serialize};

/// Filters a game list activation depends on.
///
/// Two queries comparing equal mean "no dependency change": the fetch hook
/// keeps its current activation. Any difference starts a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameQuery {
    pub search: Option<String>,
    pub genre: Option<u32>,
    pub parent_platform: Option<u32>,
    pub ordering: Option<String>,
}

impl GameQuery {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_genre(mut self, genre: u32) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn with_parent_platform(mut self, platform: u32) -> Self {
        self.parent_platform = Some(platform);
        self
    }

    pub fn with_ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    /// Query-string pairs in a stable order. Blank strings are skipped.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(search) = non_blank(&self.search) {
            params.push(("search".to_string(), search.to_string()));
        }
        if let Some(genre) = self.genre {
            params.push(("genres".to_string(), genre.to_string()));
        }
        if let Some(platform) = self.parent_platform {
            params.push(("parent_platforms".to_string(), platform.to_string()));
        }
        if let Some(ordering) = non_blank(&self.ordering) {
            params.push(("ordering".to_string(), ordering.to_string()));
        }
        params
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
