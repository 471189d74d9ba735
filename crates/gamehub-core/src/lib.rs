pub mod catalog;
pub mod grid;
pub mod outcome;
pub mod query;
pub mod state;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::catalog::{FetchGamesResponse, Game, ParentPlatform, Platform};

    /// Create a game with no image and no platforms.
    pub fn make_game(id: u64, name: &str) -> Game {
        Game {
            id,
            name: name.to_string(),
            background_image: None,
            parent_platforms: Vec::new(),
        }
    }

    /// Attach platforms (ids assigned sequentially from 1) to a game.
    pub fn with_platforms(mut game: Game, names: &[&str]) -> Game {
        game.parent_platforms = names
            .iter()
            .enumerate()
            .map(|(i, name)| ParentPlatform {
                platform: Platform {
                    id: i as u32 + 1,
                    name: name.to_string(),
                    slug: name.to_lowercase().replace(' ', "-"),
                },
            })
            .collect();
        game
    }

    /// Wrap games in a response envelope whose count matches.
    pub fn make_response(games: Vec<Game>) -> FetchGamesResponse {
        FetchGamesResponse {
            count: games.len() as u64,
            results: games,
        }
    }

    /// JSON body the catalog would send for `games`.
    pub fn games_body(games: &[Game]) -> serde_json::Value {
        serde_json::json!({
            "count": games.len(),
            "results": games,
        })
    }
}
