use serde::{Deserialize, Serialize};

/// Resource path of the game collection, relative to the API base URL.
pub const GAMES_PATH: &str = "/games";

/// A hardware platform a game ships on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub name: String,
    pub slug: String,
}

/// Platform grouping as the catalog nests it (`{ "platform": { .. } }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentPlatform {
    pub platform: Platform,
}

/// A game entry from the catalog. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parent_platforms: Vec<ParentPlatform>,
}

impl Game {
    /// Platforms in the order the catalog listed them.
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.parent_platforms.iter().map(|p| &p.platform)
    }
}

/// List envelope returned by catalog collection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse<T> {
    pub count: u64,
    pub results: Vec<T>,
}

pub type FetchGamesResponse = FetchResponse<Game>;

// The catalog sends `null` instead of `[]` for games without platform data.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_full_game() {
        let json = r#"{
            "id": 3498,
            "name": "Grand Theft Auto V",
            "background_image": "https://media.example/gta5.jpg",
            "rating": 4.47,
            "parent_platforms": [
                { "platform": { "id": 1, "name": "PC", "slug": "pc" } },
                { "platform": { "id": 2, "name": "PlayStation", "slug": "playstation" } }
            ]
        }"#;
        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, 3498);
        assert_eq!(game.name, "Grand Theft Auto V");
        assert_eq!(
            game.background_image.as_deref(),
            Some("https://media.example/gta5.jpg")
        );
        let slugs: Vec<&str> = game.platforms().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["pc", "playstation"]);
    }

    #[test]
    fn decode_minimal_game() {
        let game: Game = serde_json::from_str(r#"{"id": 1, "name": "Portal"}"#).unwrap();
        assert_eq!(game.name, "Portal");
        assert!(game.background_image.is_none());
        assert!(game.parent_platforms.is_empty());
    }

    #[test]
    fn null_fields_decode_as_absent() {
        let json = r#"{"id": 2, "name": "Halo", "background_image": null, "parent_platforms": null}"#;
        let game: Game = serde_json::from_str(json).unwrap();
        assert!(game.background_image.is_none());
        assert_eq!(game.platforms().count(), 0);
    }

    #[test]
    fn decode_response_preserves_order() {
        let json = r#"{
            "count": 2,
            "next": null,
            "results": [{"id": 2, "name": "Halo"}, {"id": 1, "name": "Portal"}]
        }"#;
        let resp: FetchGamesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.count, 2);
        let ids: Vec<u64> = resp.results.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn response_without_count_is_rejected() {
        let json = r#"{"results": []}"#;
        assert!(serde_json::from_str::<FetchGamesResponse>(json).is_err());
    }

    #[test]
    fn game_without_name_is_rejected() {
        let json = r#"{"count": 1, "results": [{"id": 1}]}"#;
        assert!(serde_json::from_str::<FetchGamesResponse>(json).is_err());
    }
}
