use std::fmt::Write;

use crate::state::FetchState;

/// One rendered list entry, keyed by the game id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub key: u64,
    pub name: String,
    pub platforms: Vec<String>,
}

/// Pure projection of a [`FetchState`] into what the game grid shows.
///
/// No sorting or filtering happens here: items appear in the order the
/// catalog returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridView {
    pub error: Option<String>,
    pub items: Vec<GridItem>,
}

impl GridView {
    pub fn from_state(state: &FetchState) -> Self {
        let error = state.has_error().then(|| state.error.clone());
        let items = state
            .games
            .iter()
            .map(|game| GridItem {
                key: game.id,
                name: game.name.clone(),
                platforms: game.platforms().map(|p| p.name.clone()).collect(),
            })
            .collect();
        Self { error, items }
    }

    /// Error paragraph (when present) followed by the game list.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            let _ = write!(out, "<p class=\"error\">{}</p>", escape_html(error));
        }
        out.push_str("<ul>");
        for item in &self.items {
            let _ = write!(
                out,
                "<li data-key=\"{}\">{}</li>",
                item.key,
                escape_html(&item.name)
            );
        }
        out.push_str("</ul>");
        out
    }

    /// Terminal rendering: error line, then one `- name` line per game.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            let _ = writeln!(out, "error: {error}");
        }
        for item in &self.items {
            if item.platforms.is_empty() {
                let _ = writeln!(out, "- {}", item.name);
            } else {
                let _ = writeln!(out, "- {} [{}]", item.name, item.platforms.join(", "));
            }
        }
        out
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
