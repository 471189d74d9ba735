/// Result of one catalog read.
///
/// Cancellation is a normal outcome rather than an error, so consumers match
/// on the tag instead of inspecting error types.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Ok(T),
    Cancelled,
    Failed(FetchError),
}

impl<T> FetchOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Non-cancellation failures of a catalog read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: connect, timeout, reset.
    Network(String),
    /// The server answered with a non-2xx status.
    Status { status: u16, message: String },
    /// The body did not match the expected shape.
    Decode(String),
}

impl FetchError {
    /// Build a status error, pulling a readable message out of the body.
    ///
    /// Looks for a JSON `error`, `message` or `detail` string first, then a
    /// short single-line plain-text body, then falls back to a generic
    /// status line. Markup and long or multi-line bodies (proxy error pages)
    /// never become the message.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::from_response(status, None, body)
    }

    /// Like [`FetchError::from_status`], but ignores the body unless the
    /// declared media type is JSON or plain text.
    pub fn from_response(status: u16, content_type: Option<&str>, body: &str) -> Self {
        let readable = content_type.is_none_or(is_readable_media_type);
        let message = readable
            .then(|| message_from_body(body))
            .flatten()
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        Self::Status { status, message }
    }

    /// Decode failure for a body that did not match the expected shape.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Decode(format!("Malformed response: {err}"))
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(m) | Self::Decode(m) | Self::Status { message: m, .. } => {
                write!(f, "{m}")
            },
        }
    }
}

impl std::error::Error for FetchError {}

/// Longest plain-text body still shown as an error message.
const MAX_TEXT_MESSAGE: usize = 200;

fn is_readable_media_type(content_type: &str) -> bool {
    let media = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    media == "text/plain" || media == "application/json" || media.ends_with("+json")
}

fn message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["error", "message", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        // JSON that is not an object carries no message field
        Ok(_) => None,
        Err(_) => {
            let short = trimmed.len() <= MAX_TEXT_MESSAGE && !trimmed.contains('\n');
            (short && !trimmed.starts_with('<')).then(|| trimmed.to_string())
        },
    }
}
