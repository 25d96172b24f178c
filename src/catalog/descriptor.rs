//! Task descriptor types sourced from the catalogue.

use serde::{Deserialize, Deserializer};

/// Behavioural category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskKind {
    /// The visible action opens a link in the player's browser.
    OpenLink,
    /// The round is resolved by verifying a post on the player's feed.
    BlueskyPost,
    /// No special action; resolved by timer or by the player's response.
    #[default]
    Generic,
}

impl TaskKind {
    /// Returns the canonical catalogue representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenLink => "open_link",
            Self::BlueskyPost => "bluesky_post",
            Self::Generic => "generic",
        }
    }
}

impl From<&str> for TaskKind {
    /// Unknown kinds fall back to [`TaskKind::Generic`], matching the
    /// permissive reads the catalogue format has always allowed.
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "open_link" => Self::OpenLink,
            "bluesky_post" => Self::BlueskyPost,
            _ => Self::Generic,
        }
    }
}

impl<'de> Deserialize<'de> for TaskKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Immutable description of one challenge, as stored in the catalogue.
///
/// Field names in the serialized form follow the on-disk catalogue shape:
/// `duration`, `type`, and `bluesky_open`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskDescriptor {
    name: String,
    #[serde(rename = "duration", default)]
    duration_seconds: u64,
    #[serde(rename = "type", default)]
    kind: TaskKind,
    #[serde(default)]
    window_title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    post_text: Option<String>,
    #[serde(rename = "bluesky_open", default)]
    open_profile_on_action: bool,
}

impl TaskDescriptor {
    /// Creates a descriptor with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, duration_seconds: u64, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            duration_seconds,
            kind,
            window_title: None,
            link: None,
            post_text: None,
            open_profile_on_action: false,
        }
    }

    /// Sets the window title substring whose presence marks the task as
    /// started.
    #[must_use]
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }

    /// Sets the link opened by the visible action.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the text the player is expected to post.
    #[must_use]
    pub fn with_post_text(mut self, text: impl Into<String>) -> Self {
        self.post_text = Some(text.into());
        self
    }

    /// Requests that the visible action also opens the player's profile.
    #[must_use]
    pub const fn with_profile_open(mut self) -> Self {
        self.open_profile_on_action = true;
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the time budget in seconds. Zero means the round never
    /// auto-resolves by timer.
    #[must_use]
    pub const fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Returns the behavioural category.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the window title substring required while the task runs.
    #[must_use]
    pub fn window_title(&self) -> Option<&str> {
        self.window_title.as_deref()
    }

    /// Returns the link opened by the visible action.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Returns the text the player is expected to post.
    #[must_use]
    pub fn post_text(&self) -> Option<&str> {
        self.post_text.as_deref()
    }

    /// Returns whether the visible action also opens the player's profile.
    #[must_use]
    pub const fn opens_profile(&self) -> bool {
        self.open_profile_on_action
    }
}
