#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Single-result view produced from a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCardView {
    pub title: String,
    pub platform: String,
    pub duration_label: String,
    pub thumbnail_url: String,
    /// Hidden when absent.
    pub video_link: Option<String>,
    /// Hidden when absent.
    pub audio_link: Option<String>,
    /// URL the lookup was made for; the MP3 action is bound to it.
    pub source_url: String,
}

/// One search hit as displayed on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCardView {
    pub title: String,
    pub uploader: Option<String>,
    pub duration_label: String,
    pub thumbnail_url: String,
    pub video_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CardAction {
    Audio,
    Video,
}

/// A card plus its independent per-action state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRowView {
    pub card: ResultCardView,
    pub audio_pending: bool,
    pub video_pending: bool,
    pub notice: Option<StatusMessage>,
}

impl CardRowView {
    pub fn new(card: ResultCardView) -> Self {
        Self {
            card,
            audio_pending: false,
            video_pending: false,
            notice: None,
        }
    }

    pub fn is_pending(&self, action: CardAction) -> bool {
        match action {
            CardAction::Audio => self.audio_pending,
            CardAction::Video => self.video_pending,
        }
    }

    pub(crate) fn set_pending(&mut self, action: CardAction, pending: bool) {
        match action {
            CardAction::Audio => self.audio_pending = pending,
            CardAction::Video => self.video_pending = pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Hidden,
    Single(MediaCardView),
    List(Vec<CardRowView>),
    /// Explicit indicator for an empty or missing search result set.
    NoResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub submit_enabled: bool,
    /// Global loading indicator; card operations never set it.
    pub loading: bool,
    pub message: Option<StatusMessage>,
    pub results: ResultsView,
    /// Operations dispatched and not yet settled, primary and cards alike.
    pub in_flight: usize,
}
