use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::{MediaResult, SearchResultItem};

pub type OpId = u64;

/// Backend capability an operation exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationKind {
    Lookup,
    Search,
    AudioExtract,
    /// A lookup whose direct video link is handed to the transfer trigger.
    VideoExtract,
}

impl OperationKind {
    /// Message shown when the backend reports an error without text.
    pub fn fallback_message(self) -> &'static str {
        match self {
            OperationKind::Lookup | OperationKind::VideoExtract => "Failed to fetch video info.",
            OperationKind::Search => "Search failed.",
            OperationKind::AudioExtract => "MP3 download failed.",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Lookup => write!(f, "lookup"),
            OperationKind::Search => write!(f, "search"),
            OperationKind::AudioExtract => write!(f, "audio-extract"),
            OperationKind::VideoExtract => write!(f, "video-extract"),
        }
    }
}

/// One user action turned into a backend call. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub kind: OperationKind,
    /// A URL for lookups and extractions, free text for searches.
    pub target: String,
}

impl OperationRequest {
    pub fn new(kind: OperationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub path: PathBuf,
}

/// Successful terminal state of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Media(MediaResult),
    SearchResults(Option<Vec<SearchResultItem>>),
    AudioSaved(SavedFile),
    LinkOpened { url: String },
}

/// Failure taxonomy surfaced to the user. None of these is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationFailure {
    /// Rejected locally, nothing was sent.
    #[error("{message}")]
    Validation { message: String },
    /// Structured error payload from the backend.
    #[error("backend error: {}", message.as_deref().unwrap_or("<no message>"))]
    Backend {
        message: Option<String>,
        code: Option<String>,
    },
    /// Failure status without a structured body, or the request itself failed.
    #[error("transport error (status {status:?}): {detail}")]
    Transport { status: Option<u16>, detail: String },
    /// Lookup succeeded but carried no usable video link.
    #[error("no direct link found")]
    NoDirectLinkFound,
    /// Unexpected payload, a failed save, or a task that died before reporting.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OperationFailure {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Human-readable text for the message region.
    pub fn user_message(&self, kind: OperationKind) -> String {
        match self {
            OperationFailure::Validation { message } => message.clone(),
            OperationFailure::Backend { message, .. } => message
                .clone()
                .unwrap_or_else(|| kind.fallback_message().to_string()),
            OperationFailure::Transport {
                status: Some(status),
                ..
            } => format!("Download failed with status: {status}"),
            OperationFailure::Transport {
                status: None,
                detail,
            } => format!("Download failed: {detail}"),
            OperationFailure::NoDirectLinkFound => "No direct video link found.".to_string(),
            OperationFailure::Internal(_) => kind.fallback_message().to_string(),
        }
    }
}
