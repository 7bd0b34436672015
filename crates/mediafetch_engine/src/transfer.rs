//! Client-side transfers: saving binary payloads and opening direct links.
//!
//! Cross-origin direct links are handed to the system browser; whether the
//! browser saves or plays them is outside this crate's control.

use std::path::PathBuf;
use std::sync::Arc;

use fetch_logging::{fetch_debug, fetch_info};
use mediafetch_core::SavedFile;
use thiserror::Error;
use url::Url;

use crate::{suggested_filename, write_new_file, PersistError};

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to save {filename}: {source}")]
    Save {
        filename: String,
        #[source]
        source: PersistError,
    },
    #[error("not an absolute http(s) link: {0}")]
    InvalidLink(String),
    #[error("failed to open {url}: {message}")]
    OpenLink { url: String, message: String },
}

/// Opens a link outside the current view.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &Url) -> Result<(), TransferError>;
}

/// Hands links to the user's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLinkOpener;

impl LinkOpener for BrowserLinkOpener {
    fn open(&self, url: &Url) -> Result<(), TransferError> {
        webbrowser::open(url.as_str()).map_err(|err| TransferError::OpenLink {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

pub struct TransferTrigger {
    output_dir: PathBuf,
    opener: Arc<dyn LinkOpener>,
}

impl TransferTrigger {
    pub fn new(output_dir: impl Into<PathBuf>, opener: Arc<dyn LinkOpener>) -> Self {
        Self {
            output_dir: output_dir.into(),
            opener,
        }
    }

    /// Saves a binary payload under the name suggested by `content_disposition`,
    /// or `audio.mp3`. A partially written file never survives a failure.
    pub fn trigger_binary_save(
        &self,
        bytes: &[u8],
        content_disposition: Option<&str>,
    ) -> Result<SavedFile, TransferError> {
        let filename = suggested_filename(content_disposition);
        fetch_debug!(
            "Saving {} bytes as {:?} (header {:?})",
            bytes.len(),
            filename,
            content_disposition
        );
        let path = write_new_file(&self.output_dir, &filename, bytes).map_err(|source| {
            TransferError::Save {
                filename: filename.clone(),
                source,
            }
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(filename);
        fetch_info!("Saved {:?}", path);
        Ok(SavedFile { filename, path })
    }

    pub fn trigger_direct_link_open(&self, url: &str) -> Result<(), TransferError> {
        let parsed = Url::parse(url).map_err(|_| TransferError::InvalidLink(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransferError::InvalidLink(url.to_string()));
        }
        self.opener.open(&parsed)?;
        fetch_info!("Opened direct link {}", parsed);
        Ok(())
    }
}
