use std::sync::Arc;

use fetch_logging::{fetch_debug, fetch_warn};
use mediafetch_core::{
    Completion, MediaResult, OperationFailure, OperationKind, OperationRequest, SavedFile,
    SearchResponse, SearchResultItem,
};
use serde_json::json;

use crate::{decode, Backend, DecodeError, Endpoint, FetchError, TransferOutcome, TransferTrigger};

/// Executes one operation request end to end: call, decode, then render data or transfer.
pub struct OperationRunner {
    backend: Arc<dyn Backend>,
    transfer: Arc<TransferTrigger>,
}

impl OperationRunner {
    pub fn new(backend: Arc<dyn Backend>, transfer: TransferTrigger) -> Self {
        Self {
            backend,
            transfer: Arc::new(transfer),
        }
    }

    pub async fn run(&self, request: &OperationRequest) -> Result<Completion, OperationFailure> {
        match request.kind {
            OperationKind::Lookup => self.lookup(&request.target).await.map(Completion::Media),
            OperationKind::Search => self
                .search(&request.target)
                .await
                .map(Completion::SearchResults),
            OperationKind::AudioExtract => self
                .extract_audio(&request.target)
                .await
                .map(Completion::AudioSaved),
            OperationKind::VideoExtract => self.extract_video(&request.target).await,
        }
    }

    /// Opens a direct link that needs no lookup first.
    pub async fn open_link(&self, url: &str) -> Result<(), OperationFailure> {
        let transfer = self.transfer.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || transfer.trigger_direct_link_open(&url))
            .await
            .map_err(|err| OperationFailure::Internal(err.to_string()))?
            .map_err(|err| OperationFailure::Internal(err.to_string()))
    }

    async fn call(
        &self,
        kind: OperationKind,
        endpoint: Endpoint,
        body: serde_json::Value,
    ) -> Result<TransferOutcome, OperationFailure> {
        let raw = self
            .backend
            .post(endpoint, &body)
            .await
            .map_err(transport_failure)?;
        fetch_debug!(
            "{} answered status={} content_type={:?} bytes={}",
            kind,
            raw.status,
            raw.content_type,
            raw.body.len()
        );
        decode(raw).map_err(|err| decode_failure(kind, err))
    }

    async fn lookup(&self, url: &str) -> Result<MediaResult, OperationFailure> {
        let outcome = self
            .call(OperationKind::Lookup, Endpoint::Download, json!({ "url": url }))
            .await?;
        structured(outcome)
    }

    async fn search(&self, query: &str) -> Result<Option<Vec<SearchResultItem>>, OperationFailure> {
        let outcome = self
            .call(OperationKind::Search, Endpoint::Search, json!({ "query": query }))
            .await?;
        structured::<SearchResponse>(outcome).map(|response| response.results)
    }

    async fn extract_audio(&self, url: &str) -> Result<SavedFile, OperationFailure> {
        let outcome = self
            .call(
                OperationKind::AudioExtract,
                Endpoint::DownloadMp3,
                json!({ "url": url }),
            )
            .await?;
        let TransferOutcome::Binary {
            bytes,
            content_disposition,
        } = outcome
        else {
            return Err(OperationFailure::Internal(
                "backend answered with metadata instead of an audio file".to_string(),
            ));
        };

        let transfer = self.transfer.clone();
        tokio::task::spawn_blocking(move || {
            transfer.trigger_binary_save(&bytes, content_disposition.as_deref())
        })
        .await
        .map_err(|err| OperationFailure::Internal(err.to_string()))?
        .map_err(|err| OperationFailure::Internal(err.to_string()))
    }

    async fn extract_video(&self, url: &str) -> Result<Completion, OperationFailure> {
        let media = self.lookup(url).await?;
        let link = media.video_url.ok_or(OperationFailure::NoDirectLinkFound)?;
        self.open_link(&link).await?;
        Ok(Completion::LinkOpened { url: link })
    }
}

fn structured<T: serde::de::DeserializeOwned>(
    outcome: TransferOutcome,
) -> Result<T, OperationFailure> {
    match outcome {
        TransferOutcome::Structured(value) => serde_json::from_value(value)
            .map_err(|err| OperationFailure::Internal(format!("unexpected metadata shape: {err}"))),
        TransferOutcome::Binary { bytes, .. } => Err(OperationFailure::Internal(format!(
            "expected metadata, got a {} byte binary payload",
            bytes.len()
        ))),
    }
}

fn transport_failure(err: FetchError) -> OperationFailure {
    OperationFailure::Transport {
        status: None,
        detail: err.to_string(),
    }
}

fn decode_failure(kind: OperationKind, err: DecodeError) -> OperationFailure {
    match err {
        DecodeError::Backend {
            status,
            message,
            code,
            details,
        } => {
            fetch_warn!(
                "{} failed with status {} code={:?} details={:?}",
                kind,
                status,
                code,
                details
            );
            OperationFailure::Backend { message, code }
        }
        DecodeError::Transport { status } => OperationFailure::Transport {
            status: Some(status),
            detail: format!("HTTP {status}"),
        },
        DecodeError::Malformed(message) => OperationFailure::Internal(message),
    }
}
