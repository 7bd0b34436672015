use bytes::Bytes;
use serde_json::Value;

use crate::RawResponse;

/// What a backend reply carries, decided by its declared content type alone.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    Structured(Value),
    Binary {
        bytes: Bytes,
        content_disposition: Option<String>,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Failure status with a structured body. Fields are taken from the body when present.
    #[error("backend error (status {status}): {}", message.as_deref().unwrap_or("<no message>"))]
    Backend {
        status: u16,
        message: Option<String>,
        code: Option<String>,
        details: Option<String>,
    },
    /// Failure status with anything but a structured body.
    #[error("transport error: status {status}")]
    Transport { status: u16 },
    /// Success status, structured content type, body that is not JSON.
    #[error("malformed structured payload: {0}")]
    Malformed(String),
}

/// `application/json` and `+json` media types, parameters ignored.
pub fn is_structured(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Branches on the content-type header and never inspects the body to pick a path.
pub fn decode(response: RawResponse) -> Result<TransferOutcome, DecodeError> {
    let success = response.is_success();

    if is_structured(response.content_type.as_deref()) {
        let parsed = serde_json::from_slice::<Value>(&response.body);
        if success {
            return parsed
                .map(TransferOutcome::Structured)
                .map_err(|err| DecodeError::Malformed(err.to_string()));
        }
        let body = parsed.unwrap_or(Value::Null);
        return Err(DecodeError::Backend {
            status: response.status,
            message: text_field(&body, "error"),
            code: text_field(&body, "code"),
            details: text_field(&body, "details"),
        });
    }

    if !success {
        return Err(DecodeError::Transport {
            status: response.status,
        });
    }

    Ok(TransferOutcome::Binary {
        bytes: response.body,
        content_disposition: response.content_disposition,
    })
}

fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}
