use serde::Deserialize;

/// Metadata for one resolved media item, as returned by `POST /download`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MediaResult {
    #[serde(default, deserialize_with = "de::text")]
    pub title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub platform: String,
    #[serde(default, rename = "duration", deserialize_with = "de::seconds")]
    pub duration_seconds: Option<u64>,
    #[serde(default, rename = "thumbnail", deserialize_with = "de::optional_text")]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub audio_url: Option<String>,
}

/// One entry of a search response. Backend order is relevance order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SearchResultItem {
    #[serde(default, deserialize_with = "de::text")]
    pub title: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub uploader: Option<String>,
    #[serde(default, rename = "duration", deserialize_with = "de::seconds")]
    pub duration_seconds: Option<u64>,
    #[serde(default, rename = "thumbnail", deserialize_with = "de::optional_text")]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub video_url: String,
}

/// Body of `POST /search`. `results` may be missing entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchResultItem>>,
}

mod de {
    use serde::{Deserialize, Deserializer};

    pub(super) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    // The backend sends "" for missing thumbnails.
    pub(super) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    // Extractors report fractional seconds for some platforms.
    pub(super) fn seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| secs.trunc() as u64))
    }
}
