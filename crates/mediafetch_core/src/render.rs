//! Pure projections from decoded backend data to view entries.
//!
//! Every call builds a complete replacement; nothing is carried over from a
//! previous render.

use crate::{CardRowView, MediaCardView, MediaResult, ResultCardView, ResultsView, SearchResultItem};

pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/640x360?text=No+Thumbnail";
pub const UNKNOWN_DURATION: &str = "Unknown";

const UNTITLED: &str = "Untitled";
const UNKNOWN_PLATFORM: &str = "Unknown";

pub fn render_single(result: &MediaResult, source_url: &str) -> MediaCardView {
    MediaCardView {
        title: or_default(&result.title, UNTITLED),
        platform: or_default(&result.platform, UNKNOWN_PLATFORM),
        duration_label: format_duration(result.duration_seconds),
        thumbnail_url: thumbnail(result.thumbnail_url.as_deref()),
        video_link: result.video_url.clone(),
        audio_link: result.audio_url.clone(),
        source_url: source_url.to_string(),
    }
}

/// Cards keep backend order. Absent or empty input yields `ResultsView::NoResults`.
pub fn render_list(items: Option<&[SearchResultItem]>) -> ResultsView {
    match items {
        Some(items) if !items.is_empty() => ResultsView::List(
            items
                .iter()
                .map(|item| CardRowView::new(render_card(item)))
                .collect(),
        ),
        _ => ResultsView::NoResults,
    }
}

/// `m:ss`; zero or missing durations are unknown.
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(total) if total > 0 => format!("{}:{:02}", total / 60, total % 60),
        _ => UNKNOWN_DURATION.to_string(),
    }
}

fn render_card(item: &SearchResultItem) -> ResultCardView {
    ResultCardView {
        title: or_default(&item.title, UNTITLED),
        uploader: item.uploader.clone(),
        duration_label: format_duration(item.duration_seconds),
        thumbnail_url: thumbnail(item.thumbnail_url.as_deref()),
        video_url: item.video_url.trim().to_string(),
    }
}

fn thumbnail(url: Option<&str>) -> String {
    url.unwrap_or(PLACEHOLDER_THUMBNAIL).to_string()
}

fn or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
