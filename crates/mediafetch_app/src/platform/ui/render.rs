use mediafetch_core::{
    AppViewModel, CardRowView, MediaCardView, MessageKind, ResultsView, StatusMessage,
};

pub const LOADING_LINE: &str = "Loading...";
pub const NO_RESULTS_LINE: &str = "No results found.";

/// Renders the whole view as terminal text, one region after another.
pub fn render(view: &AppViewModel) -> String {
    let mut lines = Vec::new();

    if let Some(message) = &view.message {
        lines.push(format_message(message));
    }
    if view.loading {
        lines.push(LOADING_LINE.to_string());
    }
    let background = view.in_flight.saturating_sub(usize::from(view.loading));
    if background > 0 {
        lines.push(format!("Card requests running: {background}"));
    }

    match &view.results {
        ResultsView::Hidden => {}
        ResultsView::Single(card) => lines.extend(single_lines(card)),
        ResultsView::List(rows) => {
            for (index, row) in rows.iter().enumerate() {
                lines.extend(row_lines(index, row));
            }
        }
        ResultsView::NoResults => lines.push(NO_RESULTS_LINE.to_string()),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn format_message(message: &StatusMessage) -> String {
    let tag = match message.kind {
        MessageKind::Info => "info",
        MessageKind::Success => "ok",
        MessageKind::Error => "error",
    };
    format!("[{tag}] {}", message.text)
}

fn single_lines(card: &MediaCardView) -> Vec<String> {
    let mut lines = vec![
        format!("== {} ==", card.title),
        format!("Platform: {} | Duration: {}", card.platform, card.duration_label),
        format!("Thumbnail: {}", card.thumbnail_url),
    ];
    if let Some(link) = &card.video_link {
        lines.push(format!("Video: {link}  (/video)"));
    }
    if let Some(link) = &card.audio_link {
        lines.push(format!("Audio: {link}  (/audio)"));
    }
    lines.push("MP3: /mp3".to_string());
    lines
}

fn row_lines(index: usize, row: &CardRowView) -> Vec<String> {
    let card = &row.card;
    let mut header = format!("{:>2}. {}", index + 1, card.title);
    match &card.uploader {
        Some(uploader) => header.push_str(&format!(" ({uploader}, {})", card.duration_label)),
        None => header.push_str(&format!(" ({})", card.duration_label)),
    }
    if row.audio_pending {
        header.push_str(" [MP3...]");
    }
    if row.video_pending {
        header.push_str(" [MP4...]");
    }

    let mut lines = vec![header, format!("    {}", card.thumbnail_url)];
    if let Some(notice) = &row.notice {
        lines.push(format!("    {}", format_message(notice)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use mediafetch_core::ResultCardView;
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(title: &str, uploader: Option<&str>) -> CardRowView {
        CardRowView::new(ResultCardView {
            title: title.to_string(),
            uploader: uploader.map(str::to_string),
            duration_label: "3:05".to_string(),
            thumbnail_url: format!("https://img/{title}.jpg"),
            video_url: format!("https://v/{title}"),
        })
    }

    #[test]
    fn message_and_loading_come_first() {
        let view = AppViewModel {
            loading: true,
            message: Some(StatusMessage::info("Checking")),
            ..AppViewModel::default()
        };
        assert_eq!(render(&view), "[info] Checking\nLoading...\n");
    }

    #[test]
    fn card_requests_are_counted_apart_from_the_primary() {
        let view = AppViewModel {
            loading: true,
            in_flight: 3,
            ..AppViewModel::default()
        };
        assert_eq!(render(&view), "Loading...\nCard requests running: 2\n");

        let idle = AppViewModel {
            in_flight: 0,
            ..AppViewModel::default()
        };
        assert_eq!(render(&idle), "\n");
    }

    #[test]
    fn single_view_hides_missing_links() {
        let view = AppViewModel {
            results: ResultsView::Single(MediaCardView {
                title: "Clip".to_string(),
                platform: "YouTube".to_string(),
                duration_label: "1:30".to_string(),
                thumbnail_url: "https://img/t.jpg".to_string(),
                video_link: Some("https://cdn/v.mp4".to_string()),
                audio_link: None,
                source_url: "https://youtu.be/x".to_string(),
            }),
            ..AppViewModel::default()
        };
        assert_eq!(
            render(&view),
            "== Clip ==\n\
             Platform: YouTube | Duration: 1:30\n\
             Thumbnail: https://img/t.jpg\n\
             Video: https://cdn/v.mp4  (/video)\n\
             MP3: /mp3\n"
        );
    }

    #[test]
    fn list_rows_show_per_card_state() {
        let mut busy = row("b", None);
        busy.audio_pending = true;
        busy.video_pending = true;
        let mut done = row("c", Some("someone"));
        done.notice = Some(StatusMessage::success("Saved c.mp3"));

        let view = AppViewModel {
            results: ResultsView::List(vec![row("a", Some("uploader")), busy, done]),
            ..AppViewModel::default()
        };
        assert_eq!(
            render(&view),
            " 1. a (uploader, 3:05)\n    https://img/a.jpg\n\
             \x202. b (3:05) [MP3...] [MP4...]\n    https://img/b.jpg\n\
             \x203. c (someone, 3:05)\n    https://img/c.jpg\n    [ok] Saved c.mp3\n"
        );
    }

    #[test]
    fn empty_search_has_explicit_indicator() {
        let view = AppViewModel {
            results: ResultsView::NoResults,
            ..AppViewModel::default()
        };
        assert_eq!(render(&view), "No results found.\n");
    }
}
