use mediafetch_core::{AudioOrigin, LinkKind, Msg};

pub const HELP: &str = "\
Commands:
  <url>        look up a media URL
  <text>       search for media
  /mp3         convert the looked-up URL (or the typed URL) to MP3
  /mp3 N       convert search result N to MP3
  /mp4 N       open the direct video link of search result N
  /video       open the looked-up video link
  /audio       open the looked-up audio link
  /help        show this help
  /quit        exit";

/// What one line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Messages(Vec<Msg>),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        // Enter on an empty field still submits, so validation can report it.
        return Command::Messages(vec![Msg::InputChanged(String::new()), Msg::SubmitPressed]);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Command::Messages(vec![
            Msg::InputChanged(line.to_string()),
            Msg::SubmitPressed,
        ]);
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default().to_ascii_lowercase();
    let index = words.next().map(card_index);
    if words.next().is_some() {
        return Command::Unknown(line.to_string());
    }

    match (name.as_str(), index) {
        ("mp3", None) => Command::Messages(vec![Msg::AudioRequested(AudioOrigin::Primary)]),
        ("mp3", Some(Some(index))) => {
            Command::Messages(vec![Msg::AudioRequested(AudioOrigin::Card(index))])
        }
        ("mp4", Some(Some(index))) => Command::Messages(vec![Msg::VideoRequested { index }]),
        ("video", None) => Command::Messages(vec![Msg::OpenLink(LinkKind::Video)]),
        ("audio", None) => Command::Messages(vec![Msg::OpenLink(LinkKind::Audio)]),
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit" | "q", None) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Cards are numbered from 1 on screen.
fn card_index(word: &str) -> Option<usize> {
    word.parse::<usize>().ok()?.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_text_sets_input_and_submits() {
        assert_eq!(
            parse_line("  lofi beats \n"),
            Command::Messages(vec![
                Msg::InputChanged("lofi beats".to_string()),
                Msg::SubmitPressed
            ])
        );
    }

    #[test]
    fn empty_line_submits_empty_input() {
        assert_eq!(
            parse_line(""),
            Command::Messages(vec![Msg::InputChanged(String::new()), Msg::SubmitPressed])
        );
    }

    #[test]
    fn card_commands_are_one_based() {
        assert_eq!(
            parse_line("/mp3 1"),
            Command::Messages(vec![Msg::AudioRequested(AudioOrigin::Card(0))])
        );
        assert_eq!(
            parse_line("/MP4 3"),
            Command::Messages(vec![Msg::VideoRequested { index: 2 }])
        );
    }

    #[test]
    fn bare_mp3_is_the_primary_control() {
        assert_eq!(
            parse_line("/mp3"),
            Command::Messages(vec![Msg::AudioRequested(AudioOrigin::Primary)])
        );
    }

    #[test]
    fn link_and_control_commands() {
        assert_eq!(
            parse_line("/video"),
            Command::Messages(vec![Msg::OpenLink(LinkKind::Video)])
        );
        assert_eq!(
            parse_line("/audio"),
            Command::Messages(vec![Msg::OpenLink(LinkKind::Audio)])
        );
        assert_eq!(parse_line("/help"), Command::Help);
        assert_eq!(parse_line("/quit"), Command::Quit);
    }

    #[test]
    fn malformed_commands_are_unknown() {
        for line in ["/mp3 0", "/mp3 x", "/mp4", "/mp3 1 2", "/video 1", "/frobnicate"] {
            assert_eq!(parse_line(line), Command::Unknown(line.to_string()), "{line}");
        }
    }
}
