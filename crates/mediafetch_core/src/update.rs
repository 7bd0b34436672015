use crate::state::{InFlight, Scope};
use crate::{
    classify, render_list, render_single, AppState, AudioOrigin, CardAction, Completion, Effect,
    InputKind, LinkKind, Msg, OpId, OperationFailure, OperationKind, OperationRequest,
    ResultsView, StatusMessage,
};

/// Fixed user-facing texts.
pub mod messages {
    pub const EMPTY_INPUT: &str = "Please enter a valid URL.";
    pub const MISSING_AUDIO_TARGET: &str = "URL is missing.";
    pub const CONVERTING: &str = "Checking system requirements and converting to MP3...";
    pub const MISSING_CARD_LINK: &str = "This result has no link.";
    pub const NO_VIDEO_LINK: &str = "No direct video link found.";
    pub const NO_AUDIO_LINK: &str = "No direct audio link found.";
    pub const LINK_OPENED: &str = "Opened video link.";
    pub const BUSY: &str = "Busy, try again when the current request finishes.";
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitPressed => submit(&mut state),
        Msg::AudioRequested(AudioOrigin::Primary) => primary_audio(&mut state),
        Msg::AudioRequested(AudioOrigin::Card(index)) => {
            card_operation(&mut state, index, CardAction::Audio)
        }
        Msg::VideoRequested { index } => card_operation(&mut state, index, CardAction::Video),
        Msg::OpenLink(kind) => open_link(&mut state, kind),
        Msg::OperationSettled { op_id, result } => {
            settle(&mut state, op_id, result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // The primary control is disabled while its operation runs.
    if state.primary_pending() {
        state.show_message(StatusMessage::info(messages::BUSY));
        return Vec::new();
    }

    let raw = state.input().trim().to_string();
    if raw.is_empty() {
        state.show_message(StatusMessage::error(messages::EMPTY_INPUT));
        return Vec::new();
    }

    let kind = match classify(&raw) {
        InputKind::DirectUrl => OperationKind::Lookup,
        InputKind::SearchQuery => OperationKind::Search,
    };

    state.clear_message();
    state.set_results(ResultsView::Hidden);
    let op_id = state.begin_primary(kind, &raw);
    vec![Effect::Dispatch {
        op_id,
        request: OperationRequest::new(kind, raw),
    }]
}

fn primary_audio(state: &mut AppState) -> Vec<Effect> {
    if state.primary_pending() {
        return Vec::new();
    }

    let Some(target) = primary_audio_target(state) else {
        state.show_message(StatusMessage::error(messages::MISSING_AUDIO_TARGET));
        return Vec::new();
    };

    state.show_message(StatusMessage::info(messages::CONVERTING));
    let op_id = state.begin_primary(OperationKind::AudioExtract, &target);
    vec![Effect::Dispatch {
        op_id,
        request: OperationRequest::new(OperationKind::AudioExtract, target),
    }]
}

/// The shown single result wins over whatever is typed in the input field.
fn primary_audio_target(state: &AppState) -> Option<String> {
    if let ResultsView::Single(view) = state.results() {
        return Some(view.source_url.clone());
    }
    let raw = state.input().trim();
    match classify(raw) {
        InputKind::DirectUrl => Some(raw.to_string()),
        InputKind::SearchQuery => None,
    }
}

fn card_operation(state: &mut AppState, index: usize, action: CardAction) -> Vec<Effect> {
    let Some(card) = state.card(index) else {
        state.show_message(StatusMessage::error(format!("No result #{}.", index + 1)));
        return Vec::new();
    };
    // Each card action guards only itself against duplicate dispatch.
    if card.is_pending(action) {
        return Vec::new();
    }
    let target = card.card.video_url.clone();
    if target.is_empty() {
        state.set_card_notice(index, Some(StatusMessage::error(messages::MISSING_CARD_LINK)));
        return Vec::new();
    }

    let kind = match action {
        CardAction::Audio => OperationKind::AudioExtract,
        CardAction::Video => OperationKind::VideoExtract,
    };
    match state.begin_card(index, action, kind, &target) {
        Some(op_id) => vec![Effect::Dispatch {
            op_id,
            request: OperationRequest::new(kind, target),
        }],
        None => Vec::new(),
    }
}

fn open_link(state: &mut AppState, kind: LinkKind) -> Vec<Effect> {
    let link = match state.results() {
        ResultsView::Single(view) => match kind {
            LinkKind::Video => view.video_link.clone(),
            LinkKind::Audio => view.audio_link.clone(),
        },
        _ => None,
    };

    match link {
        Some(url) => vec![Effect::OpenLink { url }],
        None => {
            let text = match kind {
                LinkKind::Video => messages::NO_VIDEO_LINK,
                LinkKind::Audio => messages::NO_AUDIO_LINK,
            };
            state.show_message(StatusMessage::error(text));
            Vec::new()
        }
    }
}

fn settle(state: &mut AppState, op_id: OpId, result: Result<Completion, OperationFailure>) {
    // Release first: the pending flag is cleared whatever the outcome.
    let Some(InFlight {
        kind,
        scope,
        target,
    }) = state.release(op_id)
    else {
        return;
    };

    match scope {
        Scope::Primary => match result {
            Ok(Completion::Media(media)) => {
                state.clear_message();
                state.set_results(ResultsView::Single(render_single(&media, &target)));
            }
            Ok(Completion::SearchResults(items)) => {
                state.clear_message();
                state.set_results(render_list(items.as_deref()));
            }
            Ok(other) => {
                if let Some(message) = completion_message(&other) {
                    state.show_message(message);
                }
            }
            Err(failure) => state.show_message(StatusMessage::error(failure.user_message(kind))),
        },
        Scope::Card {
            generation, index, ..
        } => {
            let notice = match &result {
                Ok(completion) => completion_message(completion),
                Err(failure) => Some(StatusMessage::error(failure.user_message(kind))),
            };
            if generation == state.generation() {
                state.set_card_notice(index, notice);
            } else if let Some(notice) = notice {
                // Its card is gone; name the item in the global region instead.
                state.show_message(StatusMessage {
                    kind: notice.kind,
                    text: format!("{} ({target})", notice.text),
                });
            }
        }
    }
}

fn completion_message(completion: &Completion) -> Option<StatusMessage> {
    match completion {
        Completion::AudioSaved(saved) => {
            Some(StatusMessage::success(format!("Saved {}", saved.filename)))
        }
        Completion::LinkOpened { .. } => Some(StatusMessage::success(messages::LINK_OPENED)),
        Completion::Media(_) | Completion::SearchResults(_) => None,
    }
}
