use std::path::PathBuf;

use mediafetch_core::{
    messages, update, AppState, AudioOrigin, CardRowView, Completion, Effect, Msg, OpId,
    OperationFailure, OperationKind, OperationRequest, ResultsView, SavedFile, SearchResultItem,
    StatusMessage,
};

fn dispatched(effects: &[Effect]) -> (OpId, OperationRequest) {
    match effects {
        [Effect::Dispatch { op_id, request }] => (*op_id, request.clone()),
        other => panic!("expected one dispatch, got {other:?}"),
    }
}

fn hit(title: &str, url: &str) -> SearchResultItem {
    SearchResultItem {
        title: title.to_string(),
        video_url: url.to_string(),
        ..SearchResultItem::default()
    }
}

/// A state showing three search cards; the third has no link.
fn listed() -> AppState {
    let (state, _) = update(AppState::new(), Msg::InputChanged("cats".to_string()));
    let (state, effects) = update(state, Msg::SubmitPressed);
    let (op_id, _) = dispatched(&effects);
    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id,
            result: Ok(Completion::SearchResults(Some(vec![
                hit("a", "https://v/a"),
                hit("b", "https://v/b"),
                hit("c", ""),
            ]))),
        },
    );
    state
}

fn cards(state: &AppState) -> Vec<CardRowView> {
    match state.view().results {
        ResultsView::List(cards) => cards,
        other => panic!("expected list, got {other:?}"),
    }
}

fn saved(name: &str) -> Completion {
    Completion::AudioSaved(SavedFile {
        filename: name.to_string(),
        path: PathBuf::from(name),
    })
}

#[test]
fn card_audio_is_scoped_to_its_card() {
    let (state, effects) = update(listed(), Msg::AudioRequested(AudioOrigin::Card(0)));
    let (_, request) = dispatched(&effects);
    assert_eq!(
        request,
        OperationRequest::new(OperationKind::AudioExtract, "https://v/a")
    );

    let view = state.view();
    assert!(!view.loading, "card operations never show the global indicator");
    assert!(view.submit_enabled);
    assert_eq!(view.message, None);
    let cards = cards(&state);
    assert!(cards[0].audio_pending);
    assert!(!cards[1].audio_pending);
}

#[test]
fn concurrent_card_operations_settle_independently() {
    let (state, effects) = update(listed(), Msg::AudioRequested(AudioOrigin::Card(0)));
    let (op_a, _) = dispatched(&effects);
    let (state, effects) = update(state, Msg::AudioRequested(AudioOrigin::Card(1)));
    let (op_b, _) = dispatched(&effects);
    assert_ne!(op_a, op_b);
    assert_eq!(state.in_flight_count(), 2);

    // A fails first.
    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id: op_a,
            result: Err(OperationFailure::Transport {
                status: Some(500),
                detail: "Internal Server Error".to_string(),
            }),
        },
    );
    let after_a = cards(&state);
    assert!(!after_a[0].audio_pending);
    assert_eq!(
        after_a[0].notice,
        Some(StatusMessage::error("Download failed with status: 500"))
    );
    assert!(after_a[1].audio_pending, "B is still running");
    assert_eq!(after_a[1].notice, None, "A's failure must not touch B");
    assert_eq!(state.view().message, None);

    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id: op_b,
            result: Ok(saved("b.mp3")),
        },
    );
    let after_b = cards(&state);
    assert!(!after_b[1].audio_pending);
    assert_eq!(after_b[1].notice, Some(StatusMessage::success("Saved b.mp3")));
    assert_eq!(
        after_b[0].notice,
        Some(StatusMessage::error("Download failed with status: 500"))
    );
    assert_eq!(state.in_flight_count(), 0);
}

#[test]
fn duplicate_request_for_a_pending_card_action_is_ignored() {
    let (state, effects) = update(listed(), Msg::AudioRequested(AudioOrigin::Card(1)));
    assert_eq!(effects.len(), 1);
    let (state, effects) = update(state, Msg::AudioRequested(AudioOrigin::Card(1)));
    assert!(effects.is_empty());

    // The other action on the same card is independent.
    let (state, effects) = update(state, Msg::VideoRequested { index: 1 });
    let (_, request) = dispatched(&effects);
    assert_eq!(
        request,
        OperationRequest::new(OperationKind::VideoExtract, "https://v/b")
    );
    let card = &cards(&state)[1];
    assert!(card.audio_pending && card.video_pending);
}

#[test]
fn card_operations_run_alongside_a_primary_operation() {
    let (state, effects) = update(listed(), Msg::VideoRequested { index: 0 });
    let (video_op, _) = dispatched(&effects);

    let (state, _) = update(state, Msg::InputChanged("https://x.com/v/9".to_string()));
    let (state, effects) = update(state, Msg::AudioRequested(AudioOrigin::Primary));
    assert_eq!(effects.len(), 1);
    assert!(state.view().loading);

    // A card can still be used while the primary control is busy.
    let (state, effects) = update(state, Msg::AudioRequested(AudioOrigin::Card(1)));
    assert_eq!(effects.len(), 1);

    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id: video_op,
            result: Err(OperationFailure::NoDirectLinkFound),
        },
    );
    assert!(state.view().loading, "card failure leaves the primary operation alone");
    assert_eq!(
        cards(&state)[0].notice,
        Some(StatusMessage::error(messages::NO_VIDEO_LINK))
    );
}

#[test]
fn video_extract_success_marks_card() {
    let (state, effects) = update(listed(), Msg::VideoRequested { index: 1 });
    let (op_id, _) = dispatched(&effects);
    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id,
            result: Ok(Completion::LinkOpened {
                url: "https://cdn/b.mp4".to_string(),
            }),
        },
    );
    let card = &cards(&state)[1];
    assert!(!card.video_pending);
    assert_eq!(card.notice, Some(StatusMessage::success(messages::LINK_OPENED)));
}

#[test]
fn card_without_link_gets_a_notice_and_no_dispatch() {
    let (state, effects) = update(listed(), Msg::AudioRequested(AudioOrigin::Card(2)));
    assert!(effects.is_empty());
    let card = &cards(&state)[2];
    assert!(!card.audio_pending);
    assert_eq!(
        card.notice,
        Some(StatusMessage::error(messages::MISSING_CARD_LINK))
    );
}

#[test]
fn out_of_range_card_is_reported() {
    let (state, effects) = update(listed(), Msg::VideoRequested { index: 7 });
    assert!(effects.is_empty());
    assert_eq!(state.view().message, Some(StatusMessage::error("No result #8.")));

    let (state, effects) = update(AppState::new(), Msg::AudioRequested(AudioOrigin::Card(0)));
    assert!(effects.is_empty());
    assert_eq!(state.view().message, Some(StatusMessage::error("No result #1.")));
}

#[test]
fn settlement_from_a_replaced_list_does_not_touch_new_cards() {
    let (state, effects) = update(listed(), Msg::AudioRequested(AudioOrigin::Card(0)));
    let (stale_op, _) = dispatched(&effects);

    // A new search replaces the list while the card operation runs.
    let (state, _) = update(state, Msg::InputChanged("dogs".to_string()));
    let (state, effects) = update(state, Msg::SubmitPressed);
    let (search_op, _) = dispatched(&effects);
    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id: search_op,
            result: Ok(Completion::SearchResults(Some(vec![hit("d", "https://v/d")]))),
        },
    );
    assert_eq!(state.in_flight_count(), 1);

    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id: stale_op,
            result: Ok(saved("a.mp3")),
        },
    );
    assert_eq!(state.in_flight_count(), 0);
    let fresh = &cards(&state)[0];
    assert_eq!(fresh.card.title, "d");
    assert!(!fresh.audio_pending);
    assert_eq!(fresh.notice, None);
    // The saved file is still reported, naming the item it came from.
    assert_eq!(
        state.view().message,
        Some(StatusMessage::success("Saved a.mp3 (https://v/a)"))
    );
}

#[test]
fn failure_from_a_replaced_list_is_shown_globally() {
    let (state, effects) = update(listed(), Msg::AudioRequested(AudioOrigin::Card(1)));
    let (stale_op, _) = dispatched(&effects);

    let (state, _) = update(state, Msg::InputChanged("dogs".to_string()));
    let (state, effects) = update(state, Msg::SubmitPressed);
    let (search_op, _) = dispatched(&effects);
    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id: search_op,
            result: Ok(Completion::SearchResults(Some(vec![hit("d", "https://v/d")]))),
        },
    );
    assert_eq!(state.view().message, None);
    assert_eq!(state.view().in_flight, 1);

    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id: stale_op,
            result: Err(OperationFailure::Backend {
                message: Some("FFmpeg is not installed".to_string()),
                code: Some("FFMPEG_MISSING".to_string()),
            }),
        },
    );
    let view = state.view();
    assert_eq!(view.in_flight, 0);
    assert_eq!(
        view.message,
        Some(StatusMessage::error("FFmpeg is not installed (https://v/b)"))
    );
    let fresh = &cards(&state)[0];
    assert_eq!(fresh.card.title, "d");
    assert!(!fresh.audio_pending);
    assert_eq!(fresh.notice, None);
}

#[test]
fn new_request_clears_previous_card_notice() {
    let (state, effects) = update(listed(), Msg::AudioRequested(AudioOrigin::Card(0)));
    let (op_id, _) = dispatched(&effects);
    let (state, _) = update(
        state,
        Msg::OperationSettled {
            op_id,
            result: Err(OperationFailure::Backend {
                message: None,
                code: None,
            }),
        },
    );
    assert_eq!(
        cards(&state)[0].notice,
        Some(StatusMessage::error("MP3 download failed."))
    );

    let (state, _) = update(state, Msg::AudioRequested(AudioOrigin::Card(0)));
    assert_eq!(cards(&state)[0].notice, None);
    assert!(cards(&state)[0].audio_pending);
}
