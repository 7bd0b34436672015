use crate::{Completion, OpId, OperationFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the primary input field.
    InputChanged(String),
    /// User pressed the primary button or Enter in the input field.
    SubmitPressed,
    /// User asked for an MP3 of the primary target or of one result card.
    AudioRequested(AudioOrigin),
    /// User asked for the MP4 of a result card (0-based index).
    VideoRequested { index: usize },
    /// User clicked one of the direct links of the single-result view.
    OpenLink(LinkKind),
    /// Engine report: a dispatched operation reached its terminal state.
    OperationSettled {
        op_id: OpId,
        result: Result<Completion, OperationFailure>,
    },
    /// Fallback for unrecognised input events.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioOrigin {
    /// Global scope: the single result or the URL typed in the input field.
    Primary,
    /// Scoped to one card of the current result list (0-based index).
    Card(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Video,
    Audio,
}
