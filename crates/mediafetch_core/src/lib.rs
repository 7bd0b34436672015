//! Mediafetch core: input classification, pure state machine and view-model projections.
mod classify;
mod effect;
mod media;
mod msg;
mod operation;
mod render;
mod state;
mod update;
mod view_model;

pub use classify::{classify, InputKind};
pub use effect::Effect;
pub use media::{MediaResult, SearchResponse, SearchResultItem};
pub use msg::{AudioOrigin, LinkKind, Msg};
pub use operation::{Completion, OpId, OperationFailure, OperationKind, OperationRequest, SavedFile};
pub use render::{format_duration, render_list, render_single, PLACEHOLDER_THUMBNAIL, UNKNOWN_DURATION};
pub use state::{AppState, PrimaryState};
pub use update::{messages, update};
pub use view_model::{
    AppViewModel, CardAction, CardRowView, MediaCardView, MessageKind, ResultCardView,
    ResultsView, StatusMessage,
};
