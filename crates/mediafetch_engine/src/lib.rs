//! Mediafetch engine: backend IO, response decoding, transfers and effect execution.
mod backend;
mod decode;
mod engine;
mod filename;
mod persist;
mod runner;
mod transfer;
mod types;

pub use backend::{Backend, BackendSettings, Endpoint, ReqwestBackend};
pub use decode::{decode, is_structured, DecodeError, TransferOutcome};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use filename::{filename_from_disposition, suggested_filename, DEFAULT_AUDIO_FILENAME};
pub use persist::{ensure_output_dir, write_new_file, PersistError};
pub use runner::OperationRunner;
pub use transfer::{BrowserLinkOpener, LinkOpener, TransferError, TransferTrigger};
pub use types::{EngineEvent, FailureKind, FetchError, RawResponse};
