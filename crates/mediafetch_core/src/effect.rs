use crate::{OpId, OperationRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one backend operation; the engine answers with `Msg::OperationSettled`.
    Dispatch { op_id: OpId, request: OperationRequest },
    /// Open a direct media link without leaving the current view. Fire and forget.
    OpenLink { url: String },
}
