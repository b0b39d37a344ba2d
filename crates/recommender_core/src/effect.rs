use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one POST for this submit action.
    SendRequest {
        request_id: RequestId,
        prompt: String,
        top_k: u32,
    },
    /// Abandon a request that was replaced by a newer submit.
    CancelRequest { request_id: RequestId },
}
