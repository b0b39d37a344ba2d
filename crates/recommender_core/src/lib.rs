//! Recommender core: pure request lifecycle state machine, response
//! normalization and view-model helpers.
mod effect;
mod msg;
mod normalize;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{FailureReason, Msg, ResponseOutcome};
pub use normalize::{
    normalize_response, skill_code, AssessmentDuration, DropReason, DroppedEntry,
    MalformedResponse, NormalizedResponse, RecommendationView,
};
pub use state::{
    AppState, Phase, RequestId, SubmissionInput, DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT,
    MIN_RESULT_LIMIT,
};
pub use update::{update, EMPTY_PROMPT_MESSAGE, FETCH_FAILED_MESSAGE};
pub use view_model::AppViewModel;
