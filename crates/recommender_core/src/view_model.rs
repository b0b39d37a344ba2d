use crate::{Phase, RecommendationView, SubmissionInput};

/// Everything the presentation layer renders. It performs no validation or
/// normalization of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: SubmissionInput,
    pub phase: Phase,
    pub results: Option<Vec<RecommendationView>>,
    pub error: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }
}
