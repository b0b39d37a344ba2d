use crate::view_model::AppViewModel;
use crate::RecommendationView;

pub type RequestId = u64;

pub const MIN_RESULT_LIMIT: u32 = 1;
pub const MAX_RESULT_LIMIT: u32 = 20;
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Operator input bound to the prompt box and the result-count field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    prompt: String,
    result_limit: u32,
}

impl Default for SubmissionInput {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl SubmissionInput {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn result_limit(&self) -> u32 {
        self.result_limit
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    /// Stores `limit` clamped into `MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT`.
    pub fn set_result_limit(&mut self, limit: i64) {
        self.result_limit =
            limit.clamp(i64::from(MIN_RESULT_LIMIT), i64::from(MAX_RESULT_LIMIT)) as u32;
    }

    /// Trimmed prompt, or `None` when nothing but whitespace was entered.
    pub fn trimmed_prompt(&self) -> Option<&str> {
        let trimmed = self.prompt.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: SubmissionInput,
    phase: Phase,
    results: Option<Vec<RecommendationView>>,
    error: Option<String>,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            phase: self.phase,
            results: self.results.clone(),
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Returns whether a visible change happened since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn input_mut(&mut self) -> &mut SubmissionInput {
        self.dirty = true;
        &mut self.input
    }

    pub(crate) fn reject(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.dirty = true;
    }

    /// Enters `Submitting` for a fresh request and returns its id together with
    /// the request it replaces, if any.
    pub(crate) fn begin_request(&mut self) -> (RequestId, Option<RequestId>) {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let replaced = self.in_flight.replace(request_id);
        self.phase = Phase::Submitting;
        self.results = None;
        self.error = None;
        self.dirty = true;
        (request_id, replaced)
    }

    pub(crate) fn is_current(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    pub(crate) fn succeed(&mut self, results: Vec<RecommendationView>) {
        self.in_flight = None;
        self.phase = Phase::Succeeded;
        self.results = Some(results);
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, message: &str) {
        self.in_flight = None;
        self.phase = Phase::Failed;
        self.results = None;
        self.error = Some(message.to_string());
        self.dirty = true;
    }
}
