use recommender_logging::{rec_debug, rec_info, rec_warn};

use crate::{normalize_response, AppState, Effect, Msg, ResponseOutcome};

pub const EMPTY_PROMPT_MESSAGE: &str = "Prompt cannot be empty.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch recommendation.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PromptChanged(prompt) => {
            state.input_mut().set_prompt(prompt);
            Vec::new()
        }
        Msg::ResultLimitChanged(limit) => {
            state.input_mut().set_result_limit(limit);
            Vec::new()
        }
        Msg::Submitted => {
            let Some(prompt) = state.input().trimmed_prompt().map(ToOwned::to_owned) else {
                rec_debug!("Submit rejected: empty prompt");
                state.reject(EMPTY_PROMPT_MESSAGE);
                return (state, Vec::new());
            };
            let top_k = state.input().result_limit();
            // A newer submit replaces whatever is still in flight.
            let (request_id, replaced) = state.begin_request();
            let mut effects = Vec::with_capacity(2);
            if let Some(old) = replaced {
                rec_info!("Request {} replaced by {}", old, request_id);
                effects.push(Effect::CancelRequest { request_id: old });
            }
            effects.push(Effect::SendRequest {
                request_id,
                prompt,
                top_k,
            });
            effects
        }
        Msg::ResponseReceived {
            request_id,
            outcome,
        } => {
            if !state.is_current(request_id) {
                rec_debug!("Ignoring stale response for request {}", request_id);
                return (state, Vec::new());
            }
            match outcome {
                ResponseOutcome::Payload(body) => {
                    let normalized = normalize_response(&body);
                    for dropped in &normalized.dropped {
                        rec_warn!(
                            "Request {}: dropped entry {}: {}",
                            request_id,
                            dropped.index,
                            dropped.reason
                        );
                    }
                    match normalized.malformed {
                        Some(malformed) => {
                            rec_warn!("Request {}: malformed response: {}", request_id, malformed);
                            state.fail(FETCH_FAILED_MESSAGE);
                        }
                        None => {
                            rec_info!(
                                "Request {}: {} recommendations",
                                request_id,
                                normalized.results.len()
                            );
                            state.succeed(normalized.results);
                        }
                    }
                }
                ResponseOutcome::Failed(reason) => {
                    rec_warn!("Request {} failed: {}", request_id, reason);
                    state.fail(FETCH_FAILED_MESSAGE);
                }
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
