use std::time::Duration;

use recommender_core::{Effect, FailureReason, Msg, ResponseOutcome};
use recommender_engine::{EngineEvent, EngineHandle, FailureKind, RecommendRequest};
use recommender_logging::rec_info;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendRequest {
                    request_id,
                    prompt,
                    top_k,
                } => {
                    rec_info!(
                        "SendRequest request_id={} top_k={} prompt_len={}",
                        request_id,
                        top_k,
                        prompt.len()
                    );
                    self.engine
                        .send(request_id, RecommendRequest { prompt, top_k });
                }
                Effect::CancelRequest { request_id } => {
                    rec_info!("CancelRequest request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    /// Blocks until the engine reports a completion or `timeout` passes.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed { request_id, result } => Msg::ResponseReceived {
            request_id,
            outcome: match result {
                Ok(body) => ResponseOutcome::Payload(body),
                Err(err) => ResponseOutcome::Failed(map_failure(&err.kind)),
            },
        },
    }
}

fn map_failure(kind: &FailureKind) -> FailureReason {
    match kind {
        FailureKind::HttpStatus(code) => FailureReason::HttpStatus(*code),
        FailureKind::Timeout => FailureReason::Timeout,
        FailureKind::InvalidBody | FailureKind::TooLarge { .. } => FailureReason::InvalidBody,
        FailureKind::Cancelled => FailureReason::Cancelled,
        FailureKind::InvalidEndpoint
        | FailureKind::RedirectLimitExceeded
        | FailureKind::Network => FailureReason::Network,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recommender_engine::RequestError;
    use serde_json::json;

    #[test]
    fn maps_completion_payload() {
        let msg = event_to_msg(EngineEvent::Completed {
            request_id: 3,
            result: Ok(json!({ "recommendations": [] })),
        });

        assert_eq!(
            msg,
            Msg::ResponseReceived {
                request_id: 3,
                outcome: ResponseOutcome::Payload(json!({ "recommendations": [] })),
            }
        );
    }

    #[test]
    fn maps_failure_kinds() {
        let cases = [
            (FailureKind::HttpStatus(500), FailureReason::HttpStatus(500)),
            (FailureKind::Timeout, FailureReason::Timeout),
            (FailureKind::InvalidBody, FailureReason::InvalidBody),
            (
                FailureKind::TooLarge {
                    max_bytes: 1,
                    actual: Some(2),
                },
                FailureReason::InvalidBody,
            ),
            (FailureKind::Cancelled, FailureReason::Cancelled),
            (FailureKind::Network, FailureReason::Network),
        ];

        for (kind, expected) in cases {
            let msg = event_to_msg(EngineEvent::Completed {
                request_id: 1,
                result: Err(RequestError {
                    kind,
                    message: "x".to_string(),
                }),
            });
            assert_eq!(
                msg,
                Msg::ResponseReceived {
                    request_id: 1,
                    outcome: ResponseOutcome::Failed(expected),
                }
            );
        }
    }
}
