//! Recommender engine: outbound HTTP call and effect execution.
mod client;
mod decode;
mod engine;
mod types;

pub use client::{ClientSettings, RecommendClient, ReqwestRecommendClient, DEFAULT_ENDPOINT};
pub use decode::{decode_json, DecodeError};
pub use engine::{EngineError, EngineHandle};
pub use types::{EngineEvent, FailureKind, RecommendRequest, RequestError, RequestId};
