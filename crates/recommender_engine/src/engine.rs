use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use recommender_logging::{rec_debug, rec_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, RecommendClient, ReqwestRecommendClient};
use crate::{EngineEvent, FailureKind, RecommendRequest, RequestError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] RequestError),
}

enum EngineCommand {
    Send {
        request_id: RequestId,
        request: RecommendRequest,
    },
    Cancel {
        request_id: RequestId,
    },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Owns a worker thread with its own runtime. Requests go in over `send`,
/// completions come back as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestRecommendClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn RecommendClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let in_flight: InFlight = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &client, &in_flight, command, &event_tx);
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn send(&self, request_id: RequestId, request: RecommendRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Send {
            request_id,
            request,
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: &Arc<dyn RecommendClient>,
    in_flight: &InFlight,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Send {
            request_id,
            request,
        } => {
            let token = CancellationToken::new();
            if let Ok(mut map) = in_flight.lock() {
                map.insert(request_id, token.clone());
            }
            let client = client.clone();
            let in_flight = in_flight.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = tokio::select! {
                    _ = token.cancelled() => {
                        Err(RequestError::new(FailureKind::Cancelled, "replaced by a newer request"))
                    }
                    result = client.recommend(&request) => result,
                };
                if let Ok(mut map) = in_flight.lock() {
                    map.remove(&request_id);
                }
                if let Err(err) = &result {
                    rec_warn!("Request {} failed: {}", request_id, err);
                }
                let _ = event_tx.send(EngineEvent::Completed { request_id, result });
            });
        }
        EngineCommand::Cancel { request_id } => {
            let token = in_flight
                .lock()
                .ok()
                .and_then(|mut map| map.remove(&request_id));
            match token {
                Some(token) => token.cancel(),
                None => rec_debug!("Cancel for request {} ignored: not in flight", request_id),
            }
        }
    }
}
