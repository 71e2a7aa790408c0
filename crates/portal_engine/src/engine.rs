use std::future::Future;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use portal_core::{NewJobPost, RequestSeq};
use portal_logging::{portal_debug, portal_info, RequestTag};
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, JobPostApi, ReqwestApi};
use crate::{ApiError, EngineError, EngineEvent, FailureKind};

enum EngineCommand {
    FetchAll { seq: RequestSeq },
    Create { seq: RequestSeq, post: NewJobPost },
    Search { seq: RequestSeq, term: String },
}

/// Runs backend requests on a background tokio runtime.
///
/// Every command yields exactly one [`EngineEvent`]. Listing commands
/// (Fetch-All and Search) supersede each other: issuing one cancels the
/// listing still in flight. Creates are never cancelled once sent, except by
/// [`EngineHandle::shutdown`], which abandons everything.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
    session: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn JobPostApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let session = CancellationToken::new();
        let worker_session = session.clone();

        thread::spawn(move || {
            let mut listing: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                let token = match command {
                    EngineCommand::FetchAll { .. } | EngineCommand::Search { .. } => {
                        let token = worker_session.child_token();
                        if let Some(previous) = listing.replace(token.clone()) {
                            previous.cancel();
                        }
                        token
                    }
                    EngineCommand::Create { .. } => worker_session.child_token(),
                };
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, token, event_tx).await;
                });
            }
            portal_debug!("engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
            session,
        })
    }

    pub fn fetch_all(&self, seq: RequestSeq) {
        self.send(EngineCommand::FetchAll { seq });
    }

    pub fn create(&self, seq: RequestSeq, post: NewJobPost) {
        self.send(EngineCommand::Create { seq, post });
    }

    pub fn search(&self, seq: RequestSeq, term: impl Into<String>) {
        self.send(EngineCommand::Search {
            seq,
            term: term.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    /// Abandons all in-flight requests. Their events report `Cancelled`.
    pub fn shutdown(&self) {
        self.session.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.session.is_cancelled()
    }

    fn send(&self, command: EngineCommand) {
        if self.session.is_cancelled() {
            portal_debug!("engine shut down; dropping command");
            return;
        }
        let _ = self.cmd_tx.send(command);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.session.cancel();
    }
}

async fn handle_command(
    api: &dyn JobPostApi,
    command: EngineCommand,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchAll { seq } => {
            let tag = RequestTag::new("fetch_all", seq);
            portal_info!("{} GET /allPosts", tag);
            EngineEvent::Listed {
                seq,
                result: cancellable(&token, tag, api.fetch_all()).await,
            }
        }
        EngineCommand::Search { seq, term } => {
            let tag = RequestTag::new("search", seq);
            portal_info!("{} GET /posts/{}", tag, term);
            EngineEvent::Listed {
                seq,
                result: cancellable(&token, tag, api.search(&term)).await,
            }
        }
        EngineCommand::Create { seq, post } => {
            let tag = RequestTag::new("create", seq);
            portal_info!("{} POST /post profile={:?}", tag, post.profile);
            EngineEvent::Created {
                seq,
                result: cancellable(&token, tag, api.create(&post)).await,
            }
        }
    };
    let _ = event_tx.send(event);
}

async fn cancellable<T>(
    token: &CancellationToken,
    tag: RequestTag,
    request: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        _ = token.cancelled() => {
            portal_debug!("{} abandoned", tag);
            Err(ApiError::new(FailureKind::Cancelled, "request abandoned"))
        }
        result = request => result,
    }
}
