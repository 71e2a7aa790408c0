use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use portal_core::{Effect, Msg};
use portal_engine::{ApiError, ApiSettings, EngineError, EngineEvent, EngineHandle, FailureKind};
use portal_logging::{portal_debug, portal_info, portal_warn};

use super::app::AppEvent;

/// Executes effects produced by the state machine.
pub trait EffectSink {
    fn run(&mut self, effects: Vec<Effect>);
    fn shutdown(&mut self);
}

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings, tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        portal_info!("Using backend at {}", settings.base_url);
        let engine = Arc::new(EngineHandle::new(settings)?);
        let runner = Self { engine };
        runner.spawn_event_loop(tx);
        Ok(runner)
    }

    /// Forwards engine results back into the message loop.
    fn spawn_event_loop(&self, tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            while !engine.is_shut_down() {
                let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                    continue;
                };
                if tx.send(AppEvent::Msg(event_to_msg(event))).is_err() {
                    break;
                }
            }
            portal_debug!("engine event loop stopped");
        });
    }
}

impl EffectSink for EffectRunner {
    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchAll { seq } => self.engine.fetch_all(seq),
                Effect::CreatePost { seq, post } => self.engine.create(seq, post),
                Effect::SearchPosts { seq, term } => self.engine.search(seq, term),
            }
        }
    }

    fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Listed { seq, result } => Msg::PostsLoaded {
            seq,
            result: result.map_err(|err| describe_failure("listing", seq, err)),
        },
        EngineEvent::Created { seq, result } => Msg::PostCreated {
            seq,
            result: result.map_err(|err| describe_failure("create", seq, err)),
        },
    }
}

fn describe_failure(op: &str, seq: u64, err: ApiError) -> String {
    if err.kind == FailureKind::Cancelled {
        portal_debug!("{} seq={} cancelled", op, seq);
    } else {
        portal_warn!("{} seq={} failed: {}", op, seq, err);
    }
    err.to_string()
}
