//! Job portal engine: HTTP access to the posts backend and effect execution.
mod api;
mod engine;
mod types;

pub use api::{ApiSettings, JobPostApi, ReqwestApi};
pub use engine::EngineHandle;
pub use types::{ApiError, EngineError, EngineEvent, FailureKind};
