//! Job portal core: pure request/state machine and view-model helpers.
mod draft;
mod effect;
mod msg;
mod post;
mod state;
mod update;
mod view_model;

pub use draft::{DraftPost, FormIssue, DEFAULT_EXP};
pub use effect::Effect;
pub use msg::Msg;
pub use post::{split_techs, JobPost, NewJobPost, PostId};
pub use state::{AppState, Operation, RequestSeq};
pub use update::update;
pub use view_model::{
    AppViewModel, PostCardView, EMPTY_STATE_TEXT, FALLBACK_DESC, FALLBACK_PROFILE,
    FALLBACK_TECHS, LOADING_TEXT,
};
