use crate::{NewJobPost, RequestSeq};

/// Network work requested by [`crate::update`]. Each effect carries the
/// sequence number its response must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `GET /allPosts`.
    FetchAll { seq: RequestSeq },
    /// `POST /post`.
    CreatePost { seq: RequestSeq, post: NewJobPost },
    /// `GET /posts/{term}` with the term exactly as typed.
    SearchPosts { seq: RequestSeq, term: String },
}

impl Effect {
    pub fn seq(&self) -> RequestSeq {
        match self {
            Effect::FetchAll { seq }
            | Effect::CreatePost { seq, .. }
            | Effect::SearchPosts { seq, .. } => *seq,
        }
    }
}
