use std::collections::BTreeSet;

use portal_logging::{portal_debug, RequestTag};

use crate::view_model::{AppViewModel, PostCardView};
use crate::{DraftPost, JobPost};

/// Monotonically increasing request number; `0` is never issued.
pub type RequestSeq = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchAll,
    Create,
    Search,
}

impl Operation {
    /// Fixed user-facing message shown when this operation fails.
    pub fn error_message(self) -> &'static str {
        match self {
            Operation::FetchAll => "Oops! Couldn't load job posts. Is the backend running?",
            Operation::Create => "Failed to add job post. Please check your input and try again.",
            Operation::Search => {
                "Search failed. Ensure the backend is working or try a different keyword."
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::FetchAll => "fetch_all",
            Operation::Create => "create",
            Operation::Search => "search",
        }
    }
}

/// The listing request whose response is still wanted. Fetch-All and Search
/// share this slot: issuing either one supersedes the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListingRequest {
    seq: RequestSeq,
    op: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    posts: Vec<JobPost>,
    last_error: Option<String>,
    draft: DraftPost,
    search_term: String,
    last_seq: RequestSeq,
    listing: Option<ListingRequest>,
    creates_in_flight: BTreeSet<RequestSeq>,
    latest_create: Option<RequestSeq>,
    started: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let pending = self.pending();
        AppViewModel {
            posts: self.posts.iter().map(PostCardView::from_post).collect(),
            pending,
            last_error: self.last_error.clone(),
            show_empty_state: !pending && self.last_error.is_none() && self.posts.is_empty(),
            draft: self.draft.clone(),
            search_term: self.search_term.clone(),
        }
    }

    pub fn posts(&self) -> &[JobPost] {
        &self.posts
    }

    /// True while any request has been issued whose response is still wanted.
    pub fn pending(&self) -> bool {
        self.listing.is_some() || !self.creates_in_flight.is_empty()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn draft(&self) -> &DraftPost {
        &self.draft
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_started(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub(crate) fn draft_mut(&mut self) -> &mut DraftPost {
        self.dirty = true;
        &mut self.draft
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.dirty = true;
    }

    /// Starts a Fetch-All or Search request, superseding any listing in flight.
    pub(crate) fn begin_listing(&mut self, op: Operation) -> RequestSeq {
        let seq = self.begin(op);
        if let Some(previous) = self.listing.replace(ListingRequest { seq, op }) {
            portal_debug!(
                "{} superseded by {}",
                RequestTag::new(previous.op.name(), previous.seq),
                RequestTag::new(op.name(), seq)
            );
        }
        seq
    }

    pub(crate) fn begin_create(&mut self) -> RequestSeq {
        let seq = self.begin(Operation::Create);
        self.creates_in_flight.insert(seq);
        self.latest_create = Some(seq);
        seq
    }

    /// Applies a listing response if it answers the latest listing request.
    pub(crate) fn apply_listing(&mut self, seq: RequestSeq, result: Result<Vec<JobPost>, String>) {
        let request = match self.listing {
            Some(request) if request.seq == seq => request,
            _ => {
                portal_debug!("discarding stale listing response seq={}", seq);
                return;
            }
        };
        self.listing = None;
        match result {
            Ok(posts) => self.posts = posts,
            Err(_) => self.last_error = Some(request.op.error_message().to_string()),
        }
        self.dirty = true;
    }

    /// Applies a create response. The server record is appended whenever the
    /// request succeeded; only the latest create may reset the draft or
    /// report an error.
    pub(crate) fn apply_created(&mut self, seq: RequestSeq, result: Result<JobPost, String>) {
        if !self.creates_in_flight.remove(&seq) {
            portal_debug!("ignoring response for unknown create seq={}", seq);
            return;
        }
        let is_latest = self.latest_create == Some(seq);
        match result {
            Ok(post) => {
                self.posts.push(post);
                if is_latest {
                    self.draft = DraftPost::default();
                }
            }
            Err(_) if is_latest => {
                self.last_error = Some(Operation::Create.error_message().to_string());
            }
            Err(_) => {
                portal_debug!("dropping error from superseded create seq={}", seq);
            }
        }
        self.dirty = true;
    }

    fn begin(&mut self, op: Operation) -> RequestSeq {
        self.last_seq += 1;
        self.last_error = None;
        self.dirty = true;
        portal_debug!("begin {}", RequestTag::new(op.name(), self.last_seq));
        self.last_seq
    }
}
