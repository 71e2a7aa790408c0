use crate::{DraftPost, JobPost, PostId};

pub const LOADING_TEXT: &str = "Loading job posts...";
pub const EMPTY_STATE_TEXT: &str = "No job posts found. Be the first to add one!";
pub const FALLBACK_PROFILE: &str = "Job Opportunity";
pub const FALLBACK_DESC: &str = "No description provided.";
pub const FALLBACK_TECHS: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub posts: Vec<PostCardView>,
    pub pending: bool,
    pub last_error: Option<String>,
    /// Not pending, no error and nothing to show.
    pub show_empty_state: bool,
    pub draft: DraftPost,
    pub search_term: String,
}

/// Display-ready text for one post card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCardView {
    pub id: Option<PostId>,
    pub title: String,
    pub description: String,
    pub experience: String,
    pub technologies: String,
}

impl PostCardView {
    pub(crate) fn from_post(post: &JobPost) -> Self {
        Self {
            id: post.id.clone(),
            title: or_fallback(&post.profile, FALLBACK_PROFILE),
            description: or_fallback(&post.desc, FALLBACK_DESC),
            experience: format!("{} years", post.exp),
            technologies: if post.techs.is_empty() {
                FALLBACK_TECHS.to_string()
            } else {
                post.techs.join(", ")
            },
        }
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
