use crate::{JobPost, RequestSeq};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished starting; triggers the initial listing once.
    Started,
    /// User edited the job profile field.
    ProfileChanged(String),
    /// User edited the description field.
    DescChanged(String),
    /// User edited the experience field (raw text).
    ExpChanged(String),
    /// User edited the comma-separated technologies field.
    TechsChanged(String),
    /// User edited the search box.
    SearchChanged(String),
    /// User submitted the create form.
    AddPostSubmitted,
    /// User submitted the search form.
    SearchSubmitted,
    /// User clicked Show All.
    ShowAllClicked,
    /// Response for a Fetch-All or Search request. The error side carries a
    /// diagnostic description only.
    PostsLoaded {
        seq: RequestSeq,
        result: Result<Vec<JobPost>, String>,
    },
    /// Response for a create request.
    PostCreated {
        seq: RequestSeq,
        result: Result<JobPost, String>,
    },
}
