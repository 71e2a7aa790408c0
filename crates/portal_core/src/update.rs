use portal_logging::portal_warn;

use crate::{AppState, Effect, Msg, Operation};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.mark_started() {
                fetch_all(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::ProfileChanged(text) => {
            state.draft_mut().profile = text;
            Vec::new()
        }
        Msg::DescChanged(text) => {
            state.draft_mut().desc = text;
            Vec::new()
        }
        Msg::ExpChanged(text) => {
            state.draft_mut().exp = text;
            Vec::new()
        }
        Msg::TechsChanged(text) => {
            state.draft_mut().techs_text = text;
            Vec::new()
        }
        Msg::SearchChanged(text) => {
            state.set_search_term(text);
            Vec::new()
        }
        Msg::AddPostSubmitted => match state.draft().to_new_post() {
            Some(post) => {
                let seq = state.begin_create();
                vec![Effect::CreatePost { seq, post }]
            }
            None => {
                // The form layer is expected to block this; nothing to send.
                portal_warn!("create submitted with non-integer exp {:?}", state.draft().exp);
                Vec::new()
            }
        },
        Msg::SearchSubmitted => {
            if state.search_term().trim().is_empty() {
                fetch_all(&mut state)
            } else {
                let term = state.search_term().to_owned();
                let seq = state.begin_listing(Operation::Search);
                vec![Effect::SearchPosts { seq, term }]
            }
        }
        Msg::ShowAllClicked => fetch_all(&mut state),
        Msg::PostsLoaded { seq, result } => {
            state.apply_listing(seq, result);
            Vec::new()
        }
        Msg::PostCreated { seq, result } => {
            state.apply_created(seq, result);
            Vec::new()
        }
    };

    (state, effects)
}

fn fetch_all(state: &mut AppState) -> Vec<Effect> {
    let seq = state.begin_listing(Operation::FetchAll);
    vec![Effect::FetchAll { seq }]
}
