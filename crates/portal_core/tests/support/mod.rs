#![allow(dead_code)]

use std::sync::Once;

use portal_core::{update, AppState, Effect, JobPost, Msg, PostId};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(portal_logging::initialize_for_tests);
}

pub fn post(id: i64, profile: &str) -> JobPost {
    JobPost {
        id: Some(PostId::Number(id)),
        profile: profile.to_string(),
        desc: format!("{profile} role"),
        exp: 2,
        techs: vec!["Rust".to_string()],
        extra: Default::default(),
    }
}

/// Runs startup and answers the initial listing with `posts`.
pub fn started_with(posts: Vec<JobPost>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::Started);
    let seq = only_seq(&effects);
    let (state, _) = update(state, Msg::PostsLoaded { seq, result: Ok(posts) });
    state
}

pub fn only_seq(effects: &[Effect]) -> u64 {
    assert_eq!(effects.len(), 1, "expected exactly one effect: {effects:?}");
    effects[0].seq()
}

pub fn fill_draft(state: AppState, profile: &str, desc: &str, exp: &str, techs: &str) -> AppState {
    let (state, _) = update(state, Msg::ProfileChanged(profile.to_string()));
    let (state, _) = update(state, Msg::DescChanged(desc.to_string()));
    let (state, _) = update(state, Msg::ExpChanged(exp.to_string()));
    let (state, _) = update(state, Msg::TechsChanged(techs.to_string()));
    state
}

pub fn search(state: AppState, term: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::SearchChanged(term.to_string()));
    update(state, Msg::SearchSubmitted)
}
