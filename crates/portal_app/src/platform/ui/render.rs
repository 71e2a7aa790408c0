use portal_core::{AppViewModel, PostCardView, EMPTY_STATE_TEXT, LOADING_TEXT};

use super::constants::*;

/// Projects the view model onto terminal lines: form, search box, then results.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(RULE.to_string());
    lines.push(format!("[{SECTION_POST}]"));
    lines.push(field(LABEL_PROFILE, &view.draft.profile));
    lines.push(field(LABEL_DESC, &view.draft.desc));
    lines.push(field(LABEL_EXP, &view.draft.exp));
    lines.push(field(LABEL_TECHS, &view.draft.techs_text));
    lines.push(format!(
        "  {}",
        button(
            if view.pending { BUTTON_ADD_PENDING } else { BUTTON_ADD },
            view.pending
        )
    ));

    lines.push(format!("[{SECTION_FIND}]"));
    lines.push(field(LABEL_SEARCH, &view.search_term));
    lines.push(format!(
        "  {} {}",
        button(
            if view.pending { BUTTON_SEARCH_PENDING } else { BUTTON_SEARCH },
            view.pending
        ),
        button(BUTTON_SHOW_ALL, view.pending)
    ));

    lines.push(format!("[{SECTION_OPENINGS}]"));
    if view.pending {
        lines.push(LOADING_TEXT.to_string());
    }
    if let Some(error) = &view.last_error {
        lines.push(format!("Error: {error}"));
    }
    if view.show_empty_state {
        lines.push(EMPTY_STATE_TEXT.to_string());
    }
    for card in &view.posts {
        lines.extend(format_card(card));
    }
    lines.push(RULE.to_string());

    lines
}

fn field(label: &str, value: &str) -> String {
    format!("  {label}: {value}")
}

fn button(text: &str, disabled: bool) -> String {
    if disabled {
        format!("({text})")
    } else {
        format!("[{text}]")
    }
}

fn format_card(card: &PostCardView) -> Vec<String> {
    let heading = match &card.id {
        Some(id) => format!("* #{id} {}", card.title),
        None => format!("* {}", card.title),
    };
    vec![
        heading,
        format!("    {}", card.description),
        format!("    Experience: {}", card.experience),
        format!("    Technologies: {}", card.technologies),
    ]
}
