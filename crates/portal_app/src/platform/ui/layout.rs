use super::constants::*;

/// Banner printed once at startup.
pub fn header_lines() -> Vec<String> {
    vec![
        format!("== {APP_TITLE} =="),
        APP_TAGLINE.to_string(),
        "Type `help` for commands.".to_string(),
    ]
}

pub fn help_lines() -> Vec<String> {
    [
        ("profile <text>", "set the job profile / title"),
        ("desc <text>", "set the description"),
        ("exp <years>", "set years of experience"),
        ("techs <a, b, c>", "set technologies, comma-separated"),
        ("add", "submit the new job post"),
        ("find <text>", "set the search box"),
        ("search [text]", "search by keyword; blank shows everything"),
        ("all", "show all job posts"),
        ("quit", "exit"),
    ]
    .iter()
    .map(|(usage, what)| format!("  {usage:<18} {what}"))
    .collect()
}
