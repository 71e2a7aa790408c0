use std::fmt;

use crate::post::{split_techs, NewJobPost};

/// Experience value the create form starts with and resets to.
pub const DEFAULT_EXP: &str = "0";

/// Uncommitted create-form input, held exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPost {
    pub profile: String,
    pub desc: String,
    pub exp: String,
    /// Raw comma-separated technologies, split only on submit.
    pub techs_text: String,
}

impl Default for DraftPost {
    fn default() -> Self {
        Self {
            profile: String::new(),
            desc: String::new(),
            exp: DEFAULT_EXP.to_string(),
            techs_text: String::new(),
        }
    }
}

/// A form-level constraint the draft does not satisfy yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIssue {
    MissingProfile,
    MissingDesc,
    InvalidExp,
    NegativeExp,
}

impl fmt::Display for FormIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormIssue::MissingProfile => write!(f, "job profile is required"),
            FormIssue::MissingDesc => write!(f, "description is required"),
            FormIssue::InvalidExp => write!(f, "experience must be a whole number"),
            FormIssue::NegativeExp => write!(f, "experience cannot be negative"),
        }
    }
}

impl DraftPost {
    /// Checks the required-field constraints a form enforces before submit.
    pub fn form_issues(&self) -> Vec<FormIssue> {
        let mut issues = Vec::new();
        if self.profile.is_empty() {
            issues.push(FormIssue::MissingProfile);
        }
        if self.desc.is_empty() {
            issues.push(FormIssue::MissingDesc);
        }
        match parse_exp(&self.exp) {
            None => issues.push(FormIssue::InvalidExp),
            Some(exp) if exp < 0 => issues.push(FormIssue::NegativeExp),
            Some(_) => {}
        }
        issues
    }

    /// Builds the create request body. Returns `None` only when `exp` is not
    /// an integer; the other fields are passed through as typed and the sign
    /// of `exp` is left to `form_issues`.
    pub fn to_new_post(&self) -> Option<NewJobPost> {
        Some(NewJobPost {
            desc: self.desc.clone(),
            exp: parse_exp(&self.exp)?,
            profile: self.profile.clone(),
            techs: split_techs(&self.techs_text),
        })
    }
}

fn parse_exp(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_starts_with_zero_experience() {
        let draft = DraftPost::default();
        assert_eq!(draft.exp, "0");
        assert_eq!(
            draft.form_issues(),
            vec![FormIssue::MissingProfile, FormIssue::MissingDesc]
        );
    }

    #[test]
    fn to_new_post_splits_techs_and_parses_exp() {
        let draft = DraftPost {
            profile: "Data Scientist".to_string(),
            desc: "Models".to_string(),
            exp: " 4 ".to_string(),
            techs_text: "Python, , SQL ".to_string(),
        };
        assert!(draft.form_issues().is_empty());
        let post = draft.to_new_post().unwrap();
        assert_eq!(post.exp, 4);
        assert_eq!(post.techs, vec!["Python", "SQL"]);
        assert_eq!(post.profile, "Data Scientist");
    }

    #[test]
    fn non_numeric_exp_is_a_form_issue() {
        let draft = DraftPost {
            profile: "Dev".to_string(),
            desc: "Code".to_string(),
            exp: "three".to_string(),
            techs_text: String::new(),
        };
        assert_eq!(draft.form_issues(), vec![FormIssue::InvalidExp]);
        assert!(draft.to_new_post().is_none());
    }

    #[test]
    fn negative_exp_is_a_form_issue() {
        let draft = DraftPost {
            profile: "Dev".to_string(),
            desc: "Code".to_string(),
            exp: "-3".to_string(),
            techs_text: String::new(),
        };
        assert_eq!(draft.form_issues(), vec![FormIssue::NegativeExp]);
        assert_eq!(
            FormIssue::NegativeExp.to_string(),
            "experience cannot be negative"
        );

        let zero = DraftPost {
            exp: "0".to_string(),
            ..draft
        };
        assert!(zero.form_issues().is_empty());
    }
}
