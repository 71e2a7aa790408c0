use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier. The backend decides the representation, so both
/// numeric and textual ids are accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{n}"),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

/// One job opening as returned by the backend.
///
/// Fields the client does not know about are kept in `extra` so a record is
/// held exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exp: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub techs: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of a create request. Field order matches the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewJobPost {
    pub desc: String,
    pub exp: i32,
    pub profile: String,
    pub techs: Vec<String>,
}

/// Splits comma-separated technology input into trimmed, non-empty names.
///
/// `"Java, , React "` becomes `["Java", "React"]`.
pub fn split_techs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_drops_blank_entries() {
        assert_eq!(split_techs("Java, , , SQL"), vec!["Java", "SQL"]);
        assert_eq!(split_techs("Java, , React "), vec!["Java", "React"]);
        assert!(split_techs("  ,  ,").is_empty());
        assert!(split_techs("").is_empty());
    }

    #[test]
    fn split_is_idempotent_on_its_output() {
        let first = split_techs("Java, Spring Boot, React");
        assert_eq!(first, vec!["Java", "Spring Boot", "React"]);
        assert_eq!(split_techs(&first.join(", ")), first);
        assert_eq!(split_techs(&first.join(",")), first);
    }

    #[test]
    fn decodes_full_record() {
        let post: JobPost = serde_json::from_str(
            r#"{"id":3,"profile":"Backend Dev","desc":"APIs","exp":2,"techs":["Java","SQL"]}"#,
        )
        .unwrap();
        assert_eq!(post.id, Some(PostId::Number(3)));
        assert_eq!(post.profile, "Backend Dev");
        assert_eq!(post.exp, 2);
        assert_eq!(post.techs, vec!["Java", "SQL"]);
        assert!(post.extra.is_empty());
    }

    #[test]
    fn decodes_sparse_record_with_nulls_and_unknown_fields() {
        let post: JobPost = serde_json::from_str(
            r#"{"id":"abc","profile":null,"techs":null,"company":"Acme"}"#,
        )
        .unwrap();
        assert_eq!(post.id, Some(PostId::Text("abc".to_string())));
        assert_eq!(post.profile, "");
        assert_eq!(post.desc, "");
        assert_eq!(post.exp, 0);
        assert!(post.techs.is_empty());
        assert_eq!(post.extra["company"], serde_json::json!("Acme"));
    }

    #[test]
    fn new_post_serializes_in_wire_order() {
        let body = NewJobPost {
            desc: "Build APIs".to_string(),
            exp: 3,
            profile: "Backend Dev".to_string(),
            techs: vec!["Rust".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"desc":"Build APIs","exp":3,"profile":"Backend Dev","techs":["Rust"]}"#
        );
    }
}
