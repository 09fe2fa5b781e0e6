use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One element of the commit-list response; only the nested `commit` is kept.
#[derive(Clone, Debug, Deserialize)]
pub struct CommitEnvelope {
    pub commit: Commit,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Commit {
    pub author: CommitAuthor,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_commit_list_and_ignores_extra_fields() {
        let body = r#"[{
            "sha": "0123456789abcdef0123456789abcdef01234567",
            "commit": {
                "author": {"name": "Ada", "email": "ada@example.com", "date": "2023-05-06T07:08:09Z"},
                "committer": {"name": "Ada", "email": "ada@example.com", "date": "2023-05-06T07:08:09Z"},
                "message": "Fix parser\n\nLonger body"
            },
            "parents": []
        }]"#;
        let list: Vec<CommitEnvelope> = serde_json::from_str(body).unwrap();
        let commit = &list[0].commit;
        assert_eq!(commit.author.name, "Ada");
        assert_eq!(commit.message.lines().next(), Some("Fix parser"));
    }
}
