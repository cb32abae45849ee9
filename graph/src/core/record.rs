use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};

/// Date layout written by `git log --pretty=fuller`
const GIT_DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y %z";

/// One commit as delivered by the history crawler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full hex commit id
    pub commit: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "AuthorDate")]
    pub author_date: String,
    #[serde(rename = "Commit")]
    pub committer: String,
    #[serde(rename = "CommitDate")]
    pub commit_date: String,
    pub message: String,
    /// Full ids of the parents, empty for a root commit
    #[serde(default)]
    pub parents: Vec<String>,
    /// Raw reference decorations pointing at this commit
    #[serde(default)]
    pub refs: Vec<String>,
}

impl CommitRecord {
    /// Check the fields graph construction depends on
    pub fn validate(&self, index: usize, short_id_len: usize) -> Result<()> {
        let malformed = |reason: String| HistoryError::MalformedRecord { index, reason };

        if self.commit.is_empty() {
            return Err(malformed("missing commit id".to_string()));
        }
        if !is_hex(&self.commit) {
            return Err(malformed(format!("commit id '{}' is not hexadecimal", self.commit)));
        }
        if self.commit.len() < short_id_len {
            return Err(malformed(format!(
                "commit id '{}' is shorter than {} characters",
                self.commit, short_id_len
            )));
        }
        for parent in &self.parents {
            if parent.is_empty() || !is_hex(parent) {
                return Err(malformed(format!("parent id '{}' is not hexadecimal", parent)));
            }
        }
        Ok(())
    }

    pub fn author_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_date(&self.author_date)
    }

    pub fn commit_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_date(&self.commit_date)
    }
}

fn is_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a git or RFC 3339 date, `None` when neither layout fits
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, GIT_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn record(commit: &str, parents: &[&str]) -> CommitRecord {
        CommitRecord {
            commit: commit.to_string(),
            author: "Ada <ada@example.com>".to_string(),
            author_date: "Tue Aug 14 14:45:14 2018 +0200".to_string(),
            committer: "Ada <ada@example.com>".to_string(),
            commit_date: "2018-08-14T12:45:14Z".to_string(),
            message: "msg".to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            refs: Vec::new(),
        }
    }

    #[test]
    fn deserializes_crawler_field_names() {
        let json = r#"{
            "commit": "0123456789abcdef",
            "Author": "Ada",
            "AuthorDate": "Tue Aug 14 14:45:14 2018 +0200",
            "Commit": "Bob",
            "CommitDate": "Tue Aug 14 14:45:14 2018 +0200",
            "message": "Initial import",
            "parents": []
        }"#;
        let rec: CommitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.committer, "Bob");
        assert!(rec.refs.is_empty());
    }

    #[test]
    fn missing_required_field_fails_to_deserialize() {
        let json = r#"{ "commit": "0123456789abcdef", "message": "x" }"#;
        assert!(serde_json::from_str::<CommitRecord>(json).is_err());
    }

    #[test]
    fn parses_both_date_layouts() {
        let rec = record("0123456789", &[]);
        let authored = rec.author_time().unwrap();
        assert_eq!((authored.year(), authored.hour()), (2018, 14));
        assert_eq!(authored.offset().local_minus_utc(), 2 * 3600);

        let committed = rec.commit_time().unwrap();
        assert_eq!(committed, authored);
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn validation() {
        assert!(record("0123456789", &["abcdef0123"]).validate(0, 7).is_ok());

        let err = record("", &[]).validate(3, 7).unwrap_err();
        assert!(matches!(err, HistoryError::MalformedRecord { index: 3, .. }));

        assert!(record("01234", &[]).validate(0, 7).is_err());
        assert!(record("xyz0123456", &[]).validate(0, 7).is_err());
        assert!(record("0123456789", &[""]).validate(0, 7).is_err());
    }
}
