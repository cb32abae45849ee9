use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::color::Color;
use super::record::{parse_date, CommitRecord};
use super::refs::RefName;

/// A commit node in the DAG
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitNode {
    /// Graph key: fixed-length prefix of `id`
    pub short_id: String,
    /// Full commit id
    pub id: String,
    pub author: String,
    pub author_date: String,
    pub committer: String,
    pub commit_date: String,
    pub message: String,
    /// Short ids of the parents, in commit order
    pub parents: Vec<String>,
    /// Raw reference strings, copied verbatim from the record
    pub refs: Vec<String>,
    /// Branch this commit was first introduced on, set by attribution
    pub branch: Option<String>,
    /// Set by colorization
    pub color: Option<Color>,
}

/// Derive the graph key for a full commit id
pub fn short_id(full_id: &str, len: usize) -> String {
    full_id.get(..len).unwrap_or(full_id).to_ascii_lowercase()
}

impl CommitNode {
    pub fn from_record(record: &CommitRecord, short_id_len: usize) -> Self {
        Self {
            short_id: short_id(&record.commit, short_id_len),
            id: record.commit.clone(),
            author: record.author.clone(),
            author_date: record.author_date.clone(),
            committer: record.committer.clone(),
            commit_date: record.commit_date.clone(),
            message: record.message.clone(),
            parents: record
                .parents
                .iter()
                .map(|p| short_id(p, short_id_len))
                .collect(),
            refs: record.refs.clone(),
            branch: None,
            color: None,
        }
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Any reference at all points here, branch or not
    pub fn is_branch_head(&self) -> bool {
        !self.refs.is_empty()
    }

    pub fn ref_names(&self) -> impl Iterator<Item = RefName> + '_ {
        self.refs.iter().map(|r| RefName::parse(r))
    }

    pub fn commit_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_date(&self.commit_date)
    }

    pub fn author_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_date(&self.author_date)
    }
}
