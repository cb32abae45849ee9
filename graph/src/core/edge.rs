use serde::Serialize;

use super::color::Color;

/// An edge connecting a parent commit to its child
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Parent short id
    pub from: String,
    /// Child short id
    pub to: String,
    pub edge_type: EdgeType,
    /// Color of the branch the parent belongs to, set by colorization
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeType {
    /// Regular parent-child relationship
    Regular,
    /// One of several parents of a merge commit
    Merge,
}

impl Edge {
    pub fn new(from: String, to: String) -> Self {
        Self {
            from,
            to,
            edge_type: EdgeType::Regular,
            color: None,
        }
    }

    pub fn merge(from: String, to: String) -> Self {
        Self {
            from,
            to,
            edge_type: EdgeType::Merge,
            color: None,
        }
    }
}
