use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use smallvec::SmallVec;

use super::color::Color;
use super::{edge::Edge, node::CommitNode};

/// Position of a node in the arena
pub type NodeIdx = usize;

type EdgeList = SmallVec<[usize; 2]>;

/// Directed Acyclic Graph representing commit history.
///
/// Nodes live in an arena in insertion order and are looked up by short id.
/// Edges point from parent to child.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dag {
    nodes: Vec<CommitNode>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, NodeIdx>,
    /// Per node: indices of edges to its children
    #[serde(skip)]
    outgoing: Vec<EdgeList>,
    /// Per node: indices of edges from its known parents
    #[serde(skip)]
    incoming: Vec<EdgeList>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; on a short id clash the index of the existing node is returned as the error
    pub(crate) fn insert_node(&mut self, node: CommitNode) -> Result<NodeIdx, NodeIdx> {
        if let Some(&existing) = self.index.get(&node.short_id) {
            return Err(existing);
        }
        let idx = self.nodes.len();
        self.index.insert(node.short_id.clone(), idx);
        self.nodes.push(node);
        self.outgoing.push(EdgeList::new());
        self.incoming.push(EdgeList::new());
        Ok(idx)
    }

    /// Link `parent` to `child`; a pair that is already linked is left alone.
    /// The edge is a merge edge when more than one of the child's parents is in the graph.
    pub(crate) fn add_edge(&mut self, parent: NodeIdx, child: NodeIdx) {
        if self.outgoing[parent]
            .iter()
            .any(|&e| self.edges[e].to == self.nodes[child].short_id)
        {
            return;
        }
        let from = self.nodes[parent].short_id.clone();
        let to = self.nodes[child].short_id.clone();
        let known_parents = self.nodes[child]
            .parents
            .iter()
            .filter(|p| self.index.contains_key(p.as_str()))
            .count();
        let edge = if known_parents > 1 {
            Edge::merge(from, to)
        } else {
            Edge::new(from, to)
        };

        let edge_idx = self.edges.len();
        self.edges.push(edge);
        self.outgoing[parent].push(edge_idx);
        self.incoming[child].push(edge_idx);
    }

    /// Color every edge leaving `idx`
    pub(crate) fn stamp_outgoing(&mut self, idx: NodeIdx, color: Color) {
        for &edge_idx in &self.outgoing[idx] {
            self.edges[edge_idx].color = Some(color);
        }
    }

    pub fn lookup(&self, short_id: &str) -> Option<NodeIdx> {
        self.index.get(short_id).copied()
    }

    pub fn get(&self, short_id: &str) -> Option<&CommitNode> {
        self.lookup(short_id).map(|idx| &self.nodes[idx])
    }

    /// Panics if `idx` did not come from this graph
    pub fn node(&self, idx: NodeIdx) -> &CommitNode {
        &self.nodes[idx]
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut CommitNode {
        &mut self.nodes[idx]
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        let parent = self.lookup(from)?;
        self.outgoing[parent]
            .iter()
            .map(|&e| &self.edges[e])
            .find(|edge| edge.to == to)
    }

    pub fn outgoing_edges(&self, idx: NodeIdx) -> impl Iterator<Item = &Edge> {
        self.outgoing[idx].iter().map(|&e| &self.edges[e])
    }

    /// Arena indices of the parents present in this graph, in commit order
    pub fn parent_indices(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        self.nodes[idx]
            .parents
            .iter()
            .filter_map(|p| self.lookup(p))
            .collect()
    }

    /// Nodes with at least one reference, in insertion order
    pub fn branch_heads(&self) -> Vec<NodeIdx> {
        (0..self.nodes.len())
            .filter(|&idx| self.nodes[idx].is_branch_head())
            .collect()
    }

    /// Commits with no parent inside this graph
    pub fn roots(&self) -> Vec<&CommitNode> {
        (0..self.nodes.len())
            .filter(|&idx| self.incoming[idx].is_empty())
            .map(|idx| &self.nodes[idx])
            .collect()
    }

    /// Get all leaf commits (no children)
    pub fn leaves(&self) -> Vec<&CommitNode> {
        (0..self.nodes.len())
            .filter(|&idx| self.outgoing[idx].is_empty())
            .map(|idx| &self.nodes[idx])
            .collect()
    }

    /// Get children of a commit
    pub fn get_children(&self, short_id: &str) -> Vec<&CommitNode> {
        self.lookup(short_id)
            .map(|idx| {
                self.outgoing_edges(idx)
                    .filter_map(|edge| self.get(&edge.to))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get parents of a commit that are present in this graph
    pub fn get_parents(&self, short_id: &str) -> Vec<&CommitNode> {
        self.lookup(short_id)
            .map(|idx| {
                self.parent_indices(idx)
                    .into_iter()
                    .map(|p| &self.nodes[p])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Count of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if DAG contains orphan branches
    pub fn has_orphan_branches(&self) -> bool {
        self.roots().len() > 1
    }

    /// Get statistics about the DAG
    pub fn stats(&self) -> DagStats {
        let merge_commits = self.nodes.iter().filter(|n| n.is_merge()).count();
        let branch_heads = self.nodes.iter().filter(|n| n.is_branch_head()).count();
        let attributed = self.nodes.iter().filter(|n| n.branch.is_some()).count();
        let times: Vec<_> = self.nodes.iter().filter_map(|n| n.commit_time()).collect();

        DagStats {
            total_commits: self.nodes.len(),
            total_edges: self.edges.len(),
            merge_commits,
            root_commits: self.roots().len(),
            leaf_commits: self.leaves().len(),
            has_orphans: self.has_orphan_branches(),
            branch_heads,
            attributed,
            unattributed: self.nodes.len() - attributed,
            earliest: times.iter().min().copied(),
            latest: times.iter().max().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DagStats {
    pub total_commits: usize,
    pub total_edges: usize,
    pub merge_commits: usize,
    pub root_commits: usize,
    pub leaf_commits: usize,
    pub has_orphans: bool,
    pub branch_heads: usize,
    /// Commits carrying a branch name
    pub attributed: usize,
    pub unattributed: usize,
    pub earliest: Option<DateTime<FixedOffset>>,
    pub latest: Option<DateTime<FixedOffset>>,
}
