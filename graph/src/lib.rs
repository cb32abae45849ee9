//! Commit history graph: builds a DAG from crawled commit records, works out
//! which branch each commit belongs to and assigns a color per branch.

pub mod attribute;
pub mod builder;
pub mod colorize;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;

pub use attribute::{attribute, BranchNames};
pub use builder::build;
pub use colorize::{colorize, Palette};
pub use config::{HistoryConfig, PaletteConfig};
pub use crate::core::{
    Color, CommitNode, CommitRecord, Dag, DagStats, Edge, EdgeType, NodeIdx, RefKind, RefName,
};
pub use error::{HistoryError, Result};
pub use pipeline::CommitHistory;
