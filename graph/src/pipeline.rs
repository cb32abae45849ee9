use tracing::info;

use crate::attribute::{attribute, BranchNames};
use crate::builder::build;
use crate::colorize::{colorize, Palette};
use crate::config::HistoryConfig;
use crate::core::{CommitRecord, Dag};
use crate::error::Result;

/// A fully built, attributed and colored commit history
#[derive(Debug, Clone)]
pub struct CommitHistory {
    dag: Dag,
    branch_names: BranchNames,
    palette: Palette,
}

impl CommitHistory {
    /// Run build, attribution and colorization in order.
    ///
    /// Any fatal input problem aborts the whole run; no partially processed
    /// graph is handed out.
    pub fn from_records(records: &[CommitRecord], config: &HistoryConfig) -> Result<Self> {
        let mut dag = build(records, config)?;
        let branch_names = attribute(&mut dag)?;
        let palette = colorize(&mut dag, &branch_names, &config.palette);

        info!(
            commits = dag.node_count(),
            edges = dag.edge_count(),
            branches = branch_names.len(),
            "commit history ready"
        );

        Ok(Self {
            dag,
            branch_names,
            palette,
        })
    }

    pub fn dag(&self) -> &Dag {
        &self.dag
    }

    pub fn branch_names(&self) -> &BranchNames {
        &self.branch_names
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn into_parts(self) -> (Dag, BranchNames, Palette) {
        (self.dag, self.branch_names, self.palette)
    }
}
