use tracing::{debug, trace};

use crate::config::HistoryConfig;
use crate::core::{CommitNode, CommitRecord, Dag};
use crate::error::{HistoryError, Result};

/// Build the commit graph from crawler records.
///
/// Every record becomes one node keyed by its short id; every parent that is
/// itself among the records becomes an edge parent -> child. Parents outside
/// the fetched window are dropped silently.
pub fn build(records: &[CommitRecord], config: &HistoryConfig) -> Result<Dag> {
    config.validate()?;
    let short_id_len = config.short_id_len;

    for (index, record) in records.iter().enumerate() {
        record.validate(index, short_id_len)?;
    }

    // first pass: nodes
    let mut dag = Dag::new();
    for record in records {
        let node = CommitNode::from_record(record, short_id_len);
        if let Err(existing) = dag.insert_node(node) {
            let first = dag.node(existing);
            return Err(HistoryError::DuplicateShortId {
                short_id: first.short_id.clone(),
                first: first.id.clone(),
                second: record.commit.clone(),
            });
        }
    }

    // second pass: edges
    let mut skipped = 0;
    for child in 0..dag.node_count() {
        let parents = dag.node(child).parents.clone();
        for parent_id in &parents {
            match dag.lookup(parent_id) {
                Some(parent) => dag.add_edge(parent, child),
                None => {
                    trace!(child = %dag.node(child).short_id, parent = %parent_id, "parent outside history, edge skipped");
                    skipped += 1;
                }
            }
        }
    }

    debug!(
        nodes = dag.node_count(),
        edges = dag.edge_count(),
        skipped,
        "built commit graph"
    );
    Ok(dag)
}
