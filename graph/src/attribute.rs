use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::core::{Dag, NodeIdx, RefName};
use crate::error::{HistoryError, Result};

/// Distinct branch names in the order their heads were discovered
pub type BranchNames = IndexSet<String>;

/// Work out which branch every commit was introduced on.
///
/// Branch heads are visited in graph insertion order. For the reference at
/// index `i` of a head, the head takes the branch name (the last branch
/// reference in the list names it) and the name flows backwards from parent `i` until it meets another
/// branch head or a commit some earlier walk already claimed.
///
/// Every head is checked before anything is written, so a reference/parent
/// count mismatch leaves the graph untouched.
pub fn attribute(dag: &mut Dag) -> Result<BranchNames> {
    let heads = dag.branch_heads();

    for &head in &heads {
        let node = dag.node(head);
        if node.refs.len() != node.parents.len() {
            return Err(HistoryError::RefParentMismatch {
                short_id: node.short_id.clone(),
                refs: node.refs.len(),
                parents: node.parents.len(),
            });
        }
    }

    let mut names = BranchNames::new();
    for &head in &heads {
        let node = dag.node(head);
        let refs: Vec<RefName> = node.ref_names().collect();
        let parents = node.parents.clone();

        for (reference, parent_id) in refs.iter().zip(&parents) {
            if !reference.is_branch() {
                continue;
            }
            names.insert(reference.name.clone());

            dag.node_mut(head).branch = Some(reference.name.clone());

            match dag.lookup(parent_id) {
                Some(parent) => {
                    let claimed = propagate(dag, parent, &reference.name);
                    trace!(branch = %reference.name, claimed, "propagated branch");
                }
                None => {
                    trace!(branch = %reference.name, parent = %parent_id, "branch parent outside history")
                }
            }
        }
    }

    debug!(
        heads = heads.len(),
        branches = names.len(),
        "attributed branches"
    );
    Ok(names)
}

/// Claim `start` and its unclaimed ancestors for `branch`, returning how many
/// commits were claimed
fn propagate(dag: &mut Dag, start: NodeIdx, branch: &str) -> usize {
    let mut stack = vec![start];
    let mut claimed = 0;

    while let Some(idx) = stack.pop() {
        let node = dag.node(idx);
        if node.is_branch_head() || node.branch.is_some() {
            continue;
        }
        dag.node_mut(idx).branch = Some(branch.to_string());
        claimed += 1;

        // reversed so the first parent is walked first
        stack.extend(dag.parent_indices(idx).into_iter().rev());
    }

    claimed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::config::HistoryConfig;
    use crate::core::CommitRecord;
    use pretty_assertions::assert_eq;

    fn record(commit: &str, parents: &[&str], refs: &[&str]) -> CommitRecord {
        CommitRecord {
            commit: format!("{}{}", commit.repeat(7), "0000"),
            author: "Ada".to_string(),
            author_date: String::new(),
            committer: "Ada".to_string(),
            commit_date: String::new(),
            message: String::new(),
            parents: parents
                .iter()
                .map(|p| format!("{}{}", p.repeat(7), "0000"))
                .collect(),
            refs: refs.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn branches(dag: &Dag) -> Vec<(String, Option<String>)> {
        dag.nodes()
            .map(|n| (n.short_id.clone(), n.branch.clone()))
            .collect()
    }

    fn branch_of<'a>(dag: &'a Dag, c: &str) -> Option<&'a str> {
        dag.get(&c.repeat(7)).and_then(|n| n.branch.as_deref())
    }

    #[test]
    fn linear_history_takes_head_branch() {
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &[]),
                record("c", &["b"], &["refs/heads/main"]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        let names = attribute(&mut dag).unwrap();

        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["main"]);
        for c in ["a", "b", "c"] {
            assert_eq!(branch_of(&dag, c), Some("main"));
        }
    }

    #[test]
    fn earlier_head_claims_shared_ancestor() {
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &["refs/heads/dev"]),
                record("c", &["a"], &["refs/heads/main"]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        let names = attribute(&mut dag).unwrap();

        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["dev", "main"]);
        assert_eq!(branch_of(&dag, "a"), Some("dev"));
        assert_eq!(branch_of(&dag, "b"), Some("dev"));
        assert_eq!(branch_of(&dag, "c"), Some("main"));
    }

    #[test]
    fn propagation_stops_at_other_branch_heads() {
        // a <- b(release tag) <- c <- d(main)
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &["tag: refs/tags/v1"]),
                record("c", &["b"], &[]),
                record("d", &["c"], &["refs/heads/main"]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        let names = attribute(&mut dag).unwrap();

        assert_eq!(names.len(), 1);
        assert_eq!(branch_of(&dag, "d"), Some("main"));
        assert_eq!(branch_of(&dag, "c"), Some("main"));
        // tag heads never attribute and block the walk
        assert_eq!(branch_of(&dag, "b"), None);
        assert_eq!(branch_of(&dag, "a"), None);
    }

    #[test]
    fn merge_head_sends_each_ref_down_its_parent() {
        // a <- b <- m, a <- c <- m; m carries one ref per parent
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &[]),
                record("c", &["a"], &[]),
                record("m", &["b", "c"], &["refs/heads/main", "refs/heads/feature"]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        let names = attribute(&mut dag).unwrap();

        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["main", "feature"]);
        assert_eq!(branch_of(&dag, "m"), Some("feature"));
        assert_eq!(branch_of(&dag, "b"), Some("main"));
        assert_eq!(branch_of(&dag, "a"), Some("main"));
        assert_eq!(branch_of(&dag, "c"), Some("feature"));
    }

    #[test]
    fn last_branch_reference_names_the_head() {
        // tags in between do not count, the last branch reference does
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &[]),
                record("c", &["a"], &[]),
                record("e", &["a"], &[]),
                record(
                    "m",
                    &["b", "c", "e"],
                    &["refs/heads/main", "refs/heads/feature", "tag: refs/tags/v2"],
                ),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        attribute(&mut dag).unwrap();
        assert_eq!(branch_of(&dag, "m"), Some("feature"));

        // a second run writes the same name again
        attribute(&mut dag).unwrap();
        assert_eq!(branch_of(&dag, "m"), Some("feature"));
        assert_eq!(branch_of(&dag, "e"), None);
    }

    #[test]
    fn diamond_terminates_and_claims_each_node_once() {
        // a <- b, a <- c, (b, c) <- d, d <- e(main)
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &[]),
                record("c", &["a"], &[]),
                record("d", &["b", "c"], &[]),
                record("e", &["d"], &["refs/heads/main"]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        attribute(&mut dag).unwrap();

        assert!(dag.nodes().all(|n| n.branch.as_deref() == Some("main")));
    }

    #[test]
    fn remote_reference_is_recorded_not_used() {
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &["refs/remotes/origin/main"]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        let names = attribute(&mut dag).unwrap();

        assert!(names.is_empty());
        assert!(dag.nodes().all(|n| n.branch.is_none()));
        assert_eq!(dag.get("bbbbbbb").unwrap().refs, vec!["refs/remotes/origin/main"]);
    }

    #[test]
    fn mismatch_is_fatal_and_leaves_graph_untouched() {
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &["refs/heads/dev"]),
                record("c", &["b"], &["refs/heads/main", "refs/heads/other"]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        let err = attribute(&mut dag).unwrap_err();

        assert_eq!(
            err,
            HistoryError::RefParentMismatch {
                short_id: "ccccccc".to_string(),
                refs: 2,
                parents: 1,
            }
        );
        assert!(dag.nodes().all(|n| n.branch.is_none()));
    }

    #[test]
    fn head_whose_parent_is_outside_history() {
        let mut dag = build(
            &[record("b", &["a"], &["refs/heads/main"])],
            &HistoryConfig::default(),
        )
        .unwrap();

        attribute(&mut dag).unwrap();
        assert_eq!(branch_of(&dag, "b"), Some("main"));
    }

    #[test]
    fn second_run_changes_nothing() {
        let mut dag = build(
            &[
                record("a", &[], &[]),
                record("b", &["a"], &["refs/heads/dev"]),
                record("c", &["a"], &["refs/heads/main"]),
                record("d", &[], &[]),
            ],
            &HistoryConfig::default(),
        )
        .unwrap();

        let first_names = attribute(&mut dag).unwrap();
        let first = branches(&dag);
        let second_names = attribute(&mut dag).unwrap();

        assert_eq!(branches(&dag), first);
        assert_eq!(second_names, first_names);
        assert_eq!(branch_of(&dag, "d"), None);
    }

    #[test]
    fn long_linear_history_does_not_recurse() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("{:010x}", i + 1)).collect();
        let mut records: Vec<CommitRecord> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| CommitRecord {
                commit: id.clone(),
                author: String::new(),
                author_date: String::new(),
                committer: String::new(),
                commit_date: String::new(),
                message: String::new(),
                parents: if i == 0 { Vec::new() } else { vec![ids[i - 1].clone()] },
                refs: Vec::new(),
            })
            .collect();
        if let Some(last) = records.last_mut() {
            last.refs.push("refs/heads/main".to_string());
        }
        let config = HistoryConfig {
            short_id_len: 10,
            ..HistoryConfig::default()
        };
        let mut dag = build(&records, &config).unwrap();

        attribute(&mut dag).unwrap();
        assert!(dag.nodes().all(|n| n.branch.is_some()));
    }
}
