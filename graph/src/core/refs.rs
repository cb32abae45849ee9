use serde::{Deserialize, Serialize};

const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";
const REMOTES_PREFIX: &str = "refs/remotes/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefKind {
    /// The symbolic `HEAD` pointer itself
    Head,
    /// A local branch under `refs/heads/`
    Branch,
    Remote,
    Tag,
    Other,
}

/// A reference label parsed from the decoration a history crawler records
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefName {
    pub kind: RefKind,
    /// Short name, e.g. `main` for `refs/heads/main`
    pub name: String,
}

impl RefName {
    /// Parse one raw reference string.
    ///
    /// Accepts the `git log --decorate=full` forms: `refs/heads/main`,
    /// `HEAD -> refs/heads/main`, `tag: refs/tags/v1.0`,
    /// `refs/remotes/origin/main` and a bare `HEAD`.
    pub fn parse(raw: &str) -> Self {
        let mut rest = raw.trim();
        if let Some(target) = rest.strip_prefix("HEAD -> ") {
            rest = target.trim();
        }
        if let Some(target) = rest.strip_prefix("tag: ") {
            rest = target.trim();
        }

        if rest == "HEAD" {
            return Self::new(RefKind::Head, rest);
        }
        if let Some(name) = rest.strip_prefix(HEADS_PREFIX) {
            return Self::new(RefKind::Branch, name);
        }
        if let Some(name) = rest.strip_prefix(TAGS_PREFIX) {
            return Self::new(RefKind::Tag, name);
        }
        if let Some(name) = rest.strip_prefix(REMOTES_PREFIX) {
            return Self::new(RefKind::Remote, name);
        }
        Self::new(RefKind::Other, rest)
    }

    fn new(kind: RefKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }

    /// Only local branches carry branch identity through the graph
    pub fn is_branch(&self) -> bool {
        self.kind == RefKind::Branch
    }
}
