pub mod color;
pub mod dag;
pub mod edge;
pub mod node;
pub mod record;
pub mod refs;

pub use color::Color;
pub use dag::{Dag, DagStats, NodeIdx};
pub use edge::{Edge, EdgeType};
pub use node::{short_id, CommitNode};
pub use record::CommitRecord;
pub use refs::{RefKind, RefName};
