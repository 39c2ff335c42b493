pub mod traversal;

pub use traversal::{Traversal, TraversalStep};
