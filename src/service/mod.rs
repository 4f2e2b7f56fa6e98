pub mod reconciler;
pub mod similarity;

pub use reconciler::{reconcile, reconcile_pairs, summarize};
pub use similarity::score;
