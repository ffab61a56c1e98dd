//! Flat statement tree and structural classification
//!
//! The tree is exactly two levels deep: the file and its statements.

mod classifier;
mod segmenter;

pub use classifier::{classify, function_name, label, tooltip, StructuralKind};
pub use segmenter::{segment, Statement};
