//! Engine operations: ring extraction, crease extraction, and cut-line
//! estimation. Each operation is a small configured struct with an
//! `execute` method.

pub mod creases;
pub mod cut_line;
pub mod rings;

pub use creases::{Crease, CreaseExtract, CreaseKind};
pub use cut_line::{CutLine, CutLineEstimate};
pub use rings::{Ring, RingBuild, RingSet};
