pub mod engine;
pub mod error;
pub mod export;
pub mod math;
pub mod operations;
pub mod scene;
pub mod skeleton;

pub use error::{OricutError, Result};
