// crates/core/src/lib.rs
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod plan;
pub mod score;
pub mod similarity;
pub mod source;
pub mod stats;

pub use error::*;
pub use extract::*;
pub use pipeline::*;
pub use plan::*;
pub use score::*;
pub use similarity::*;
pub use source::*;
pub use stats::*;
