pub mod comment;
pub mod software;
pub mod stats;

pub use comment::*;
pub use software::*;
pub use stats::*;
