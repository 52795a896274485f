pub mod error;
pub mod logging;
pub mod slug;

pub use error::*;
pub use slug::slugify;
