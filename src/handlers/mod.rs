// Handlers HTTP do portal
pub mod admin;
pub mod catalog;
pub mod comments;
pub mod downloads;
pub mod health;
pub mod search;

pub use admin::*;
pub use catalog::*;
pub use comments::*;
pub use downloads::*;
pub use health::*;
pub use search::*;
