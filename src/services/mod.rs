pub mod catalog;
pub mod search;

pub use catalog::CatalogService;
pub use search::{SearchDoc, SearchIndexService};
