//! Feed data model and query engine.
//!
//! - `types` - Posts and the filter/sort configuration
//! - `query` - Pure filtering and ordering of the post set
//! - `loader` - Post file parsing and validation
//! - `follow` - Per-post follow flags

mod follow;
mod loader;
pub mod query;
mod types;

pub use follow::FollowState;
pub use loader::{PostFile, PostLoadError, PostSet};
pub use query::{compute, parse_post_date};
pub use types::{
    Category, CategoryFilter, FilterState, MediaType, MediaTypeFilter, Post, SortKey,
    UnknownFilter,
};
