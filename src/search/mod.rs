//! Search layer facade.
//!
//! - **[`filter`]**: case-insensitive substring filtering of a loaded
//!   [`DocIndex`](crate::model::DocIndex), cheap enough to run on every
//!   keystroke.

pub mod filter;

pub use filter::{SearchResults, filter, title_matches};
