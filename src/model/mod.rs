//! Documentation index data model.

pub mod types;

pub use types::{DocEntry, DocIndex, DocLink};
