//! Domain types shared by the widget store and the HTTP layer.
//!
//! Nothing in here performs I/O.

pub mod error;
pub mod etag;
pub mod types;
