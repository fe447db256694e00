//! Counting requests: read-increment-write against the store, then answer in
//! the representation the query asks for.

pub mod counter;
pub mod handler;

pub use counter::bump;
pub use handler::{handle, index, INDEX_HTML};
