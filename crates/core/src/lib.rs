//! Domain types shared by the notebox store and HTTP layer.
//!
//! Nothing in this crate performs I/O: it defines the note vocabulary
//! (categories, inbound payloads), the validator that guards every write,
//! and the filter/pagination model used when listing.

pub mod error;
pub mod note;
pub mod search;
pub mod types;
