//! Entity model for tracked books, quotes and their companions.
//!
//! # Responsibility
//! - Define the plain records owned by the collections in [`crate::list`].
//! - Keep cross-entity references as stable ids, never as shared pointers.
//!
//! # Invariants
//! - A Book/Quote carries at most one `CategoryId`.
//! - The matching Category membership set is maintained by
//!   [`crate::library::Library`], not by the records themselves.

pub mod book;
pub mod bookmark;
pub mod category;
pub mod quote;
pub mod rating;
pub mod todo;
