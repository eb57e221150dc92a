//! Search query construction
//!
//! A search is a sparse set of user-chosen fields. Some match exactly
//! (name, kingdom, ...), some as a numeric range (height, weight, gender
//! ratio). The user toggles fields on and off and types raw text; nothing
//! is validated until the query is built, so an incomplete range never
//! interrupts editing.
//!
//! - **`fields`**: the field catalog and per-field wire names
//! - **`builder`**: `QueryBuilder`, accumulating values and building
//!   [`crate::api::QueryParams`]

pub mod builder;
pub mod fields;

pub use builder::{Bound, FieldValue, QueryBuilder};
pub use fields::{FieldKind, SearchField};
