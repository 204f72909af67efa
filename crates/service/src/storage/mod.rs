//! Storage abstractions for service layer
//!
//! Contains the reusable table store used by entity stores that persist
//! their rows as a single JSON document.

pub mod json_table_store;
