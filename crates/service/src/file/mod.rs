//! File-backed (or in-memory) entity stores.

pub mod person_store;
