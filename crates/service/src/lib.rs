//! Service layer providing the people store and its named queries.
//! - Separates storage from the HTTP surface in `server`.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod file;
pub mod person;
pub mod pagination;
