//! Person repository contract and its named derived queries.

pub mod queries;
pub mod repository;
