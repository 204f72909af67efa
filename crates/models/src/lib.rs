pub mod errors;
pub mod person;
