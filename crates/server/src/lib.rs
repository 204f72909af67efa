pub mod routes;
pub mod startup;
pub mod state;
pub mod extractors;
pub mod hal;
pub mod errors;
pub mod openapi;

pub use startup::run;
