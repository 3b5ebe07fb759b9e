//! CLI command implementations.

mod doctor;
mod query;
mod serve;

pub use doctor::run_doctor;
pub use query::run_query;
pub use serve::run_serve;
