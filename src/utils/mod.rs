//! Shared utilities: topology consistency checks.

pub mod validation;

pub use validation::validate_topology;
