// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;
pub mod timing;
pub mod validation;

pub use timing::OperationTimer;
pub use validation::Validator;
