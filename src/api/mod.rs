pub mod error;
pub mod todos;
pub mod validation;

pub use todos::config;
