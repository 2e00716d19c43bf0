pub mod config;
pub mod formatting;
pub mod query;

// Re-exports
pub use config::*;
pub use query::*;
