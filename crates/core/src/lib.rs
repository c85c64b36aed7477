// crates/core/src/lib.rs
pub mod config;
pub mod error;
pub mod resolver;

pub use config::*;
pub use error::*;
pub use resolver::*;
