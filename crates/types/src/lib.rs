// crates/types/src/lib.rs
//! Serde-facing types shared with the ChatCHW dashboard frontend.
//!
//! TypeScript bindings are generated via ts-rs. File generation is gated
//! behind the `codegen` feature so `cargo test` alone never overwrites
//! formatted bindings; only the bindings codegen step enables it.

pub mod location;

pub use location::*;
