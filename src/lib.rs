//! Sandwich stack (workspace facade crate).
//!
//! This package exposes the `sandwich_stack::{core,engine,types}` public API
//! while the implementation lives in dedicated crates under `crates/`.

pub use sandwich_stack_core as core;
pub use sandwich_stack_engine as engine;
pub use sandwich_stack_types as types;
