//! brickfall (workspace facade crate).
//!
//! Re-exports the engine crates under one roof so drivers can depend on a
//! single package: `brickfall::core` for the rules and `brickfall::types`
//! for the shared data types.

pub use brickfall_core as core;
pub use brickfall_types as types;
