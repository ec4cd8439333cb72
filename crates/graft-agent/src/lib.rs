//! Write pipeline for AI-proposed file edits.
//!
//! An AI coding agent proposes changes to a file either as full replacement
//! content or as a unified-diff patch against the file's current content.
//! This crate provides the pieces that turn such a proposal into a write:
//! a restricted unified-diff engine that resynchronizes hunks by content
//! (declared line numbers in model output drift), a heuristic detector for
//! truncated or summarized output, and the tool layer that wires both into
//! an agent host through an execution-environment abstraction.

pub mod errors;
pub mod events;
pub mod execution;
pub mod omission;
pub mod patch;
pub mod tools;

pub use errors::*;
pub use events::*;
pub use execution::*;
pub use omission::*;
pub use patch::*;
pub use tools::*;
