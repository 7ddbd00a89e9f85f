//! Channel layer for pattern matching and PTY operations.
//!
//! This module handles the interactive shell session, including
//! tail-searched prompt detection and ANSI stripping.

mod buffer;
mod patterns;
mod pty;

pub use buffer::{DEFAULT_SEARCH_DEPTH, PatternBuffer};
pub use patterns::combine_prompt_patterns;
pub use pty::PtyChannel;
