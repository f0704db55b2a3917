//! Infrastructure layer
//!
//! Handles all I/O operations: network, filesystem, prompts and external
//! processes.

pub mod dirs;
pub mod download;
pub mod process;
pub mod prompt;
