//! linux-build - download, configure, build and install Linux kernels
//!
//! Drives a kernel from a kernel.org release to an installed, bootable
//! image in separate phases.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Build phases
//! - [`registry`] - Release index client
//! - [`infra`] - Infrastructure layer (network, processes, prompts)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
pub mod registry;

#[cfg(test)]
pub mod test_utils;
