//! Release registry client
//!
//! Handles fetching the kernel release index from kernel.org.

pub mod client;

pub use client::ReleaseClient;
