//! Configuration and constants

pub mod defaults;
pub mod settings;
pub mod urls;
