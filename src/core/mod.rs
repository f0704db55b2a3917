//! Core build phases
//!
//! Each phase of the kernel build lives in its own module. External tools are
//! reached through [`crate::infra::process::CommandRunner`] and prompts
//! through [`crate::infra::prompt::Confirm`].
//!
//! # Submodules
//!
//! - [`release`] - Release index model and selection
//! - [`list`] - Release listing
//! - [`download`] - Download, verification and extraction
//! - [`configure`] - Kconfig targets
//! - [`make`] - Kernel build with a tee'd log
//! - [`boot`] - Boot locations and kernel tree queries
//! - [`scheme`] - Initrd and bootloader schemes
//! - [`install`] - Kernel installation
//! - [`uninstall`] - Kernel removal

pub mod boot;
pub mod configure;
pub mod download;
pub mod install;
pub mod list;
pub mod make;
pub mod release;
pub mod scheme;
pub mod uninstall;
