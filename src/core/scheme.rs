//! Initrd and bootloader schemes
//!
//! Each scheme is registered by name in a [`SchemeRegistry`]. Install and
//! uninstall resolve the user's choice through the registry, so supporting
//! another initrd generator or bootloader means registering one more type.

use std::path::PathBuf;

use super::boot::BootLayout;
use crate::error::{LinuxBuildError, Result};
use crate::infra::process::ExternalCommand;

/// Anything selectable by name
pub trait Scheme {
    /// Name used on the command line
    fn name(&self) -> &'static str;
}

/// Generates the initial ramdisk for an installed kernel
pub trait InitrdScheme: Scheme + Send + Sync {
    /// Ramdisk path for an install name
    fn image_path(&self, layout: &BootLayout, name: &str) -> PathBuf;

    /// Commands that generate the ramdisk for `release` under `name`
    fn generate(&self, layout: &BootLayout, release: &str, name: &str) -> Vec<ExternalCommand>;
}

/// Regenerates a bootloader's configuration
pub trait BootloaderScheme: Scheme + Send + Sync {
    /// Commands that rewrite the bootloader configuration
    fn regenerate(&self, layout: &BootLayout) -> Vec<ExternalCommand>;
}

/// Arch Linux `mkinitcpio`
#[derive(Debug, Default, Clone, Copy)]
pub struct Mkinitcpio;

impl Scheme for Mkinitcpio {
    fn name(&self) -> &'static str {
        "mkinitcpio"
    }
}

impl InitrdScheme for Mkinitcpio {
    fn image_path(&self, layout: &BootLayout, name: &str) -> PathBuf {
        layout.boot_dir.join(format!("initramfs-{name}.img"))
    }

    fn generate(&self, layout: &BootLayout, release: &str, name: &str) -> Vec<ExternalCommand> {
        vec![ExternalCommand::new("mkinitcpio")
            .args(["-k", release])
            .arg("-c")
            .path_arg(&layout.mkinitcpio_conf)
            .arg("-g")
            .path_arg(&self.image_path(layout, name))]
    }
}

/// GRUB 2 via `grub-mkconfig`
#[derive(Debug, Default, Clone, Copy)]
pub struct Grub;

impl Scheme for Grub {
    fn name(&self) -> &'static str {
        "grub"
    }
}

impl BootloaderScheme for Grub {
    fn regenerate(&self, layout: &BootLayout) -> Vec<ExternalCommand> {
        vec![ExternalCommand::new("grub-mkconfig")
            .arg("-o")
            .path_arg(&layout.grub_cfg)]
    }
}

/// Schemes of one kind, looked up by name
pub struct SchemeRegistry<T: ?Sized + Scheme> {
    kind: &'static str,
    schemes: Vec<Box<T>>,
}

/// Registry of initrd schemes
pub type InitrdRegistry = SchemeRegistry<dyn InitrdScheme>;

/// Registry of bootloader schemes
pub type BootloaderRegistry = SchemeRegistry<dyn BootloaderScheme>;

impl<T: ?Sized + Scheme> SchemeRegistry<T> {
    /// Create an empty registry; `kind` names it in error messages
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            schemes: Vec::new(),
        }
    }

    /// Add a scheme
    pub fn register(&mut self, scheme: Box<T>) {
        self.schemes.push(scheme);
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<String> {
        self.schemes
            .iter()
            .map(|scheme| scheme.name().to_string())
            .collect()
    }

    /// Look up a scheme by name
    pub fn get(&self, name: &str) -> Result<&T> {
        self.schemes
            .iter()
            .find(|scheme| scheme.name() == name)
            .map(|scheme| &**scheme)
            .ok_or_else(|| LinuxBuildError::InvalidChoice {
                kind: self.kind,
                value: name.to_string(),
                choices: self.names(),
            })
    }

    /// Look up an optional choice; `None` means "skip this step"
    pub fn get_optional(&self, name: Option<&str>) -> Result<Option<&T>> {
        name.map(|name| self.get(name)).transpose()
    }
}

impl InitrdRegistry {
    /// Registry with every supported initrd scheme
    pub fn builtin() -> Self {
        let mut registry = Self::new("initrd scheme");
        registry.register(Box::new(Mkinitcpio));
        registry
    }
}

impl BootloaderRegistry {
    /// Registry with every supported bootloader
    pub fn builtin() -> Self {
        let mut registry = Self::new("bootloader");
        registry.register(Box::new(Grub));
        registry
    }
}
