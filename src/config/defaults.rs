//! Default configuration values

/// Default build log file name
pub const DEFAULT_BUILD_LOG: &str = "make.log";

/// Directory the kernel image, ramdisk and bootloader config live in
pub const DEFAULT_BOOT_DIR: &str = "/boot";

/// GRUB configuration path inside the boot directory
pub const GRUB_CFG_RELATIVE: &str = "grub/grub.cfg";

/// Directory `make modules_install` installs into
pub const DEFAULT_MODULES_DIR: &str = "/lib/modules";

/// mkinitcpio preset configuration
pub const DEFAULT_MKINITCPIO_CONF: &str = "/etc/mkinitcpio.conf";

/// Compression suffix of kernel.org source tarballs
pub const TARBALL_COMPRESSION: &str = "xz";

/// Suffix kernel.org gives detached tarball signatures
pub const SIGNATURE_SUFFIX: &str = "sign";

/// Default number of parallel build jobs: one less than the CPU count
pub fn default_build_jobs() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build_jobs_is_positive() {
        assert!(default_build_jobs() >= 1);
    }
}
