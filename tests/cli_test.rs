//! Integration tests for the command-line surface

mod common;

use common::{stderr, stdout, TestProject};

#[test]
fn test_help_lists_every_phase() {
    let project = TestProject::new();

    let output = project.run(&["--help"]);

    assert!(output.status.success());
    let help = stdout(&output);
    for phase in ["list", "download", "config", "make", "install", "uninstall"] {
        assert!(help.contains(phase), "missing {phase} in:\n{help}");
    }
}

#[test]
fn test_version_flag() {
    let project = TestProject::new();

    let output = project.run(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_install_rejects_unknown_initrd() {
    let project = TestProject::new();
    project.create_dir("src");

    let output = project.run(&[
        "install",
        "src",
        "myker",
        "--initrd",
        "dracut",
        "--bootloader",
        "grub",
    ]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Invalid initrd scheme 'dracut'"), "stderr: {err}");
    assert!(err.contains("mkinitcpio"));
}

#[test]
fn test_install_requires_both_schemes() {
    let project = TestProject::new();

    let output = project.run(&["install", "src", "myker", "--initrd", "mkinitcpio"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("--bootloader"));
}

#[test]
fn test_install_rejects_bad_name() {
    let project = TestProject::new();

    let output = project.run(&[
        "install",
        "src",
        "../evil",
        "--initrd",
        "mkinitcpio",
        "--bootloader",
        "grub",
    ]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid install name"));
}

#[test]
fn test_uninstall_rejects_unknown_bootloader() {
    let project = TestProject::new();
    project.create_dir("linux-6.6.7");

    let output = project.run(&["uninstall", "linux-6.6.7", "--bootloader", "syslinux"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid bootloader 'syslinux'"));
    assert!(project.path().join("linux-6.6.7").exists());
}
