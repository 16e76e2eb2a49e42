//! End-to-end runs of the qrgen binary with scripted stdin.
//!
//! Each test runs in its own scratch directory with `XDG_CONFIG_HOME` pointed
//! there too, so no user configuration leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Every variable the configuration layer reads.
const QRGEN_ENV: &[&str] = &[
    "QRGEN_BACKEND",
    "QRGEN_MODULE_SIZE",
    "QRGEN_BORDER",
    "QRGEN_EC_LEVEL",
    "QRGEN_QRENCODE",
    "QRGEN_DEFAULT_FILENAME",
    "QRGEN_VERIFY",
    "QRGEN_INSTALLER",
    "QRGEN_INSTALLER_ARGS",
    "QRGEN_INSTALL_RETRIES",
    "QRGEN_LOG_LEVEL",
    "QRGEN_LOG_FILE",
    "QRGEN_LOG_COLOR",
    "QRGEN_LOG_ROTATION",
];

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qrgen").unwrap();
    cmd.current_dir(dir.path()).env("XDG_CONFIG_HOME", dir.path());
    for var in QRGEN_ENV {
        cmd.env_remove(var);
    }
    cmd.env("QRGEN_LOG_LEVEL", "off");
    cmd
}

#[cfg(feature = "native")]
#[test]
fn prints_banner_and_prompts() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .write_stdin("hello\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== QR Code Generator ==="))
        .stdout(predicate::str::contains("Enter the text or URL: "))
        .stdout(predicate::str::contains(
            "Enter the filename (e.g., qrcode.png): ",
        ));
}

#[cfg(feature = "native")]
#[test]
fn saves_named_file() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .write_stdin("https://example.com\nout.png\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ QR encoder is available (native)"))
        .stdout(predicate::str::contains("✓ QR code saved as out.png"))
        .stdout(predicate::str::contains("Data encoded: https://example.com"));

    let image = image::open(dir.path().join("out.png")).unwrap();
    let decoded = qrgen::QrDecoder::new().decode(&image).unwrap();
    assert_eq!(decoded, "https://example.com");
}

#[cfg(feature = "native")]
#[test]
fn blank_filename_writes_default() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .write_stdin("some text\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ QR code saved as qrcode.png"));

    assert!(dir.path().join("qrcode.png").exists());
}

#[cfg(feature = "native")]
#[test]
fn blank_text_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .write_stdin("   \nout.png\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Please enter some text or URL to encode.",
        ));

    assert!(!dir.path().join("out.png").exists());
}

#[cfg(feature = "native")]
#[test]
fn closed_stdin_is_reported_not_panicked() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ An error occurred:"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn missing_encoder_and_failing_installer_ends_with_guidance() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .env("QRGEN_BACKEND", "qrencode")
        .env("QRGEN_QRENCODE", "qrgen-test-no-such-qrencode")
        .env("QRGEN_INSTALLER", "qrgen-test-no-such-installer")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ QR encoder is not available"))
        .stdout(predicate::str::contains("To fix this issue"))
        .stdout(predicate::str::contains("✗ Installation attempt failed"))
        .stdout(predicate::str::contains(
            "Please install the QR encoder manually and try again.",
        ))
        .stdout(predicate::str::contains("Enter the text or URL").not());

    assert!(!dir.path().join("out.png").exists());
}

#[cfg(unix)]
#[test]
fn installer_success_without_encoder_stops_after_one_retry() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .env("QRGEN_BACKEND", "qrencode")
        .env("QRGEN_QRENCODE", "qrgen-test-no-such-qrencode")
        .env("QRGEN_INSTALLER", "true")
        .env("QRGEN_INSTALLER_ARGS", "")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ QR encoder installed successfully!"))
        .stdout(predicate::str::contains("Retrying QR code generation..."))
        .stdout(predicate::str::contains(
            "Please install the QR encoder manually and try again.",
        ))
        .stdout(predicate::str::contains("Attempting to install").count(1));
}

#[cfg(feature = "native")]
#[test]
fn config_file_changes_default_filename() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("qrgen.toml"),
        "[output]\ndefault_filename = \"from-config.png\"\nverify = true\n",
    )
    .unwrap();

    cmd(&dir)
        .write_stdin("configured\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ QR code saved as from-config.png"));

    assert!(dir.path().join("from-config.png").exists());
}

#[cfg(feature = "native")]
#[test]
fn huge_border_is_reported_not_panicked() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .env("QRGEN_BORDER", "500000000")
        .write_stdin("hello\nout.png\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ An error occurred:"))
        .stderr(predicate::str::contains("panicked").not());

    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn rejects_unknown_flags() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir).arg("--bogus").assert().failure();
}
