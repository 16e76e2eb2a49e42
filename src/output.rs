//! Console lines for every generator event
//!
//! The shell decides what happened; this module decides how it reads.

use crate::error::Error;
use crate::shell::SavedQr;

/// Heading printed once before the first attempt.
pub fn banner() -> Vec<String> {
    vec![
        "=== QR Code Generator ===".to_string(),
        "This tool generates QR codes from text or URLs.".to_string(),
        "-".repeat(40),
    ]
}

/// Confirmation that an encoder backend was found.
pub fn capability_available(backend: &str) -> String {
    format!("✓ QR encoder is available ({backend})")
}

/// Confirmation lines after a QR code has been written.
pub fn saved(saved: &SavedQr, preview_chars: usize) -> Vec<String> {
    vec![
        format!("✓ QR code saved as {}", saved.path.display()),
        format!("  Data encoded: {}", preview(&saved.data, preview_chars)),
    ]
}

/// Message for a blank text answer.
pub fn empty_input() -> Vec<String> {
    vec![format!("Error: {}", Error::EmptyInput)]
}

/// Remediation guidance when no encoder backend can be found.
pub fn missing_capability(reason: &str) -> Vec<String> {
    vec![
        format!("✗ QR encoder is not available: {reason}"),
        String::new(),
        "To fix this issue, please run one of these commands:".to_string(),
        "1. sudo apt-get install qrencode".to_string(),
        "2. sudo dnf install qrencode".to_string(),
        "3. brew install qrencode".to_string(),
        String::new(),
        "If you build qrgen from source, enable the built-in encoder instead:".to_string(),
        "  cargo install qrgen --features native".to_string(),
    ]
}

/// Announces the automatic installation attempt.
pub fn install_started(command: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("Attempting to install the QR encoder with `{command}`..."),
    ]
}

/// Installer succeeded; the whole flow is about to run again.
pub fn install_succeeded() -> Vec<String> {
    vec![
        "✓ QR encoder installed successfully!".to_string(),
        String::new(),
        "Retrying QR code generation...".to_string(),
    ]
}

/// Installer failed to run or reported failure.
pub fn install_failed(err: &Error) -> Vec<String> {
    let line = match err {
        Error::InstallFailed(stderr) => format!("✗ Installation failed: {stderr}"),
        other => format!("✗ Installation attempt failed: {other}"),
    };
    let mut lines = vec![line];
    lines.extend(manual_install());
    lines
}

/// Final advice once automatic installation is exhausted.
pub fn manual_install() -> Vec<String> {
    vec![
        String::new(),
        "Please install the QR encoder manually and try again.".to_string(),
    ]
}

/// Any other failure.
pub fn failure(err: &Error) -> Vec<String> {
    vec![
        format!("✗ An error occurred: {err}"),
        "Please check your input and try again.".to_string(),
    ]
}

/// First `max` characters of `data`, with `...` appended when anything was cut.
pub fn preview(data: &str, max: usize) -> String {
    match data.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &data[..cut]),
        None => data.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn preview_keeps_short_data() {
        assert_eq!(preview("https://example.com", 50), "https://example.com");
        let exact = "a".repeat(50);
        assert_eq!(preview(&exact, 50), exact);
    }

    #[test]
    fn preview_truncates_long_data() {
        let long = format!("{}{}", "b".repeat(50), "tail");
        assert_eq!(preview(&long, 50), format!("{}...", "b".repeat(50)));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let long = "é".repeat(51);
        assert_eq!(preview(&long, 50), format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn saved_lines_match_expected_wording() {
        let saved_qr = SavedQr {
            path: PathBuf::from("out.png"),
            data: "https://example.com".to_string(),
            backend: "native",
        };
        assert_eq!(
            saved(&saved_qr, 50),
            vec![
                "✓ QR code saved as out.png",
                "  Data encoded: https://example.com"
            ]
        );
    }

    #[test]
    fn empty_input_message() {
        assert_eq!(
            empty_input(),
            vec!["Error: Please enter some text or URL to encode."]
        );
    }

    #[test]
    fn install_failure_distinguishes_launch_errors() {
        let failed = install_failed(&Error::InstallFailed("E: permission denied".into()));
        assert_eq!(failed[0], "✗ Installation failed: E: permission denied");

        let launch = install_failed(&Error::InstallerLaunch("brew: not found".into()));
        assert_eq!(launch[0], "✗ Installation attempt failed: brew: not found");
        assert_eq!(
            launch.last().map(String::as_str),
            Some("Please install the QR encoder manually and try again.")
        );
    }

    #[test]
    fn failure_wraps_error_message() {
        let lines = failure(&Error::QrEncode("data too long".into()));
        assert_eq!(
            lines,
            vec![
                "✗ An error occurred: Failed to encode QR code: data too long",
                "Please check your input and try again."
            ]
        );
    }
}
