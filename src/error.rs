//! Error types for qrgen operations

use thiserror::Error;

/// Result type alias using qrgen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// The user supplied no text to encode
    #[error("Please enter some text or URL to encode.")]
    EmptyInput,

    /// Standard input closed before an answer was read
    #[error("input stream closed before a line was read")]
    InputClosed,

    /// No QR encoding backend could be located
    #[error("{0}")]
    MissingCapability(String),

    /// Installer process ran but reported failure
    #[error("{0}")]
    InstallFailed(String),

    /// Installer process could not be started
    #[error("{0}")]
    InstallerLaunch(String),

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Rendered image did not decode back to the requested payload
    #[error("Verification failed: rendered QR code decodes to {decoded:?}")]
    Verification {
        /// What the decoder read back
        decoded: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means the encoding capability is absent.
    pub fn is_missing_capability(&self) -> bool {
        matches!(self, Error::MissingCapability(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
