//! QR code rendering and decoding
//!
//! Encoding is delegated to a [`Renderer`] backend: either the `qrcode` crate
//! linked into the binary ([`NativeRenderer`]) or the external `qrencode`
//! program ([`QrencodeRenderer`]). [`QrDecoder`] reads rendered images back
//! for verification.

mod decoder;
mod external;
#[cfg(feature = "native")]
mod native;

pub use decoder::QrDecoder;
pub use external::QrencodeRenderer;
#[cfg(feature = "native")]
pub use native::NativeRenderer;

use crate::error::Result;
use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// Recovers ~7% of codewords
    #[serde(alias = "l", alias = "L")]
    Low,
    /// Recovers ~15% of codewords
    #[default]
    #[serde(alias = "m", alias = "M")]
    Medium,
    /// Recovers ~25% of codewords
    #[serde(alias = "q", alias = "Q")]
    Quartile,
    /// Recovers ~30% of codewords
    #[serde(alias = "h", alias = "H")]
    High,
}

impl ErrorCorrection {
    /// Single-letter level name, as used by `qrencode -l`
    pub fn letter(self) -> char {
        match self {
            Self::Low => 'L',
            Self::Medium => 'M',
            Self::Quartile => 'Q',
            Self::High => 'H',
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::Low),
            "m" | "medium" => Ok(Self::Medium),
            "q" | "quartile" => Ok(Self::Quartile),
            "h" | "high" => Ok(Self::High),
            _ => Err(format!(
                "Unknown error correction level '{value}', expected L, M, Q or H"
            )),
        }
    }
}

/// Fixed presentation parameters applied to every rendered code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrStyle {
    /// Pixels per module
    pub module_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Error correction level
    pub error_correction: ErrorCorrection,
    /// RGB colour of dark modules
    pub dark: [u8; 3],
    /// RGB background colour
    pub light: [u8; 3],
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: 4,
            error_correction: ErrorCorrection::Medium,
            dark: [0, 0, 0],
            light: [255, 255, 255],
        }
    }
}

/// A payload together with the style it should be rendered in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    /// Text to encode
    pub data: String,
    /// Presentation parameters
    pub style: QrStyle,
}

impl QrRequest {
    /// Create a new request
    pub fn new(data: impl Into<String>, style: QrStyle) -> Self {
        Self {
            data: data.into(),
            style,
        }
    }
}

/// An encoding capability: turns a request into a finished QR image.
///
/// Implementations pick the smallest symbol version that fits the payload.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Short backend name used in console and log output
    fn name(&self) -> &'static str;

    /// Render the request into an image
    async fn render(&self, request: &QrRequest) -> Result<DynamicImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_correction_parses_letters_and_words() {
        assert_eq!("q".parse::<ErrorCorrection>(), Ok(ErrorCorrection::Quartile));
        assert_eq!("HIGH".parse::<ErrorCorrection>(), Ok(ErrorCorrection::High));
        assert!("x".parse::<ErrorCorrection>().is_err());
    }

    #[test]
    fn error_correction_letter() {
        assert_eq!(ErrorCorrection::Low.letter(), 'L');
        assert_eq!(ErrorCorrection::default().letter(), 'M');
    }

    #[test]
    fn request_carries_style() {
        let request = QrRequest::new("hello", QrStyle::default());
        assert_eq!(request.data, "hello");
        assert_eq!(request.style.module_size, 10);
        assert_eq!(request.style.border, 4);
    }
}
