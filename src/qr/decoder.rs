//! QR code decoder using rqrr

use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage};

/// QR code decoder
#[derive(Debug, Default, Clone, Copy)]
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode the first QR code found in an image
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        self.decode_gray(img.to_luma8())
    }

    /// Decode the first QR code found in a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<String> {
        let mut prepared = rqrr::PreparedImage::prepare(img);
        let grids = prepared.detect_grids();

        let Some(grid) = grids.first() else {
            return Err(Error::NoQrCodeFound);
        };

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }

    /// Decode an image and check it carries exactly `expected`
    pub fn verify(&self, img: &DynamicImage, expected: &str) -> Result<()> {
        let decoded = self.decode(img)?;
        if decoded == expected {
            Ok(())
        } else {
            Err(Error::Verification { decoded })
        }
    }
}
