//! QR code renderer backed by the `qrcode` crate

use crate::error::{Error, Result};
use crate::qr::{ErrorCorrection, QrRequest, Renderer};
use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage, imageops};
use qrcode::{EcLevel, QrCode};

/// Largest image side, in pixels, the renderer will allocate
const MAX_SIDE_PX: u32 = 8_192;

/// Built-in QR renderer
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeRenderer;

impl NativeRenderer {
    /// Create a new native renderer
    pub fn new() -> Self {
        Self
    }

    /// Encode and rasterize synchronously
    pub fn render_blocking(&self, request: &QrRequest) -> Result<DynamicImage> {
        let style = &request.style;
        let code = QrCode::with_error_correction_level(
            request.data.as_bytes(),
            ec_level(style.error_correction),
        )
        .map_err(|e| Error::QrEncode(e.to_string()))?;

        let side = side_px(code.width() as u32, style.border, style.module_size)?;
        let pad = style.border * style.module_size;

        let dark = Rgb(style.dark);
        let light = Rgb(style.light);

        // The crate only offers an on/off quiet zone, so the border is padded by hand.
        let symbol = code
            .render::<Rgb<u8>>()
            .quiet_zone(false)
            .module_dimensions(style.module_size, style.module_size)
            .dark_color(dark)
            .light_color(light)
            .build();

        let mut canvas = RgbImage::from_pixel(side, side, light);
        imageops::replace(&mut canvas, &symbol, i64::from(pad), i64::from(pad));

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            side_px = canvas.width(),
            "Rendered QR code natively"
        );

        Ok(DynamicImage::ImageRgb8(canvas))
    }
}

#[async_trait]
impl Renderer for NativeRenderer {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn render(&self, request: &QrRequest) -> Result<DynamicImage> {
        self.render_blocking(request)
    }
}

/// Full image side for a symbol of `modules` modules, or an encode error when
/// the result exceeds [`MAX_SIDE_PX`].
fn side_px(modules: u32, border: u32, module_size: u32) -> Result<u32> {
    border
        .checked_mul(2)
        .and_then(|quiet| quiet.checked_add(modules))
        .and_then(|total| total.checked_mul(module_size))
        .filter(|side| *side <= MAX_SIDE_PX)
        .ok_or_else(|| {
            Error::QrEncode(format!(
                "image would exceed {MAX_SIDE_PX}px per side \
                 ({modules} modules, border {border}, module size {module_size})"
            ))
        })
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}
