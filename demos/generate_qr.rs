//! Generate QR codes without the interactive prompts
//!
//! Usage: cargo run --example generate_qr

use qrgen::{NativeRenderer, QrDecoder, QrRequest, QrStyle};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let renderer = NativeRenderer::new();

    let request = QrRequest::new("Hello from qrgen!", QrStyle::default());
    let image = renderer.render_blocking(&request)?;
    image.save("qr_output.png")?;
    println!("✓ QR code generated and saved to qr_output.png");

    // Smaller modules, thin border, high error correction.
    let style = QrStyle {
        module_size: 4,
        border: 1,
        error_correction: qrgen::ErrorCorrection::High,
        ..QrStyle::default()
    };
    let url = "https://example.com/a/fairly/long/path?with=query&and=more";
    let compact = renderer.render_blocking(&QrRequest::new(url, style))?;
    compact.save("qr_compact.png")?;

    let decoded = QrDecoder::new().decode(&compact)?;
    println!("✓ Compact QR code saved to qr_compact.png");
    println!("  Decodes back to: {decoded}");

    Ok(())
}
