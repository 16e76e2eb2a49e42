//! QR code renderer that shells out to the `qrencode` program

use crate::error::{Error, Result};
use crate::qr::{QrRequest, Renderer};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};

/// Renderer backed by an external `qrencode` binary
#[derive(Debug, Clone)]
pub struct QrencodeRenderer {
    program: PathBuf,
}

impl QrencodeRenderer {
    /// Create a renderer that runs the given executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(request: &QrRequest) -> Vec<String> {
        let style = &request.style;
        vec![
            "-t".to_string(),
            "PNG".to_string(),
            "-o".to_string(),
            "-".to_string(),
            "-8".to_string(),
            "-s".to_string(),
            style.module_size.to_string(),
            "-m".to_string(),
            style.border.to_string(),
            "-l".to_string(),
            style.error_correction.letter().to_string(),
            format!("--foreground={}", hex_rgb(style.dark)),
            format!("--background={}", hex_rgb(style.light)),
        ]
    }
}

#[async_trait]
impl Renderer for QrencodeRenderer {
    fn name(&self) -> &'static str {
        "qrencode"
    }

    async fn render(&self, request: &QrRequest) -> Result<DynamicImage> {
        let mut child = Command::new(&self.program)
            .args(Self::args(request))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::QrEncode(format!("failed to run {}: {e}", self.program.display()))
            })?;

        // qrencode reads the payload from stdin when no string argument is given.
        // Feeding it alongside the wait keeps the child's stderr when it exits early.
        let stdin = child.stdin.take();
        let (written, output) = tokio::join!(
            feed_payload(stdin, request.data.as_bytes()),
            child.wait_with_output()
        );
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("qrencode exited with {}", output.status)
            } else {
                stderr
            };
            return Err(Error::QrEncode(message));
        }

        match written {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!("qrencode closed stdin before reading the whole payload");
            }
            other => other?,
        }

        tracing::debug!(bytes = output.stdout.len(), "qrencode produced PNG");
        Ok(image::load_from_memory_with_format(
            &output.stdout,
            ImageFormat::Png,
        )?)
    }
}

async fn feed_payload(stdin: Option<ChildStdin>, payload: &[u8]) -> std::io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    stdin.write_all(payload).await?;
    stdin.shutdown().await
}

fn hex_rgb(rgb: [u8; 3]) -> String {
    format!("{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}
