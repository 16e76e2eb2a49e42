//! The interactive generator shell
//!
//! One run prompts for text and a filename, renders the text through a located
//! [`Renderer`](crate::qr::Renderer) and saves the image. A missing encoder triggers the
//! [`Installer`] and a bounded number of full retries.

use crate::capability::Locator;
use crate::config::QrgenConfig;
use crate::console::Console;
use crate::error::{Error, Result};
use crate::installer::Installer;
use crate::output;
use crate::qr::{QrDecoder, QrRequest, QrStyle};
use std::path::PathBuf;
use tracing::{info, warn};

/// Prompt for the payload
pub const DATA_PROMPT: &str = "Enter the text or URL: ";
/// Prompt for the output path
pub const FILENAME_PROMPT: &str = "Enter the filename (e.g., qrcode.png): ";

/// Knobs for a [`Generator`]
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Presentation parameters for every code
    pub style: QrStyle,
    /// Path used when the filename answer is blank
    pub default_filename: PathBuf,
    /// Characters of payload echoed after saving
    pub preview_chars: usize,
    /// Decode each image before saving it
    pub verify: bool,
    /// Install-and-retry cycles allowed per run
    pub max_install_retries: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from(&QrgenConfig::default())
    }
}

impl From<&QrgenConfig> for GeneratorSettings {
    fn from(config: &QrgenConfig) -> Self {
        Self {
            style: config.render.style(),
            default_filename: config.output.default_filename.clone(),
            preview_chars: config.output.preview_chars,
            verify: config.output.verify,
            max_install_retries: config.installer.max_retries,
        }
    }
}

/// A QR code written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedQr {
    /// Where the image was written
    pub path: PathBuf,
    /// The encoded text
    pub data: String,
    /// Backend that rendered it
    pub backend: &'static str,
}

/// How a run ended
#[derive(Debug)]
pub enum Outcome {
    /// Image written
    Saved(SavedQr),
    /// Blank text answer; nothing written
    EmptyInput,
    /// No encoder, and automatic installation did not help
    ManualInstallRequired,
    /// Any other failure; nothing retried
    Failed(Error),
}

impl Outcome {
    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Saved(_) => "saved",
            Outcome::EmptyInput => "empty_input",
            Outcome::ManualInstallRequired => "manual_install_required",
            Outcome::Failed(_) => "failed",
        }
    }
}

/// Generator shell tying discovery, installation and the console together
pub struct Generator<L, I> {
    locator: L,
    installer: I,
    settings: GeneratorSettings,
}

impl<L: Locator, I: Installer> Generator<L, I> {
    /// Create a shell from its collaborators
    pub fn new(locator: L, installer: I, settings: GeneratorSettings) -> Self {
        Self {
            locator,
            installer,
            settings,
        }
    }

    /// Run until a terminal outcome.
    ///
    /// Every failure is reported on the console and folded into the [`Outcome`];
    /// `Err` is returned only when the console itself cannot be written.
    pub async fn run<C: Console + ?Sized>(&self, console: &mut C) -> Result<Outcome> {
        let mut installs = 0u32;

        loop {
            match self.attempt(console).await {
                Ok(saved) => {
                    console.say_all(&output::saved(&saved, self.settings.preview_chars))?;
                    return Ok(Outcome::Saved(saved));
                }
                Err(Error::EmptyInput) => {
                    console.say_all(&output::empty_input())?;
                    return Ok(Outcome::EmptyInput);
                }
                Err(Error::MissingCapability(reason)) => {
                    warn!(%reason, installs, "QR encoder unavailable");
                    console.say_all(&output::missing_capability(&reason))?;

                    if installs >= self.settings.max_install_retries {
                        console.say_all(&output::manual_install())?;
                        return Ok(Outcome::ManualInstallRequired);
                    }

                    console.say_all(&output::install_started(&self.installer.describe()))?;
                    match self.installer.install().await {
                        Ok(()) => {
                            installs += 1;
                            console.say_all(&output::install_succeeded())?;
                        }
                        Err(err) => {
                            console.say_all(&output::install_failed(&err))?;
                            return Ok(Outcome::ManualInstallRequired);
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, "QR generation failed");
                    console.say_all(&output::failure(&err))?;
                    return Ok(Outcome::Failed(err));
                }
            }
        }
    }

    async fn attempt<C: Console + ?Sized>(&self, console: &mut C) -> Result<SavedQr> {
        let renderer = self.locator.locate()?;
        info!(backend = renderer.name(), "QR encoder located");
        console.say(&output::capability_available(renderer.name()))?;

        let data = console.prompt(DATA_PROMPT).await?.trim().to_string();
        let filename = console.prompt(FILENAME_PROMPT).await?.trim().to_string();

        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let path = if filename.is_empty() {
            self.settings.default_filename.clone()
        } else {
            PathBuf::from(filename)
        };

        let request = QrRequest::new(data, self.settings.style.clone());
        let image = renderer.render(&request).await?;

        if self.settings.verify {
            QrDecoder::new().verify(&image, &request.data)?;
        }

        image.save(&path)?;
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            backend = renderer.name(),
            "QR code saved"
        );

        Ok(SavedQr {
            path,
            data: request.data,
            backend: renderer.name(),
        })
    }
}
