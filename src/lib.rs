//! qrgen - interactive QR code generator
//!
//! Reads a line of text from the user, renders it as a QR code through an
//! encoder backend and saves the image. When no encoder can be found, qrgen
//! runs a package-manager install and retries a bounded number of times.
//!
//! # Backends
//!
//! - **native**: the `qrcode` crate linked into the binary (`native` feature, on by default)
//! - **qrencode**: the external `qrencode` program, located on `PATH`
//!
//! # Example
//!
//! ```no_run
//! use qrgen::{CommandInstaller, Generator, GeneratorSettings, QrgenConfig, StdConsole, SystemLocator};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> qrgen::Result<()> {
//!     let config = QrgenConfig::load(None)?;
//!     let generator = Generator::new(
//!         SystemLocator::from_options(&config.render),
//!         CommandInstaller::from_options(&config.installer),
//!         GeneratorSettings::from(&config),
//!     );
//!
//!     let outcome = generator.run(&mut StdConsole::new()).await?;
//!     println!("finished: {}", outcome.label());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod capability;
pub mod config;
pub mod console;
pub mod error;
pub mod installer;
pub mod logging;
pub mod output;
pub mod qr;
pub mod shell;

// Re-exports for convenience
pub use error::{Error, Result};

pub use capability::{Locator, SystemLocator};
pub use config::{Backend, InstallerOptions, LoggingOptions, OutputOptions, QrgenConfig, RenderOptions};
pub use console::{Console, StdConsole};
pub use installer::{CommandInstaller, Installer};
pub use qr::{ErrorCorrection, QrDecoder, QrRequest, QrStyle, QrencodeRenderer, Renderer};
pub use shell::{Generator, GeneratorSettings, Outcome, SavedQr};

#[cfg(feature = "native")]
#[cfg_attr(docsrs, doc(cfg(feature = "native")))]
pub use qr::NativeRenderer;
