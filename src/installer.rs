//! Dependency installer invoked when no encoder can be located

use crate::config::InstallerOptions;
use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::process::Command;

/// Something that can try to make an encoding capability available
#[async_trait]
pub trait Installer: Send + Sync {
    /// Human-readable command line, shown before running
    fn describe(&self) -> String;

    /// Run the installation to completion.
    ///
    /// Returns [`Error::InstallFailed`] when the installer ran and reported
    /// failure, or [`Error::InstallerLaunch`] when it could not be started.
    async fn install(&self) -> Result<()>;
}

/// Runs a package-manager command as a subprocess
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    /// Create an installer for an explicit command
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create an installer from the `[installer]` configuration section
    pub fn from_options(options: &InstallerOptions) -> Self {
        Self::new(options.program.clone(), options.args.clone())
    }
}

#[async_trait]
impl Installer for CommandInstaller {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn install(&self) -> Result<()> {
        tracing::info!(command = %self.describe(), "Running dependency installer");

        // No timeout: a hung package manager blocks until it exits.
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| Error::InstallerLaunch(format!("{}: {e}", self.program)))?;

        if output.status.success() {
            tracing::info!("Dependency installer succeeded");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!(status = %output.status, "Dependency installer failed");
        Err(Error::InstallFailed(if stderr.is_empty() {
            format!("{} exited with {}", self.program, output.status)
        } else {
            stderr
        }))
    }
}
