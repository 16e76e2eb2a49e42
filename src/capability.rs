//! Locating an encoding capability at runtime

use crate::config::{Backend, RenderOptions};
use crate::error::{Error, Result};
use crate::qr::{QrencodeRenderer, Renderer};
use std::env;
use std::path::{Path, PathBuf};

/// Finds a usable [`Renderer`], or reports why none is available.
///
/// Called again on every attempt, so a backend installed mid-run is seen by the retry.
pub trait Locator: Send + Sync {
    /// Return a ready renderer or [`Error::MissingCapability`]
    fn locate(&self) -> Result<Box<dyn Renderer>>;
}

/// Locator driven by the `[render]` configuration section
#[derive(Debug, Clone)]
pub struct SystemLocator {
    backend: Backend,
    qrencode_program: String,
}

impl SystemLocator {
    /// Create a locator for a backend and `qrencode` program name
    pub fn new(backend: Backend, qrencode_program: impl Into<String>) -> Self {
        Self {
            backend,
            qrencode_program: qrencode_program.into(),
        }
    }

    /// Create a locator from render options
    pub fn from_options(options: &RenderOptions) -> Self {
        Self::new(options.backend, options.qrencode_program.clone())
    }

    fn native(&self) -> Result<Box<dyn Renderer>> {
        #[cfg(feature = "native")]
        {
            Ok(Box::new(crate::qr::NativeRenderer::new()))
        }

        #[cfg(not(feature = "native"))]
        {
            Err(Error::MissingCapability(
                "this build does not include the native encoder".to_string(),
            ))
        }
    }

    fn qrencode(&self) -> Result<Box<dyn Renderer>> {
        match find_executable(&self.qrencode_program) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Found qrencode");
                Ok(Box::new(QrencodeRenderer::new(path)))
            }
            None => Err(Error::MissingCapability(format!(
                "'{}' was not found on PATH",
                self.qrencode_program
            ))),
        }
    }
}

impl Locator for SystemLocator {
    fn locate(&self) -> Result<Box<dyn Renderer>> {
        match self.backend {
            Backend::Native => self.native(),
            Backend::Qrencode => self.qrencode(),
            Backend::Auto if cfg!(feature = "native") => self.native(),
            Backend::Auto => self.qrencode(),
        }
    }
}

/// Resolve a program name against `PATH`.
///
/// Names containing a path separator are checked as given.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        executable_names(program)
            .into_iter()
            .map(|name| dir.join(name))
            .find(|path| is_executable(path))
    })
}

fn executable_names(program: &str) -> Vec<String> {
    if cfg!(windows) && Path::new(program).extension().is_none() {
        vec![format!("{program}.exe"), program.to_string()]
    } else {
        vec![program.to_string()]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_qrencode_is_missing_capability() {
        let locator = SystemLocator::new(Backend::Qrencode, "qrgen-test-no-such-qrencode");
        match locator.locate() {
            Err(Error::MissingCapability(reason)) => {
                assert!(reason.contains("qrgen-test-no-such-qrencode"))
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(renderer) => panic!("unexpectedly found {}", renderer.name()),
        }
    }

    #[cfg(feature = "native")]
    #[test]
    fn auto_prefers_native_when_compiled_in() {
        let locator = SystemLocator::new(Backend::Auto, "qrgen-test-no-such-qrencode");
        assert_eq!(locator.locate().unwrap().name(), "native");
    }

    #[cfg(not(feature = "native"))]
    #[test]
    fn native_is_missing_without_feature() {
        let locator = SystemLocator::new(Backend::Native, "qrencode");
        assert!(locator.locate().unwrap_err().is_missing_capability());
    }

    #[cfg(unix)]
    #[test]
    fn explicit_path_must_be_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("qrencode");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        assert!(find_executable(script.to_str().unwrap()).is_none());

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(find_executable(script.to_str().unwrap()), Some(script.clone()));

        let locator = SystemLocator::new(Backend::Qrencode, script.to_str().unwrap());
        assert_eq!(locator.locate().unwrap().name(), "qrencode");
    }
}
