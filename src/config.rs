//! qrgen runtime configuration handling

use crate::error::{Error, Result};
use crate::qr::{ErrorCorrection, QrStyle};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrgenConfig {
    /// QR rendering options
    pub render: RenderOptions,
    /// Output file and console options
    pub output: OutputOptions,
    /// Dependency installer invocation
    pub installer: InstallerOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrgenConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrgen.toml / qrgen.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrgen.toml", "qrgen.yaml", "qrgen.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrgen");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.render.apply_env_overrides();
        self.output.apply_env_overrides();
        self.installer.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// Which encoder backend to use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Built-in encoder when compiled in, otherwise `qrencode`
    #[default]
    Auto,
    /// The `qrcode` crate linked into this binary
    Native,
    /// The external `qrencode` program
    Qrencode,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "native" => Ok(Self::Native),
            "qrencode" => Ok(Self::Qrencode),
            _ => Err(format!(
                "Unsupported backend '{value}', expected 'auto', 'native' or 'qrencode'"
            )),
        }
    }
}

/// QR presentation parameters and backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Encoder backend
    pub backend: Backend,
    /// Pixels per QR module
    pub module_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Error correction level
    pub error_correction: ErrorCorrection,
    /// RGB fill colour for dark modules
    pub dark: [u8; 3],
    /// RGB background colour
    pub light: [u8; 3],
    /// Program name or path of the external `qrencode` binary
    pub qrencode_program: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            backend: Backend::Auto,
            module_size: 10,
            border: 4,
            error_correction: ErrorCorrection::Medium,
            dark: [0, 0, 0],
            light: [255, 255, 255],
            qrencode_program: "qrencode".to_string(),
        }
    }
}

impl RenderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(backend) = env::var("QRGEN_BACKEND") {
            match backend.parse::<Backend>() {
                Ok(parsed) => self.backend = parsed,
                Err(err) => tracing::warn!("Ignoring QRGEN_BACKEND: {err}"),
            }
        }
        if let Ok(size) = env::var("QRGEN_MODULE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.module_size = parsed.max(1);
            }
        }
        if let Ok(border) = env::var("QRGEN_BORDER") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.border = parsed;
            }
        }
        if let Ok(level) = env::var("QRGEN_EC_LEVEL") {
            if let Ok(parsed) = level.parse::<ErrorCorrection>() {
                self.error_correction = parsed;
            }
        }
        if let Ok(program) = env::var("QRGEN_QRENCODE") {
            if !program.trim().is_empty() {
                self.qrencode_program = program;
            }
        }
    }

    /// Resolve the presentation parameters handed to every renderer.
    pub fn style(&self) -> QrStyle {
        QrStyle {
            module_size: self.module_size.max(1),
            border: self.border,
            error_correction: self.error_correction,
            dark: self.dark,
            light: self.light,
        }
    }
}

/// Output file and console presentation options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Path used when the user leaves the filename prompt empty
    pub default_filename: PathBuf,
    /// Number of characters of the payload echoed back after saving
    pub preview_chars: usize,
    /// Decode every rendered image before saving it
    pub verify: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            default_filename: PathBuf::from("qrcode.png"),
            preview_chars: 50,
            verify: false,
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(filename) = env::var("QRGEN_DEFAULT_FILENAME") {
            if !filename.trim().is_empty() {
                self.default_filename = PathBuf::from(filename.trim());
            }
        }
        if let Ok(verify) = env::var("QRGEN_VERIFY") {
            if let Some(flag) = parse_flag(&verify) {
                self.verify = flag;
            }
        }
    }
}

/// Package-manager command used when no encoder can be located
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerOptions {
    /// Program to execute
    pub program: String,
    /// Arguments passed to `program`
    pub args: Vec<String>,
    /// How many install-and-retry cycles a single run may perform
    pub max_retries: u32,
}

impl Default for InstallerOptions {
    fn default() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("brew", &["install", "qrencode"])
        } else if cfg!(target_os = "windows") {
            ("scoop", &["install", "qrencode"])
        } else {
            ("apt-get", &["install", "-y", "qrencode"])
        };

        Self {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            max_retries: 1,
        }
    }
}

impl InstallerOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(program) = env::var("QRGEN_INSTALLER") {
            if !program.trim().is_empty() {
                self.program = program.trim().to_string();
            }
        }
        if let Ok(args) = env::var("QRGEN_INSTALLER_ARGS") {
            self.args = args.split_whitespace().map(str::to_string).collect();
        }
        if let Ok(retries) = env::var("QRGEN_INSTALL_RETRIES") {
            if let Ok(parsed) = retries.parse::<u32>() {
                self.max_retries = parsed;
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRGEN_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRGEN_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRGEN_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRGEN_LOG_COLOR") {
            if let Some(flag) = parse_flag(&color) {
                self.color = flag;
            }
        }
        if let Ok(rotation) = env::var("QRGEN_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}
