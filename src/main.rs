//! qrgen entrypoint

use clap::Parser;
use qrgen::{
    CommandInstaller, Console, Generator, GeneratorSettings, QrgenConfig, Result, StdConsole,
    SystemLocator, logging, output,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrgen",
    version,
    about = "Interactive QR code generator",
    long_about = "Prompts for text or a URL and a filename, then writes the QR code image.\n\
                  Settings are read from qrgen.toml / qrgen.yaml and QRGEN_* environment variables."
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrgen.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = QrgenConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;
    info!(backend = ?config.render.backend, "Starting qrgen");

    let generator = Generator::new(
        SystemLocator::from_options(&config.render),
        CommandInstaller::from_options(&config.installer),
        GeneratorSettings::from(&config),
    );

    let mut console = StdConsole::new();
    console.say_all(&output::banner())?;

    let outcome = generator.run(&mut console).await?;
    info!(outcome = outcome.label(), "qrgen finished");

    Ok(())
}
