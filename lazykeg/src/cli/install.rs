// lazykeg/src/cli/install.rs

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use lazykeg_common::config::Config;
use lazykeg_common::error::{LazykegError, Result};
use lazykeg_common::paths::InstallPaths;
use lazykeg_core::install::{install_from_bytes, install_package};
use lazykeg_net::Fetcher;
use tracing::instrument;

use crate::cli::PackageArgs;

#[derive(Debug, Args)]
pub struct InstallArgs {
    #[command(flatten)]
    package: PackageArgs,

    /// Install from an already downloaded artifact instead of fetching the url.
    /// The file is still verified against the expected SHA-256.
    #[arg(long, value_name = "FILE")]
    artifact: Option<PathBuf>,
}

impl InstallArgs {
    #[instrument(skip(self, config))]
    pub async fn run(&self, config: &Config) -> Result<()> {
        let descriptor = self.package.resolve(config)?;
        descriptor.validate()?;
        let paths = InstallPaths::new(config, &descriptor);

        println!(
            "{}Installing {} {}",
            "==> ".bold().blue(),
            descriptor.name.bold(),
            descriptor.version
        );

        let report = match &self.artifact {
            Some(file) => {
                let bytes = std::fs::read(file).map_err(|e| {
                    LazykegError::NotFound(format!(
                        "Cannot read artifact {}: {}",
                        file.display(),
                        e
                    ))
                })?;
                install_from_bytes(&descriptor, &paths, &bytes)?
            }
            None => {
                let fetcher = Fetcher::new()?.with_progress(true);
                install_package(&descriptor, &paths, &fetcher).await?
            }
        };

        println!(
            "{}Installed {} -> {}",
            "==> ".bold().green(),
            report.launcher_path.display(),
            report.installer_path.display()
        );
        println!(
            "    {} will be set up in {} on first launch",
            descriptor.app.display_name,
            paths.target_dir().display()
        );
        Ok(())
    }
}
