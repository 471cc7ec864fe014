use clap::Args;
use colored::Colorize;
use lazykeg_common::config::Config;
use lazykeg_common::error::Result;
use lazykeg_common::paths::InstallPaths;
use lazykeg_core::uninstall::{uninstall_package, UninstallOptions};
use tracing::debug;

use crate::cli::PackageArgs;

#[derive(Args, Debug)]
pub struct Uninstall {
    #[command(flatten)]
    package: PackageArgs,

    /// Also remove the application's own files under ~/.local/share.
    /// Use with caution, data will be lost!
    #[arg(long)]
    pub zap: bool,
}

impl Uninstall {
    pub fn run(&self, config: &Config) -> Result<()> {
        let descriptor = self.package.resolve(config)?;
        let paths = InstallPaths::new(config, &descriptor);
        println!("Uninstalling {}...", descriptor.name);

        let removed = uninstall_package(&paths, &UninstallOptions { zap: self.zap })?;
        if removed.is_empty() {
            println!("{} {} is not installed", "Warning:".yellow(), descriptor.name);
            return Ok(());
        }
        for path in &removed {
            debug!("Removed {}", path.display());
            println!("  {} {}", "✓".green(), path.display());
        }
        println!(
            "{}Uninstalled {}",
            "==> ".bold().green(),
            descriptor.name.bold()
        );
        Ok(())
    }
}
