// lazykeg/src/cli/info.rs

use std::path::Path;

use clap::Args;
use colored::Colorize;
use lazykeg_common::config::Config;
use lazykeg_common::error::Result;
use lazykeg_common::paths::InstallPaths;
use lazykeg_core::check::InstallStatus;

use crate::cli::PackageArgs;

#[derive(Debug, Args)]
pub struct Info {
    #[command(flatten)]
    package: PackageArgs,
}

impl Info {
    pub fn run(&self, config: &Config) -> Result<()> {
        let descriptor = self.package.resolve(config)?;
        let paths = InstallPaths::new(config, &descriptor);
        let status = InstallStatus::inspect(&paths);

        println!(
            "{}{} {}",
            "==> ".bold().blue(),
            descriptor.name.bold(),
            descriptor.version
        );
        if let Some(desc) = &descriptor.desc {
            println!("{desc}");
        }
        println!("{}", descriptor.homepage);
        println!("From: {}", descriptor.url);
        let digest_note = match descriptor.validate() {
            Ok(()) => String::new(),
            Err(e) => format!(" ({})", e.to_string().red()),
        };
        println!("SHA-256: {}{}", descriptor.sha256, digest_note);

        println!();
        print_path("Installer", &paths.installer_path, status.installer_present);
        print_path("Launcher", &paths.launcher_path, status.launcher_present);
        print_path("Application", &paths.target_path(), status.target_present);

        match &status.receipt {
            Some(receipt) => println!(
                "\nInstalled {} {} at {}",
                receipt.name,
                receipt.version,
                receipt.installed_at.to_rfc3339()
            ),
            None => println!("\nNot installed"),
        }
        Ok(())
    }
}

fn print_path(label: &str, path: &Path, present: bool) {
    let mark = if present {
        "✓".green()
    } else {
        "✗".red()
    };
    println!("{mark} {label:<12} {}", path.display());
}
