use clap::Args;
use colored::Colorize;
use lazykeg_common::config::Config;
use lazykeg_common::error::Result;
use lazykeg_common::paths::InstallPaths;
use lazykeg_core::check::run_smoke_test;

use crate::cli::PackageArgs;

#[derive(Args, Debug)]
pub struct Test {
    #[command(flatten)]
    package: PackageArgs,
}

impl Test {
    pub fn run(&self, config: &Config) -> Result<()> {
        let descriptor = self.package.resolve(config)?;
        let paths = InstallPaths::new(config, &descriptor);
        println!(
            "{}Testing {} --help",
            "==> ".bold().blue(),
            paths.launcher_path.display()
        );
        run_smoke_test(&paths)?;
        println!("{}{} passed", "==> ".bold().green(), descriptor.name.bold());
        Ok(())
    }
}
