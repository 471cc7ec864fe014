// lazykeg/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use lazykeg_common::error::Result;
use lazykeg_common::{Config, PackageDescriptor};
use tracing::debug;

pub mod checksum;
pub mod info;
pub mod install;
pub mod launch;
pub mod test;
pub mod uninstall;

use crate::cli::checksum::Checksum;
use crate::cli::info::Info;
use crate::cli::install::InstallArgs;
use crate::cli::launch::Launch;
use crate::cli::test::Test;
use crate::cli::uninstall::Uninstall;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "lazykeg", bin_name = "lazykeg")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download, verify and install the package and its launcher
    Install(InstallArgs),
    /// Install the application on first use, then run it with the given arguments
    #[command(disable_help_flag = true, disable_version_flag = true)]
    Launch(Launch),
    /// Show the package descriptor and what is installed
    Info(Info),
    /// Remove the installer binary, launcher and receipt
    Uninstall(Uninstall),
    /// Smoke-test the installed launcher with --help
    Test(Test),
    /// Print (or check) the SHA-256 of a local file
    Checksum(Checksum),
}

impl Command {
    /// Runs the command and returns the process exit code.
    pub async fn run(&self, config: &Config) -> Result<i32> {
        match self {
            Self::Install(command) => command.run(config).await.map(|_| 0),
            Self::Launch(command) => command.run(config),
            Self::Info(command) => command.run(config).map(|_| 0),
            Self::Uninstall(command) => command.run(config).map(|_| 0),
            Self::Test(command) => command.run(config).map(|_| 0),
            Self::Checksum(command) => command.run().await.map(|_| 0),
        }
    }
}

/// Selects the package descriptor a command operates on.
#[derive(Args, Debug, Clone, Default)]
pub struct PackageArgs {
    /// JSON package descriptor to use instead of the built-in fileshare one
    #[arg(long, value_name = "PATH")]
    pub descriptor: Option<PathBuf>,

    /// Expected SHA-256 of the release artifact, overriding the descriptor's
    #[arg(long, value_name = "HEX")]
    pub sha256: Option<String>,
}

impl PackageArgs {
    /// Loads the descriptor and checks the names that become install paths.
    pub fn resolve(&self, config: &Config) -> Result<PackageDescriptor> {
        let path = self
            .descriptor
            .as_ref()
            .or(config.descriptor_path.as_ref());
        let descriptor = match path {
            Some(path) => PackageDescriptor::from_path(path)?,
            None => {
                debug!("Using built-in fileshare descriptor");
                PackageDescriptor::fileshare()
            }
        };
        let descriptor = match &self.sha256 {
            Some(sha) => descriptor.with_sha256(sha.trim()),
            None => descriptor,
        };
        descriptor.validate_layout()?;
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use clap::Parser;
    use lazykeg_common::error::LazykegError;

    use super::*;

    fn launch_args(argv: &[&str]) -> (u8, Vec<OsString>) {
        let cli = CliArgs::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Launch(launch) => (cli.verbose, launch.args),
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn launch_forwards_lazykeg_looking_flags() {
        let (verbose, args) = launch_args(&["lazykeg", "launch", "-v", "serve"]);
        assert_eq!(verbose, 0);
        assert_eq!(args, vec![OsString::from("-v"), OsString::from("serve")]);

        let (_, args) = launch_args(&["lazykeg", "launch", "--sha256", "abc", "--descriptor"]);
        assert_eq!(args, ["--sha256", "abc", "--descriptor"].map(OsString::from));
    }

    #[test]
    fn verbosity_goes_before_the_subcommand() {
        let (verbose, args) = launch_args(&["lazykeg", "-vv", "launch", "--help"]);
        assert_eq!(verbose, 2);
        assert_eq!(args, vec![OsString::from("--help")]);
    }

    #[test]
    fn resolve_rejects_unsafe_layout() {
        let root = tempfile::tempdir().unwrap();
        let descriptor_path = root.path().join("descriptor.json");
        let mut descriptor = PackageDescriptor::fileshare();
        descriptor.app.share_dir = "/".to_string();
        std::fs::write(&descriptor_path, serde_json::to_vec(&descriptor).unwrap()).unwrap();

        let config = Config::with_roots(root.path().join("prefix"), root.path().join("home"));
        let args = PackageArgs {
            descriptor: Some(descriptor_path),
            sha256: None,
        };
        let err = args.resolve(&config).unwrap_err();
        assert!(matches!(err, LazykegError::Validation(_)), "{err}");
    }
}
