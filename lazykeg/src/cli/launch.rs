// lazykeg/src/cli/launch.rs

use std::ffi::OsString;
use std::io;

use clap::Args;
use lazykeg_common::config::Config;
use lazykeg_common::error::Result;
use lazykeg_common::paths::InstallPaths;
use lazykeg_core::launcher::{Launcher, SystemRunner};

use crate::cli::PackageArgs;

// Takes no options of its own; the descriptor comes from `LAZYKEG_DESCRIPTOR`
// or the built-in one, so every argument belongs to the application.
#[derive(Debug, Args)]
pub struct Launch {
    /// Arguments forwarded verbatim to the application
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}

impl Launch {
    pub fn run(&self, config: &Config) -> Result<i32> {
        // The descriptor is only needed for names and paths here; nothing is
        // downloaded, so the digest is not validated.
        let descriptor = PackageArgs::default().resolve(config)?;
        let paths = InstallPaths::new(config, &descriptor);
        let mut launcher = Launcher::new(
            &paths,
            &descriptor.app.display_name,
            SystemRunner::default(),
        );
        let outcome = launcher.run(&self.args, &mut io::stdout())?;
        Ok(outcome.exit_code)
    }
}
