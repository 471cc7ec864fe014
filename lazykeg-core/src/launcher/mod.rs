// lazykeg-core/src/launcher/mod.rs
pub mod runtime;
pub mod script;

pub use runtime::{LaunchOutcome, LaunchState, Launcher, ProcessRunner, SystemRunner};
pub use script::{generate_launcher, LauncherScript, LauncherScriptBuilder, TargetPath};
