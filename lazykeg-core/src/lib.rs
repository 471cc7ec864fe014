// lazykeg-core/src/lib.rs

pub mod check;
pub mod install;
pub mod launcher;
pub mod receipt;
pub mod uninstall;

// Re-export key types for easier use by the CLI crate
pub use check::{run_smoke_test, InstallStatus};
pub use install::{install_binary, install_from_bytes, install_package, InstallReport};
pub use launcher::{generate_launcher, Launcher, LauncherScript, SystemRunner, TargetPath};
pub use receipt::InstallReceipt;
pub use uninstall::{uninstall_package, UninstallOptions};
