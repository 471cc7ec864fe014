// lazykeg-common/src/lib.rs
pub mod config;
pub mod error;
pub mod model;
pub mod paths;

// Re-export key types
pub use config::Config;
pub use error::{LazykegError, Result};
pub use model::PackageDescriptor;
pub use paths::InstallPaths;
