// src/model/mod.rs
pub mod descriptor;

// Re-export
pub use descriptor::{is_sha256_hex, AppLayout, PackageDescriptor};
