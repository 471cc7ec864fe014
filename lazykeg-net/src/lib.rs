// lazykeg-net/src/lib.rs
pub mod http;
pub mod validation;

pub use http::{cache_path_for, Fetcher};
pub use validation::{sha256_hex, validate_url, verify_checksum, verify_digest};
