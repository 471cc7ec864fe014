// lazykeg-aio/src/lib.rs
//! IO operations for lazykeg (filesystem, json, checksums, process)

pub mod checksum;
pub mod fs;
pub mod json_io;
pub mod process;

pub use checksum::{sha256_file_async, verify_checksum_async};
pub use fs::{atomic_write_file, is_executable, remove_path_if_exists, set_permissions};
pub use json_io::{read_json, write_json};
pub use process::{exec_or_wait, run_blocking, spawn_and_wait};
