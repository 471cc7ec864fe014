use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use lazykeg_aio::checksum::{sha256_file_async, verify_checksum_async};
use lazykeg_common::error::Result;

#[derive(Args, Debug)]
pub struct Checksum {
    /// File to hash
    pub file: PathBuf,

    /// Fail unless the file's SHA-256 equals this value
    #[arg(long, value_name = "HEX")]
    pub expect: Option<String>,
}

impl Checksum {
    pub async fn run(&self) -> Result<()> {
        match &self.expect {
            Some(expected) => {
                verify_checksum_async(&self.file, expected.trim()).await?;
                println!("{} {}", "OK".green().bold(), self.file.display());
            }
            None => {
                let digest = sha256_file_async(&self.file).await?;
                println!("{}  {}", digest, self.file.display());
            }
        }
        Ok(())
    }
}
