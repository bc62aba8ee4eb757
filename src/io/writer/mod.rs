/*!
# Record writing

Records are written either back in the ODIN text format ([WriterOdin]), or as
JSON Lines ([WriterJsonl]). Both append to a file per group, named after the group key.
!*/
mod jsonl;
mod odintxt;
mod writertrait;

use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use jsonl::WriterJsonl;
pub use odintxt::{format_igt, WriterOdin};
pub use writertrait::WriterTrait;

use crate::error::Error;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Odin,
    Jsonl,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Odin => "txt",
            Format::Jsonl => "jsonl",
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::Odin
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "odin" | "txt" => Ok(Format::Odin),
            "jsonl" | "json" => Ok(Format::Jsonl),
            other => Err(Error::Custom(format!("unknown output format: {}", other))),
        }
    }
}

/// Path of the file holding group `key`. `:` is not kept in file names.
pub fn group_path(dst: &Path, key: &str, format: Format) -> PathBuf {
    let mut path = dst.to_path_buf();
    path.push(format!("{}.{}", key.replace(':', "-"), format.extension()));
    path
}
