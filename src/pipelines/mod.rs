//! Pipelines.
//!
//! Each command line tool is a pipeline over record files:
//! - [Ingest] reads ODIN text files and splits them into groups,
//! - [Process] cleans and/or normalizes JSON Lines files, in place or as a stdin/stdout filter,
//! - [Group] regroups JSON Lines files by language or document.
//!
//! The module provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
mod group;
mod ingest;
#[allow(clippy::module_inception)]
pub mod pipeline;
mod process;

use std::path::PathBuf;

use log::warn;

use crate::error::Error;

pub use group::Group;
pub use ingest::{HeaderPolicy, Ingest};
pub use pipeline::Pipeline;
pub use process::{Mode, Process};

/// Expand source arguments: existing paths are kept as is, others are read as glob patterns.
pub fn expand_paths(srcs: &[PathBuf]) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();
    for src in srcs {
        if src.exists() {
            paths.push(src.clone());
            continue;
        }
        let pattern = src.to_string_lossy();
        let before = paths.len();
        for path in glob::glob(&pattern)? {
            paths.push(path?);
        }
        if paths.len() == before {
            warn!("no file matching {:?}", src);
        }
    }
    Ok(paths)
}

/// Fail if `dst` exists, create it otherwise.
pub(crate) fn create_outdir(dst: &std::path::Path) -> Result<(), Error> {
    if dst.exists() {
        return Err(Error::Custom(format!(
            "output directory {:?} already exists",
            dst
        )));
    }
    std::fs::create_dir_all(dst)?;
    Ok(())
}
