use std::path::Path;

use crate::error::Error;
use crate::igt::Igt;

/// Appends records to the file of a given group.
pub trait WriterTrait {
    /// Open (creating it if needed) the file of group `key` in `dst`.
    fn new(dst: &Path, key: &str) -> Result<Self, Error>
    where
        Self: Sized;
    fn write(&mut self, vals: &[Igt]) -> Result<(), Error>;
    fn write_single(&mut self, val: &Igt) -> Result<(), Error>;
}
