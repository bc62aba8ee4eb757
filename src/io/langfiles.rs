/*! Group-separated buffered record writer.

Records are cached per group key, and appended to the group's file
(see [crate::io::writer::group_path]) once [BUFFER_SIZE] records are waiting,
so that files are not reopened for every record.

## Warning

[GroupFiles::flush] has to be called once every write is done, or the last
buffered records are lost.
!*/
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::igt::Igt;
use crate::io::writer::WriterTrait;

/// Number of records cached per group before writing them.
pub const BUFFER_SIZE: usize = 1000;

pub struct GroupFiles<W: WriterTrait> {
    cache: HashMap<String, Vec<Igt>>,
    dst: PathBuf,
    buffer_size: usize,
    writer: PhantomData<W>,
}

impl<W: WriterTrait> GroupFiles<W> {
    pub fn new(dst: &Path) -> Self {
        Self::with_buffer_size(dst, BUFFER_SIZE)
    }

    pub fn with_buffer_size(dst: &Path, buffer_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            dst: dst.to_path_buf(),
            buffer_size: buffer_size.max(1),
            writer: PhantomData,
        }
    }

    /// Cache `igt` in group `key`, writing the group if its cache is full.
    pub fn write(&mut self, key: &str, igt: Igt) -> Result<(), Error> {
        let cache = self.cache.entry(key.to_string()).or_default();
        cache.push(igt);
        if cache.len() >= self.buffer_size {
            self.flush_key(key)?;
        }
        Ok(())
    }

    fn flush_key(&mut self, key: &str) -> Result<(), Error> {
        if let Some(records) = self.cache.remove(key) {
            debug!("{}: writing {} records", key, records.len());
            let mut w = W::new(&self.dst, key)?;
            w.write(&records)?;
        }
        Ok(())
    }

    /// Write every cached record.
    pub fn flush(&mut self) -> Result<(), Error> {
        let mut keys: Vec<String> = self.cache.keys().cloned().collect();
        keys.sort();
        info!("flushing {} groups", keys.len());
        for key in keys {
            self.flush_key(&key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::igt::{Line, Tag};
    use crate::io::reader::IgtReader;
    use crate::io::writer::WriterJsonl;

    use super::*;

    fn igt(doc_id: &str) -> Igt {
        Igt::new(doc_id, vec![Line::new(Tag::lexical(), "inu")])
    }

    fn count(path: &Path) -> usize {
        IgtReader::from_path(path).unwrap().count()
    }

    #[test]
    fn buffered_until_full() {
        let dst = tempfile::tempdir().unwrap();
        let mut files: GroupFiles<WriterJsonl> = GroupFiles::with_buffer_size(dst.path(), 2);
        let path = dst.path().join("a.jsonl");

        files.write("a", igt("1")).unwrap();
        assert!(!path.exists());
        files.write("a", igt("2")).unwrap();
        assert_eq!(count(&path), 2);

        files.write("a", igt("3")).unwrap();
        files.write("b:c", igt("4")).unwrap();
        files.flush().unwrap();
        assert_eq!(count(&path), 3);
        assert_eq!(count(&dst.path().join("b-c.jsonl")), 1);
        assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 2);
    }
}
