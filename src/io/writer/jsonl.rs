/*! JSON Lines writer.

Writes one serialized [Igt] per line, appending to the group file.
!*/
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::igt::Igt;

use super::{group_path, Format, WriterTrait};

pub struct WriterJsonl<W: Write = BufWriter<File>> {
    handle: W,
}

impl<W: Write> WriterJsonl<W> {
    /// Wrap an existing writer (stdout, for example).
    pub fn from_writer(handle: W) -> Self {
        Self { handle }
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        Ok(self.handle.flush()?)
    }

    pub fn write_record(&mut self, igt: &Igt) -> Result<(), Error> {
        serde_json::to_writer(&mut self.handle, igt)?;
        self.handle.write_all(b"\n")?;
        Ok(())
    }
}

impl WriterTrait for WriterJsonl {
    fn new(dst: &Path, key: &str) -> Result<Self, Error> {
        let path = group_path(dst, key, Format::Jsonl);
        debug!("opening {:?}", path);
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(BufWriter::new(f)))
    }

    fn write(&mut self, vals: &[Igt]) -> Result<(), Error> {
        let mut records = String::new();
        for igt in vals {
            records += &serde_json::to_string(igt)?;
            records.push('\n');
        }
        self.handle.write_all(records.as_bytes())?;
        self.flush()
    }

    fn write_single(&mut self, val: &Igt) -> Result<(), Error> {
        self.write_record(val)
    }
}

#[cfg(test)]
mod tests {
    use crate::igt::{Line, Tag};
    use crate::io::reader::IgtReader;

    use super::*;

    #[test]
    fn write_and_append() {
        let dst = tempfile::tempdir().unwrap();
        let igt = Igt::new("12", vec![Line::new(Tag::lexical(), "inu").with_source_line(3)]);

        let mut wr: WriterJsonl = WriterJsonl::new(dst.path(), "12").unwrap();
        wr.write(&[igt.clone()]).unwrap();
        drop(wr);
        let mut wr: WriterJsonl = WriterJsonl::new(dst.path(), "12").unwrap();
        wr.write_single(&igt).unwrap();
        wr.flush().unwrap();

        let records: Vec<Igt> = IgtReader::from_path(&dst.path().join("12.jsonl"))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records, vec![igt.clone(), igt]);
    }

    #[test]
    fn to_memory() {
        let igt = Igt::new("12", vec![Line::new(Tag::lexical(), "inu")]);
        let mut wr = WriterJsonl::from_writer(Vec::new());
        wr.write_record(&igt).unwrap();
        let written = String::from_utf8(wr.handle).unwrap();
        assert!(written.ends_with('\n'));
        assert_eq!(serde_json::from_str::<Igt>(written.trim()).unwrap(), igt);
    }
}
