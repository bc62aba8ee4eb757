/*! JSON Lines record reader.
 * !*/
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use crate::error::Error;
use crate::igt::Igt;

/// Iterates over the records of a JSON Lines source, one [Igt] per line.
///
/// Empty lines are skipped.
#[derive(Debug)]
pub struct Reader<T>
where
    T: Read,
{
    lines: Lines<BufReader<T>>,
}

pub type IgtReader = Reader<File>;

impl IgtReader {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let handler = File::open(src)?;
        Ok(Self::new(handler))
    }
}

impl<T> Reader<T>
where
    T: Read,
{
    pub fn new(reader: T) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl<T> Iterator for Reader<T>
where
    T: Read,
{
    type Item = Result<Igt, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let record_str = loop {
            match self.lines.next() {
                Some(Ok(s)) if s.trim().is_empty() => continue,
                Some(Ok(s)) => break s,
                Some(Err(e)) => return Some(Err(Error::Io(e))),
                None => return None,
            }
        };

        //parsing
        Some(serde_json::from_str::<Igt>(&record_str).map_err(Error::Serde))
    }
}
