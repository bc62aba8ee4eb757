//! Cleaning and normalization of JSON Lines record files.
//!
//! Works either in place over a list of files (one file per worker), or as a filter
//! from stdin to stdout when no file is given.
//! Records are handled independently: a tier that is already there is never regenerated,
//! so processing the same file twice changes nothing the second time.
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use rayon::prelude::*;

use crate::config::Config;
use crate::error::Error;
use crate::igt::Igt;
use crate::io::reader::Reader;
use crate::io::writer::WriterJsonl;
use crate::transformers::{Cleaner, Normalizer, Transform};

use super::Pipeline;

/// Tiers to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Clean,
    Normalize,
    /// Clean, then normalize.
    Both,
}

pub struct Process {
    srcs: Vec<PathBuf>,
    transforms: Vec<Box<dyn Transform + Send + Sync>>,
}

impl Process {
    /// Process `srcs` in place, or stdin if `srcs` is empty.
    pub fn new(srcs: Vec<PathBuf>, mode: Mode, config: &Config) -> Result<Self, Error> {
        let mut transforms: Vec<Box<dyn Transform + Send + Sync>> = Vec::new();
        if mode != Mode::Normalize {
            transforms.push(Box::new(Cleaner::from_config(config)));
        }
        if mode != Mode::Clean {
            transforms.push(Box::new(Normalizer::from_config(config)?));
        }
        Ok(Self { srcs, transforms })
    }

    /// Run every transform on a single record.
    pub fn process(&self, igt: Igt) -> Igt {
        self.transforms
            .iter()
            .fold(igt, |igt, transform| transform.transform_own(igt))
    }

    fn process_stream<R: Read, W: Write>(
        &self,
        src: R,
        dst: &mut WriterJsonl<W>,
    ) -> Result<usize, Error> {
        let mut nb_records = 0;
        for igt in Reader::new(src) {
            dst.write_record(&self.process(igt?))?;
            nb_records += 1;
        }
        dst.flush()?;
        Ok(nb_records)
    }

    /// Process a file, replacing it once every record has been written.
    fn process_file(&self, src: &Path) -> Result<usize, Error> {
        let mut tmp_name = src.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = src.with_file_name(tmp_name);

        let nb_records = {
            let f = File::open(src)?;
            let mut w = WriterJsonl::from_writer(BufWriter::new(File::create(&tmp)?));
            match self.process_stream(f, &mut w) {
                Ok(nb) => nb,
                Err(e) => {
                    drop(w);
                    fs::remove_file(&tmp)?;
                    return Err(e);
                }
            }
        };
        fs::rename(&tmp, src)?;
        Ok(nb_records)
    }

    fn filter(&self) -> Result<usize, Error> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut w = WriterJsonl::from_writer(BufWriter::new(stdout.lock()));
        self.process_stream(stdin.lock(), &mut w)
    }
}

impl Pipeline<usize> for Process {
    fn version() -> &'static str {
        "1.0.0"
    }

    /// Returns the number of processed records.
    ///
    /// A failing file does not stop the others, but makes the whole run fail.
    fn run(&self) -> Result<usize, Error> {
        if self.srcs.is_empty() {
            return self.filter();
        }

        let results: Vec<(&PathBuf, Result<usize, Error>)> = self
            .srcs
            .par_iter()
            .map(|src| (src, self.process_file(src)))
            .collect();

        let mut nb_records = 0;
        let mut nb_failed = 0;
        for (src, result) in results {
            match result {
                Ok(nb) => {
                    info!("{:?}: {} records", src, nb);
                    nb_records += nb;
                }
                Err(e) => {
                    error!("{:?}: {}", src, e);
                    nb_failed += 1;
                }
            }
        }

        if nb_failed > 0 {
            return Err(Error::Custom(format!(
                "{} of {} files could not be processed",
                nb_failed,
                self.srcs.len()
            )));
        }
        Ok(nb_records)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::igt::{Line, Tag, TierState};
    use crate::io::reader::IgtReader;

    use super::*;

    fn igt() -> Igt {
        Igt::new(
            "1",
            vec![
                Line::new(Tag::lexical(), "inu ga hashiru").with_source_line(1),
                Line::new(Tag::translation(), "'the dog runs'").with_source_line(2),
            ],
        )
    }

    fn write_records(path: &Path, records: &[Igt]) {
        let mut w = WriterJsonl::from_writer(File::create(path).unwrap());
        for igt in records {
            w.write_record(igt).unwrap();
        }
        w.flush().unwrap();
    }

    #[test]
    fn modes() {
        let config = Config::default();
        let clean = Process::new(vec![], Mode::Clean, &config).unwrap();
        let igt = clean.process(igt());
        assert!(igt.has_tier(TierState::Cleaned));
        assert!(!igt.has_tier(TierState::Normalized));

        let both = Process::new(vec![], Mode::Both, &config).unwrap();
        let igt = both.process(igt);
        let normalized = igt.tier(TierState::Normalized).unwrap();
        assert_eq!(normalized.lines()[1].text(), "the dog runs");
    }

    #[test]
    fn stream() {
        let config = Config::default();
        let process = Process::new(vec![], Mode::Both, &config).unwrap();
        let mut src = Vec::new();
        WriterJsonl::from_writer(&mut src)
            .write_record(&igt())
            .unwrap();

        let mut out = Vec::new();
        let mut w = WriterJsonl::from_writer(&mut out);
        let nb = process.process_stream(Cursor::new(src), &mut w).unwrap();
        assert_eq!(nb, 1);
        drop(w);
        let igt: Igt = serde_json::from_slice(&out).unwrap();
        assert!(igt.has_tier(TierState::Normalized));
    }

    #[test]
    fn in_place_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("1.jsonl");
        write_records(&src, &[igt(), igt()]);

        let process = Process::new(vec![src.clone()], Mode::Both, &Config::default()).unwrap();
        assert_eq!(process.run().unwrap(), 2);
        let once = fs::read_to_string(&src).unwrap();
        process.run().unwrap();
        let twice = fs::read_to_string(&src).unwrap();
        assert_eq!(once, twice);

        let records: Vec<Igt> = IgtReader::from_path(&src)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert!(records.iter().all(|igt| igt.has_tier(TierState::Cleaned)));
        assert!(!dir.path().join("1.jsonl.tmp").exists());
    }

    #[test]
    fn failing_file_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.jsonl");
        let bad = dir.path().join("bad.jsonl");
        write_records(&good, &[igt()]);
        fs::write(&bad, "not json\n").unwrap();

        let process =
            Process::new(vec![bad.clone(), good.clone()], Mode::Clean, &Config::default()).unwrap();
        assert!(process.run().is_err());
        assert_eq!(fs::read_to_string(&bad).unwrap(), "not json\n");
        let igt = IgtReader::from_path(&good)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert!(igt.has_tier(TierState::Cleaned));
    }
}
