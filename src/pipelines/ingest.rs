//! ODIN text ingestion.
//!
//! Reads ODIN text files (or stdin), optionally assigns instance ids, and splits
//! the instances into one file per key value.
//!
//! Ids are assigned while reading, in input order, before any splitting:
//! ingesting the same sources twice with different keys yields the same ids.
use std::io::BufRead;
use std::path::PathBuf;
use std::str::FromStr;

use log::{error, info};

use crate::config::Config;
use crate::error::Error;
use crate::igt::Igt;
use crate::io::reader::OdinReader;
use crate::io::writer::{Format, WriterJsonl, WriterOdin, WriterTrait};
use crate::io::GroupFiles;
use crate::processing::split::UNGROUPED;
use crate::processing::{IdAssigner, SplitKey};

use super::{create_outdir, Pipeline};

/// What to do with the free-form header lines of ODIN blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    Keep,
    Discard,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        HeaderPolicy::Discard
    }
}

impl FromStr for HeaderPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(HeaderPolicy::Keep),
            "discard" => Ok(HeaderPolicy::Discard),
            other => Err(Error::Custom(format!("unknown header policy: {}", other))),
        }
    }
}

pub struct Ingest {
    srcs: Vec<PathBuf>,
    dst: PathBuf,
    key: SplitKey,
    first_id: Option<usize>,
    header_policy: HeaderPolicy,
    format: Format,
    config: Config,
}

impl Ingest {
    /// Ingest `srcs` (stdin if empty) into `dst`, split by `key`.
    pub fn new(srcs: Vec<PathBuf>, dst: PathBuf, key: SplitKey, config: Config) -> Self {
        Self {
            srcs,
            dst,
            key,
            first_id: None,
            header_policy: HeaderPolicy::default(),
            format: Format::default(),
            config,
        }
    }

    /// Assign ids, numbering the instances of each document from `first_id`.
    pub fn assign_ids(mut self, first_id: usize) -> Self {
        self.first_id = Some(first_id);
        self
    }

    pub fn header_policy(mut self, header_policy: HeaderPolicy) -> Self {
        self.header_policy = header_policy;
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sources that cannot be read do not stop the others, but make the whole run fail
    /// once every readable instance has been written.
    fn split<W: WriterTrait>(&self) -> Result<usize, Error> {
        let mut groups: GroupFiles<W> = GroupFiles::new(&self.dst);
        let mut assigner = self.first_id.map(IdAssigner::new);

        if self.srcs.is_empty() {
            let stdin = std::io::stdin();
            let reader = OdinReader::new(stdin.lock(), &self.config);
            let (nb_records, read_error) = self.read(reader, &mut assigner, &mut groups)?;
            groups.flush()?;
            return match read_error {
                Some(e) => Err(e),
                None => Ok(nb_records),
            };
        }

        let mut nb_records = 0;
        let mut nb_failed = 0;
        for src in &self.srcs {
            info!("reading {:?}", src);
            let reader = match OdinReader::from_path(src, &self.config) {
                Ok(reader) => reader,
                Err(e) => {
                    error!("could not open {:?}: {}", src, e);
                    nb_failed += 1;
                    continue;
                }
            };
            let (nb, read_error) = self.read(reader, &mut assigner, &mut groups)?;
            nb_records += nb;
            if let Some(e) = read_error {
                error!("{:?}: read stopped after {} instances: {}", src, nb, e);
                nb_failed += 1;
            }
        }
        groups.flush()?;

        if nb_failed > 0 {
            return Err(Error::Custom(format!(
                "{} of {} sources could not be read",
                nb_failed,
                self.srcs.len()
            )));
        }
        Ok(nb_records)
    }

    /// Send the instances of `reader` to their group.
    ///
    /// A read error ends the source and is returned alongside the number of
    /// instances sent. Write errors are returned as errors.
    fn read<R: BufRead, W: WriterTrait>(
        &self,
        reader: OdinReader<R>,
        assigner: &mut Option<IdAssigner>,
        groups: &mut GroupFiles<W>,
    ) -> Result<(usize, Option<Error>), Error> {
        let mut nb_records = 0;
        for record in reader {
            let mut igt = match record {
                Ok(igt) => igt,
                Err(e) => return Ok((nb_records, Some(e))),
            };
            self.prepare(&mut igt, assigner);
            let key = self.key.value_or(&igt, UNGROUPED).to_string();
            groups.write(&key, igt)?;
            nb_records += 1;
        }
        Ok((nb_records, None))
    }

    fn prepare(&self, igt: &mut Igt, assigner: &mut Option<IdAssigner>) {
        if let Some(assigner) = assigner {
            assigner.assign(igt);
        }
        if self.header_policy == HeaderPolicy::Discard {
            igt.set_header_lines(Vec::new());
        }
    }
}

impl Pipeline<usize> for Ingest {
    fn version() -> &'static str {
        "1.0.0"
    }

    /// Returns the number of ingested instances.
    fn run(&self) -> Result<usize, Error> {
        create_outdir(&self.dst)?;
        let nb_records = match self.format {
            Format::Odin => self.split::<WriterOdin>()?,
            Format::Jsonl => self.split::<WriterJsonl>()?,
        };
        info!("ingested {} instances into {:?}", nb_records, self.dst);
        Ok(nb_records)
    }
}
