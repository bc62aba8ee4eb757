//! Regrouping of JSON Lines record files.
//!
//! Records of every source are grouped by a key, then written to one `<key>.jsonl`
//! file per group, sorted by document and instance index.
use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{error, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::igt::Igt;
use crate::io::reader::IgtReader;
use crate::io::writer::{WriterJsonl, WriterTrait};
use crate::processing::split::{sort_groups, split_by, MISSING};
use crate::processing::SplitKey;

use super::{create_outdir, Pipeline};

pub struct Group {
    srcs: Vec<PathBuf>,
    dst: PathBuf,
    key: SplitKey,
}

impl Group {
    pub fn new(srcs: Vec<PathBuf>, dst: PathBuf, key: SplitKey) -> Self {
        Self { srcs, dst, key }
    }

    fn read(&self) -> Result<Vec<Igt>, Error> {
        let mut records = Vec::new();
        for src in &self.srcs {
            let before = records.len();
            for igt in IgtReader::from_path(src)? {
                records.push(igt?);
            }
            info!("{:?}: {} records", src, records.len() - before);
        }
        Ok(records)
    }
}

impl Pipeline<BTreeMap<String, usize>> for Group {
    fn version() -> &'static str {
        "1.0.0"
    }

    /// Returns the number of records of each group.
    fn run(&self) -> Result<BTreeMap<String, usize>, Error> {
        create_outdir(&self.dst)?;
        let records = self.read()?;
        let mut groups = split_by(records, |igt| {
            self.key.value_or(igt, MISSING).to_string()
        });
        sort_groups(&mut groups);

        let sizes = groups
            .iter()
            .map(|(key, records)| (key.clone(), records.len()))
            .collect();

        let errors: Vec<Error> = groups
            .into_par_iter()
            .map(|(key, records)| {
                info!("[{}]: {} records", key, records.len());
                let mut w: WriterJsonl = WriterTrait::new(&self.dst, &key)?;
                w.write(&records)
            })
            .filter_map(Result::err)
            .collect();

        for error in &errors {
            error!("{:?}", error);
        }
        match errors.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(sizes),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::path::Path;

    use crate::igt::{Language, Line, Tag};

    use super::*;

    fn igt(doc_id: &str, igt_id: &str, language: Option<&str>) -> Igt {
        let mut igt = Igt::new(doc_id, vec![Line::new(Tag::lexical(), "inu")]);
        igt.set_igt_id(igt_id);
        if let Some(code) = language {
            igt.set_language(Language::new("x", code));
        }
        igt
    }

    fn write(path: &Path, records: &[Igt]) {
        let mut w = WriterJsonl::from_writer(File::create(path).unwrap());
        for igt in records {
            w.write_record(igt).unwrap();
        }
        w.flush().unwrap();
    }

    fn ids(path: &Path) -> Vec<String> {
        IgtReader::from_path(path)
            .unwrap()
            .map(|igt| igt.unwrap().igt_id().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn group_by_language() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jsonl");
        let b = dir.path().join("b.jsonl");
        write(
            &a,
            &[
                igt("10", "igt10-2", Some("jpn")),
                igt("10", "igt10-1", Some("jpn")),
            ],
        );
        write(
            &b,
            &[
                igt("9", "igt9-1", Some("jpn")),
                igt("9", "igt9-2", None),
                igt("3", "igt3-1", Some("fra")),
            ],
        );

        let dst = dir.path().join("groups");
        let sizes = Group::new(vec![a, b], dst.clone(), SplitKey::Language)
            .run()
            .unwrap();
        assert_eq!(sizes["jpn"], 3);
        assert_eq!(sizes["---"], 1);
        assert_eq!(
            ids(&dst.join("jpn.jsonl")),
            vec!["igt9-1", "igt10-1", "igt10-2"]
        );
        assert_eq!(ids(&dst.join("---.jsonl")), vec!["igt9-2"]);
        assert_eq!(ids(&dst.join("fra.jsonl")), vec!["igt3-1"]);
    }

    #[test]
    fn existing_outdir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let group = Group::new(vec![], dir.path().to_path_buf(), SplitKey::DocId);
        assert!(group.run().is_err());
    }
}
