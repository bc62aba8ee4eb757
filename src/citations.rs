/*! Citation database.

Citations of ODIN source documents are kept in a text file of blank-line separated blocks:

```text
doc_id=397
author: Smith, J.
year: 1999

doc_id=398
...
```

The database can be updated from a tab-separated file whose first row names the fields,
the first column holding the document id.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use log::{debug, warn};

use crate::error::Error;

/// Ordered `key: value` properties of a document.
pub type Properties = Vec<(String, String)>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Citations {
    docs: HashMap<String, Properties>,
}

fn set(properties: &mut Properties, key: &str, value: &str) {
    match properties.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value.to_string(),
        None => properties.push((key.to_string(), value.to_string())),
    }
}

/// Document ids sort numerically when they are numbers, before any other id.
fn doc_order(doc_id: &str) -> (bool, u64, &str) {
    match doc_id.parse::<u64>() {
        Ok(n) => (false, n, doc_id),
        Err(_) => (true, 0, doc_id),
    }
}

impl Citations {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let f = File::open(src)?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut citations = Self::default();
        let mut doc_id: Option<String> = None;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                doc_id = None;
            } else if let Some(id) = line.strip_prefix("doc_id") {
                let id = id.trim_start().trim_start_matches('=').trim().to_string();
                citations.docs.entry(id.clone()).or_default();
                doc_id = Some(id);
            } else if let Some(id) = &doc_id {
                match line.split_once(':') {
                    Some((key, value)) => {
                        if let Some(properties) = citations.docs.get_mut(id) {
                            set(properties, key.trim(), value.trim());
                        }
                    }
                    None => warn!("Property at line {} has no key: {}", idx + 1, line),
                }
            } else {
                warn!("Property at line {} has no doc-id", idx + 1);
            }
        }
        Ok(citations)
    }

    pub fn get(&self, doc_id: &str) -> Option<&Properties> {
        self.docs.get(doc_id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Update properties from a tab-separated source.
    ///
    /// Rows of documents absent from the database are skipped, unless `insert_missing` is set.
    /// Returns the number of updated documents.
    pub fn update_from_tsv<R: Read>(&mut self, tsv: R, insert_missing: bool) -> Result<usize, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(tsv);
        let fields: Vec<String> = reader
            .headers()?
            .iter()
            .map(|field| field.trim().to_string())
            .collect();

        let mut updated = 0;
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            let doc_id = row.get(0).map(str::trim).unwrap_or_default();
            if doc_id.is_empty() {
                warn!("Update line {} is missing a doc-id.", idx + 2);
                continue;
            }
            if !insert_missing && !self.docs.contains_key(doc_id) {
                debug!("skipping update of unknown document {}", doc_id);
                continue;
            }
            let properties = self.docs.entry(doc_id.to_string()).or_default();
            for (key, value) in fields.iter().zip(row.iter()).skip(1) {
                set(properties, key, value.trim());
            }
            updated += 1;
        }
        Ok(updated)
    }

    /// Write the database, documents sorted by id.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), Error> {
        let mut doc_ids: Vec<&String> = self.docs.keys().collect();
        doc_ids.sort_by(|a, b| doc_order(a).cmp(&doc_order(b)));
        for doc_id in doc_ids {
            writeln!(w, "doc_id={}", doc_id)?;
            for (key, value) in &self.docs[doc_id] {
                writeln!(w, "{}: {}", key, value)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const DB: &str = "\
doc_id=10
author: Smith, J.
year: 1999

doc_id=9
author: Doe
title: a grammar: volume 2

stray: property
";

    fn db() -> Citations {
        Citations::from_reader(Cursor::new(DB)).unwrap()
    }

    #[test]
    fn load() {
        let db = db();
        assert_eq!(db.len(), 2);
        let nine = db.get("9").unwrap();
        assert_eq!(
            nine[1],
            ("title".to_string(), "a grammar: volume 2".to_string())
        );
    }

    #[test]
    fn update() {
        let mut db = db();
        let tsv = "doc_id\tyear\tpublisher\n9\t2001\tMIT\nnew\t2020\tx\n\t1\t2\n";
        let updated = db.update_from_tsv(Cursor::new(tsv), false).unwrap();
        assert_eq!(updated, 1);
        assert_eq!(db.len(), 2);
        let nine = db.get("9").unwrap();
        assert_eq!(nine.len(), 4);
        assert_eq!(nine[2], ("year".to_string(), "2001".to_string()));

        let updated = db.update_from_tsv(Cursor::new(tsv), true).unwrap();
        assert_eq!(updated, 2);
        assert!(db.get("new").is_some());
    }

    #[test]
    fn sorted_output() {
        let mut db = db();
        db.update_from_tsv(Cursor::new("doc_id\tyear\nabc\t1\n"), true)
            .unwrap();
        let mut out = Vec::new();
        db.write(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let ids: Vec<&str> = out.lines().filter(|l| l.starts_with("doc_id=")).collect();
        assert_eq!(ids, vec!["doc_id=9", "doc_id=10", "doc_id=abc"]);
        assert!(out.contains("doc_id=10\nauthor: Smith, J.\nyear: 1999\n\n"));
    }
}
