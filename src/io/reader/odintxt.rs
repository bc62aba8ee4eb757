/*! ODIN text reader.

ODIN text files hold instances as blocks of lines:

```text
doc_id=397 igt_id=igt397-1 12 14 L G T
language: japanese (jpn)
stage2_comment: ...
line=12 tag=L:inu ga hashiru
line=13 tag=G:dog NOM run
line=14 tag=T:'the dog runs'
```

A header line starts a block, then come free-form `key: value` header lines
and `line=` data lines, up to the next blank line.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::classify::{link_continuations, Classifier};
use crate::config::Config;
use crate::error::Error;
use crate::igt::{Igt, Line, Tag};
use crate::lang::{best_match, log_comments};

lazy_static! {
    static ref DOC_RE: Regex = Regex::new(
        r"^doc_id=(?P<doc_id>\S+) (?:igt_id=(?P<igt_id>\S+) )?(?P<line_range>\d+ \d+) (?P<line_types>.*)$"
    )
    .unwrap();
    static ref LINE_RE: Regex =
        Regex::new(r"^line=(?P<line>\d+) (?P<tagged>tag=[^:]+:.*)$").unwrap();
}

/// Iterates over the instances of an ODIN text source.
pub struct OdinReader<'a, R: BufRead> {
    lines: Lines<R>,
    config: &'a Config,
    classifier: Classifier<'a>,
}

impl<'a> OdinReader<'a, BufReader<File>> {
    pub fn from_path(src: &Path, config: &'a Config) -> Result<Self, Error> {
        let f = File::open(src)?;
        Ok(Self::new(BufReader::new(f), config))
    }
}

impl<'a, R: BufRead> OdinReader<'a, R> {
    pub fn new(reader: R, config: &'a Config) -> Self {
        Self {
            lines: reader.lines(),
            config,
            classifier: Classifier::new(config),
        }
    }

    /// Read the rest of a block whose header line has been read.
    fn block(&mut self, header: &str) -> Result<Igt, Error> {
        let caps = DOC_RE
            .captures(header)
            .ok_or_else(|| Error::Custom(format!("invalid ODIN header: {}", header)))?;

        let mut header_lines = Vec::new();
        let mut lines: Vec<Line> = Vec::new();
        let mut in_data = false;
        for line in self.lines.by_ref() {
            let line = line?;
            if line.trim().is_empty() {
                break;
            }
            if !in_data && !line.starts_with("line=") {
                header_lines.push(line.trim_end().to_string());
                continue;
            }
            in_data = true;
            let parsed = data_line(&self.classifier, &line, lines.last().map(Line::tag));
            lines.push(parsed);
        }
        link_continuations(&mut lines);

        let doc_id = &caps["doc_id"];
        let line_range = &caps["line_range"];
        let mut igt = Igt::new(doc_id, lines);
        if let Some(igt_id) = caps.name("igt_id") {
            igt.set_igt_id(igt_id.as_str());
        }
        igt.set_span(line_range, &caps["line_types"]);

        let language = best_match(&header_lines);
        log_comments(self.config, doc_id, line_range, &header_lines);
        if language.is_undetermined() {
            warn!(
                "Failed to get language or language code for document {}, lines {}.",
                doc_id, line_range
            );
        } else {
            debug!(
                "Document {}, lines {}, Language: {}, ISO-639-3: {}",
                doc_id,
                line_range,
                language.name(),
                language.code()
            );
        }
        igt.set_language(language);
        igt.set_header_lines(header_lines);
        Ok(igt)
    }
}

/// Parse a data line. Unparseable lines are kept with an `other` tag.
fn data_line(classifier: &Classifier, line: &str, previous: Option<&Tag>) -> Line {
    match LINE_RE.captures(line) {
        Some(caps) => {
            let classified = classifier.classify(&caps["tagged"], previous);
            let mut parsed = Line::new(classified.tag, classified.text);
            if let Ok(no) = caps["line"].parse() {
                parsed = parsed.with_source_line(no);
            }
            parsed
        }
        None => {
            warn!("Non-empty IGT line could not be parsed: {}", line);
            Line::new(Tag::other(), line)
        }
    }
}

impl<'a, R: BufRead> Iterator for OdinReader<'a, R> {
    type Item = Result<Igt, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if DOC_RE.is_match(&line) {
                return Some(self.block(&line));
            }
            if line.contains("doc_id=") {
                warn!("Possible ODIN instance missed: {}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::igt::{Language, TierState};

    use super::*;

    const ODIN: &str = "\
doc_id=397 12 15 L G T
language: japanese (jpn)
stage2_comment: looks fine
line=12 tag=L:inu ga    hashiru
line=13 tag=L+CR:   -s
line=14 tag=G:dog NOM   run
line=15 tag=T:'the dog runs'

some stray text
doc_id=oops
doc_id=398 igt_id=igt398-4 1 2 L T
line=1 tag=L:neko
this is not a line
";

    fn read(src: &str) -> Vec<Igt> {
        let config = Config::default();
        OdinReader::new(Cursor::new(src.to_string()), &config)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn blocks_are_read() {
        let igts = read(ODIN);
        assert_eq!(igts.len(), 2);

        let first = &igts[0];
        assert_eq!(first.doc_id(), "397");
        assert_eq!(first.igt_id(), None);
        assert_eq!(first.line_range(), "12 15");
        assert_eq!(first.line_types(), "L G T");
        assert_eq!(first.language(), Some(&Language::new("Japanese", "jpn")));
        assert_eq!(first.header_lines().len(), 2);

        let raw = first.tier(TierState::Raw).unwrap().lines();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw[0].text(), "inu ga    hashiru");
        assert_eq!(raw[1].tag().to_string(), "L+CR");
        assert_eq!(raw[1].continues(), Some(0));
        assert_eq!(raw[2].source_lines(), &[14]);
    }

    #[test]
    fn malformed_lines_are_kept() {
        let igts = read(ODIN);
        let second = &igts[1];
        assert_eq!(second.igt_id(), Some("igt398-4"));
        assert!(second.language().unwrap().is_undetermined());
        let raw = second.tier(TierState::Raw).unwrap().lines();
        assert_eq!(raw.len(), 2);
        assert!(raw[1].tag().is_other());
        assert_eq!(raw[1].text(), "this is not a line");
    }

    #[test]
    fn empty_source() {
        assert!(read("").is_empty());
        assert!(read("\n\nno instance here\n").is_empty());
    }
}
