//! ODIN text writer.
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::igt::{Igt, TierState};

use super::{group_path, Format, WriterTrait};

/// Format an instance back into an ODIN text block (without the trailing blank line).
///
/// Only the raw tier is written. Lines without a source line number are numbered
/// after their position in the tier.
pub fn format_igt(igt: &Igt) -> String {
    let top = match igt.igt_id() {
        Some(igt_id) => format!(
            "doc_id={} igt_id={} {} {}",
            igt.doc_id(),
            igt_id,
            igt.line_range(),
            igt.line_types()
        ),
        None => format!(
            "doc_id={} {} {}",
            igt.doc_id(),
            igt.line_range(),
            igt.line_types()
        ),
    };
    let mut lines = vec![top];

    if let Some(language) = igt.language() {
        lines.push(format!("language: {} ({})", language.name(), language.code()));
    }
    // the language line is never written twice
    lines.extend(
        igt.header_lines()
            .iter()
            .filter(|line| !line.starts_with("language:"))
            .cloned(),
    );
    if let Some(raw) = igt.tier(TierState::Raw) {
        for (idx, line) in raw.lines().iter().enumerate() {
            let no = line.source_lines().first().copied().unwrap_or(idx + 1);
            lines.push(format!("line={} tag={}:{}", no, line.tag(), line.text()));
        }
    }
    lines.join("\n")
}

/// Appends ODIN text blocks to a group file.
pub struct WriterOdin {
    handle: BufWriter<File>,
}

impl WriterTrait for WriterOdin {
    fn new(dst: &Path, key: &str) -> Result<Self, Error> {
        let path = group_path(dst, key, Format::Odin);
        debug!("opening {:?}", path);
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            handle: BufWriter::new(f),
        })
    }

    fn write(&mut self, vals: &[Igt]) -> Result<(), Error> {
        for igt in vals {
            self.write_single(igt)?;
        }
        self.handle.flush()?;
        Ok(())
    }

    fn write_single(&mut self, val: &Igt) -> Result<(), Error> {
        write!(self.handle, "{}\n\n", format_igt(val))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::config::Config;
    use crate::igt::{Language, Line, Tag};
    use crate::io::reader::OdinReader;

    use super::*;

    fn sample() -> Igt {
        let mut igt = Igt::new(
            "397",
            vec![
                Line::new(Tag::lexical(), "inu ga").with_source_line(12),
                Line::new("T+LT".to_string().into(), "'dog'").with_source_line(13),
            ],
        );
        igt.set_igt_id("igt397-1");
        igt.set_span("12 13", "L T");
        igt.set_language(Language::new("Japanese", "jpn"));
        igt.set_header_lines(vec![
            "language: japanese (jpn)".to_string(),
            "note: checked".to_string(),
        ]);
        igt
    }

    #[test]
    fn format_block() {
        assert_eq!(
            format_igt(&sample()),
            "doc_id=397 igt_id=igt397-1 12 13 L T
language: Japanese (jpn)
note: checked
line=12 tag=L:inu ga
line=13 tag=T+LT:'dog'"
        );
    }

    #[test]
    fn written_blocks_read_back() {
        let dst = tempfile::tempdir().unwrap();
        let mut w = WriterOdin::new(dst.path(), "397").unwrap();
        w.write(&[sample(), sample()]).unwrap();

        let content = std::fs::read_to_string(dst.path().join("397.txt")).unwrap();
        let config = Config::default();
        let igts: Vec<Igt> = OdinReader::new(Cursor::new(content), &config)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(igts.len(), 2);
        assert_eq!(igts[1].igt_id(), Some("igt397-1"));
        assert_eq!(igts[1].language(), sample().language());
        assert_eq!(
            igts[1].tier(TierState::Raw),
            sample().tier(TierState::Raw)
        );
    }
}
