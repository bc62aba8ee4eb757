use std::fs;
use std::path::{Path, PathBuf};

use odin_igt::config::Config;
use odin_igt::igt::metadata::{CITATION, ISO_639_3};
use odin_igt::igt::{Igt, Line, TierState};
use odin_igt::io::reader::IgtReader;
use odin_igt::io::writer::Format;
use odin_igt::pipelines::{Group, Ingest, Mode, Pipeline, Process};
use odin_igt::processing::SplitKey;

const ODIN: &str = "\
doc_id=397 1 4 L G T
language: japanese (jpn)
stage2_comment: fine
line=1 tag=L:(1) * inu -ga  hashiru (Smith 1999: 12)
line=2 tag=G:    dog -NOM run
line=3 tag=B:
line=4 tag=T:    'the dog runs' (lit. 'dog runs')

doc_id=397 5 6 L
language: japanese (jpn)
line=5 tag=L:  Taro-     hon-
line=6 tag=L+CR:  ga        o

doc_id=12 1 2 L T
language: french (fra)
line=1 tag=L:le chien court
line=2 tag=T:'the dog runs'
";

fn records(path: &Path) -> Vec<Igt> {
    IgtReader::from_path(path)
        .unwrap()
        .map(Result::unwrap)
        .collect()
}

fn ingest(dir: &Path) -> PathBuf {
    let src = dir.join("odin.txt");
    fs::write(&src, ODIN).unwrap();
    let dst = dir.join("by_doc");
    let nb = Ingest::new(vec![src], dst.clone(), SplitKey::DocId, Config::default())
        .assign_ids(1)
        .format(Format::Jsonl)
        .run()
        .unwrap();
    assert_eq!(nb, 3);
    dst
}

#[test_log::test]
fn odin_to_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let by_doc = ingest(dir.path());
    let doc = by_doc.join("397.jsonl");

    let process = Process::new(vec![doc.clone()], Mode::Both, &Config::default()).unwrap();
    assert_eq!(process.run().unwrap(), 2);

    let records = records(&doc);
    assert_eq!(records[0].igt_id(), Some("igt397-1"));
    assert_eq!(records[1].igt_id(), Some("igt397-2"));

    let normalized = records[0].tier(TierState::Normalized).unwrap();
    let texts: Vec<&str> = normalized.lines().iter().map(Line::text).collect();
    assert_eq!(
        texts,
        vec![
            "inu-ga   hashiru",
            "Smith 1999: 12",
            "dog-NOM  run",
            "the dog runs",
            "dog runs",
            "Japanese (jpn)",
        ]
    );
    assert_eq!(records[0].metadata().get(CITATION), Some("Smith 1999: 12"));
    assert_eq!(records[0].metadata().get(ISO_639_3), Some("jpn"));

    let cleaned = records[1].tier(TierState::Cleaned).unwrap();
    assert_eq!(cleaned.len(), 1);
    let normalized = records[1].tier(TierState::Normalized).unwrap();
    assert_eq!(normalized.lines()[0].text(), "Taro-ga   hon-o");
}

#[test_log::test]
fn reprocessing_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let by_doc = ingest(dir.path());
    let doc = by_doc.join("397.jsonl");

    let clean = Process::new(vec![doc.clone()], Mode::Clean, &Config::default()).unwrap();
    clean.run().unwrap();
    let cleaned_once = records(&doc);

    let process = Process::new(vec![doc.clone()], Mode::Both, &Config::default()).unwrap();
    process.run().unwrap();
    let processed = fs::read_to_string(&doc).unwrap();
    for (before, after) in cleaned_once.iter().zip(records(&doc).iter()) {
        assert_eq!(
            before.tier(TierState::Cleaned),
            after.tier(TierState::Cleaned)
        );
    }

    process.run().unwrap();
    assert_eq!(fs::read_to_string(&doc).unwrap(), processed);
}

#[test_log::test]
fn ids_survive_regrouping() {
    let dir = tempfile::tempdir().unwrap();
    let by_doc = ingest(dir.path());
    let srcs = vec![by_doc.join("397.jsonl"), by_doc.join("12.jsonl")];

    let by_lang = dir.path().join("by_lang");
    let sizes = Group::new(srcs, by_lang.clone(), SplitKey::Language)
        .run()
        .unwrap();
    assert_eq!(sizes.len(), 2);

    let jpn: Vec<String> = records(&by_lang.join("jpn.jsonl"))
        .iter()
        .filter_map(|igt| igt.igt_id().map(String::from))
        .collect();
    assert_eq!(jpn, vec!["igt397-1", "igt397-2"]);
    let fra = records(&by_lang.join("fra.jsonl"));
    assert_eq!(fra[0].igt_id(), Some("igt12-1"));
}
