//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use odin_igt::config::Config;
use odin_igt::error::Error;
use odin_igt::io::writer::Format;
use odin_igt::pipelines::HeaderPolicy;
use odin_igt::processing::SplitKey;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "odin-igt", about = "ODIN Interlinear Glossed Text processing.")]
pub struct OdinIgt {
    #[structopt(
        short = "v",
        long = "verbose",
        parse(from_occurrences),
        help = "verbosity: -v info, -vv debug, -vvv trace. RUST_LOG takes precedence."
    )]
    pub verbose: u8,
    #[structopt(long = "config", parse(from_os_str), help = "JSON configuration file")]
    pub config: Option<PathBuf>,
    #[structopt(long = "min-overlap", help = "minimum shared columns of aligned tokens")]
    pub min_overlap: Option<usize>,
    #[structopt(
        long = "interleave-merge",
        help = "overlay unaligned continuation lines when their tokens do not collide"
    )]
    pub interleave_merge: bool,
    #[structopt(
        long = "comment-verbosity",
        help = "annotator comments: 0 ignored, 1 counted, 2 logged in full"
    )]
    pub comment_verbosity: Option<u8>,
    #[structopt(long = "citation-pattern", help = "replacement citation regex")]
    pub citation_pattern: Option<String>,
    #[structopt(subcommand)]
    pub cmd: Command,
}

impl OdinIgt {
    /// Configuration file (or defaults), overridden by command line flags.
    pub fn config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if let Some(min_overlap) = self.min_overlap {
            config.min_overlap = min_overlap;
        }
        if self.interleave_merge {
            config.interleave_merge = true;
        }
        if let Some(verbosity) = self.comment_verbosity {
            config.comment_verbosity = verbosity;
        }
        if let Some(pattern) = &self.citation_pattern {
            config.citation_pattern = Some(pattern.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, StructOpt)]
/// Holds every command that is callable by the `odin-igt` command.
pub enum Command {
    #[structopt(about = "Read ODIN text files and split them by document or language")]
    Ingest(Ingest),
    #[structopt(about = "Add cleaned tiers to JSON Lines records")]
    Clean(Files),
    #[structopt(about = "Add normalized tiers to JSON Lines records")]
    Normalize(Files),
    #[structopt(about = "Clean, then normalize JSON Lines records")]
    Process(Files),
    #[structopt(about = "Group JSON Lines records by language or document")]
    Group(Group),
    #[structopt(about = "Update and print a citation database")]
    Citations(Citations),
    #[structopt(about = "Print the JSON schema of records")]
    Schema,
}

#[derive(Debug, StructOpt)]
pub struct Ingest {
    #[structopt(short = "o", long = "outdir", parse(from_os_str), help = "output directory")]
    pub dst: PathBuf,
    #[structopt(
        long = "split-by",
        default_value = "iso-639-3",
        help = "split key: doc_id or iso-639-3"
    )]
    pub key: SplitKey,
    #[structopt(long = "assign-igt-ids", help = "assign instance ids")]
    pub assign_igt_ids: bool,
    #[structopt(long = "first-id", default_value = "1", help = "index of the first instance")]
    pub first_id: usize,
    #[structopt(
        long = "igt-meta",
        default_value = "discard",
        help = "header lines: keep or discard"
    )]
    pub igt_meta: HeaderPolicy,
    #[structopt(long = "format", default_value = "odin", help = "output format: odin or jsonl")]
    pub format: Format,
    #[structopt(parse(from_os_str), help = "ODIN text files (stdin if none)")]
    pub srcs: Vec<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Files {
    #[structopt(
        parse(from_os_str),
        help = "JSON Lines files, processed in place. Reads stdin and writes stdout if none."
    )]
    pub srcs: Vec<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Group {
    #[structopt(short = "o", long = "outdir", parse(from_os_str), help = "output directory")]
    pub dst: PathBuf,
    #[structopt(long = "key", default_value = "lang", help = "group key: lang or doc-id")]
    pub key: SplitKey,
    #[structopt(parse(from_os_str), help = "JSON Lines files")]
    pub srcs: Vec<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Citations {
    #[structopt(parse(from_os_str), help = "citation database")]
    pub src: PathBuf,
    #[structopt(long = "update", parse(from_os_str), help = "tab-separated update file")]
    pub update: Option<PathBuf>,
    #[structopt(long = "insert-missing", help = "add documents found only in the update file")]
    pub insert_missing: bool,
    #[structopt(
        short = "o",
        long = "output",
        parse(from_os_str),
        help = "output file (stdout if none)"
    )]
    pub dst: Option<PathBuf>,
}
