//! # odin-igt
//!
//! Command line tools for ODIN Interlinear Glossed Text.
//!
//! ```sh
//! odin-igt 2.1.0
//! ODIN Interlinear Glossed Text processing.
//!
//! USAGE:
//!     odin-igt [FLAGS] [OPTIONS] <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     citations    Update and print a citation database
//!     clean        Add cleaned tiers to JSON Lines records
//!     group        Group JSON Lines records by language or document
//!     ingest       Read ODIN text files and split them by document or language
//!     normalize    Add normalized tiers to JSON Lines records
//!     process      Clean, then normalize JSON Lines records
//!     schema       Print the JSON schema of records
//! ```
use std::fs::File;
use std::io::{BufWriter, Write};

use log::LevelFilter;
use odin_igt::citations::Citations;
use odin_igt::error::Error;
use odin_igt::igt::Igt;
use odin_igt::pipelines::{self, Mode, Pipeline, Process};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn citations(c: cli::Citations) -> Result<(), Error> {
    let mut db = Citations::from_path(&c.src)?;
    if let Some(update) = &c.update {
        let updated = db.update_from_tsv(File::open(update)?, c.insert_missing)?;
        info!("updated {} documents", updated);
    }
    match &c.dst {
        Some(dst) => {
            let mut w = BufWriter::new(File::create(dst)?);
            db.write(&mut w)?;
            w.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            db.write(stdout.lock())?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let opt = cli::OdinIgt::from_args();
    init_logger(opt.verbose);
    debug!("cli args\n{:#?}", opt);

    let config = opt.config()?;

    match opt.cmd {
        cli::Command::Ingest(i) => {
            let srcs = pipelines::expand_paths(&i.srcs)?;
            let mut ingest = pipelines::Ingest::new(srcs, i.dst, i.key, config)
                .header_policy(i.igt_meta)
                .format(i.format);
            if i.assign_igt_ids {
                ingest = ingest.assign_ids(i.first_id);
            }
            ingest.run()?;
        }
        cli::Command::Clean(f) => {
            Process::new(pipelines::expand_paths(&f.srcs)?, Mode::Clean, &config)?.run()?;
        }
        cli::Command::Normalize(f) => {
            Process::new(pipelines::expand_paths(&f.srcs)?, Mode::Normalize, &config)?.run()?;
        }
        cli::Command::Process(f) => {
            Process::new(pipelines::expand_paths(&f.srcs)?, Mode::Both, &config)?.run()?;
        }
        cli::Command::Group(g) => {
            let srcs = pipelines::expand_paths(&g.srcs)?;
            let sizes = pipelines::Group::new(srcs, g.dst, g.key).run()?;
            info!("wrote {} groups", sizes.len());
        }
        cli::Command::Citations(c) => citations(c)?,
        cli::Command::Schema => {
            let schema = schemars::schema_for!(Igt);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    };
    Ok(())
}
