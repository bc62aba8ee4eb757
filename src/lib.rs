/*! # odin-igt

Cleaning and normalization of ODIN Interlinear Glossed Text.

Raw instances are read from ODIN text files, then go through:
1. [classify]: every line gets an ODIN tag,
1. [transformers::Cleaner]: continuation lines are merged back into the lines they continue, giving a `cleaned` tier,
1. [transformers::Normalizer]: citations, language names, example numbers, judgments and quotes are
   extracted and the lines are realigned, giving a `normalized` tier,
1. [processing]: instances get stable identifiers and are split or grouped by document or language.

Tiers are derived once and never overwritten, so every stage can be run again on its own output.
!*/
pub mod citations;
pub mod classify;
pub mod config;
pub mod error;
pub mod filtering;
pub mod igt;
pub mod io;
pub mod lang;
pub mod pipelines;
pub mod processing;
pub mod transformers;
