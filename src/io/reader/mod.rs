/*! Record reading utilities

ODIN text sources are read with [OdinReader], which classifies lines as it goes.
Processed records are stored as JSON Lines and read back with [IgtReader].
!*/
mod jsonl;
mod odintxt;

pub use jsonl::{IgtReader, Reader};
pub use odintxt::OdinReader;
