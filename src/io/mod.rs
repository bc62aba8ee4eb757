/*!
# IO utilities

Record saving and loading, in ODIN text and JSON Lines formats.
!*/
mod langfiles;
pub mod reader;
pub mod writer;
pub use langfiles::{GroupFiles, BUFFER_SIZE};
