// src/snapshot/mod.rs
mod reader;
mod writer;

pub use reader::{decode, read_snapshot};
pub use writer::{encode, encoded_len, write_snapshot};

use crate::error::Result;
use crate::index::SegmentIndex;
use std::fs;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// Format version written by [`encode`] and required by [`decode`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// Write a snapshot of `index` to the file at `path`, replacing any existing
/// content.
pub fn write_file(path: impl AsRef<Path>, index: &SegmentIndex) -> Result<()> {
    fs::write(path, encode(index))?;
    Ok(())
}

/// Load a snapshot file and decode it into a fresh index.
///
/// The file must hold exactly one snapshot; trailing bytes are corrupt.
pub fn read_file(path: impl AsRef<Path>) -> Result<SegmentIndex> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Load a snapshot file through a memory mapping (requires "mmap" feature)
///
/// Behaves exactly like [`read_file`] but avoids buffering the file contents
/// before decoding.
#[cfg(feature = "mmap")]
pub fn read_file_mmap(path: impl AsRef<Path>) -> Result<SegmentIndex> {
    let file = fs::File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    decode(&mmap)
}
