// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid occurrence index {occurrence} for marker 0x{marker:02X} with {count} stored")]
    InvalidOperation {
        marker: u8,
        occurrence: usize,
        count: usize,
    },

    #[error("Corrupt snapshot: {0}")]
    CorruptData(String),

    #[error("Unsupported snapshot version: expected {supported}, found {found}")]
    VersionMismatch { found: u32, supported: u32 },
}

pub type Result<T> = std::result::Result<T, SegmentError>;
