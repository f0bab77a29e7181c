// src/lib.rs
//! # segidx
//!
//! A Rust library for indexing the raw segments of marker-structured container
//! files (JPEG-style formats where each chunk is tagged by a single-byte
//! marker), with versioned binary snapshots for durable storage and exact
//! reconstruction.
//!
//! ## Features
//!
//! - 🎯 **Multi-Occurrence Aware**: Repeated markers keep every occurrence, addressable by index
//! - 🚀 **Array-Backed**: Fixed 256-slot table indexed by marker value, no hashing
//! - 📍 **Offset Tracking**: Each segment optionally remembers where it sat in the source file
//! - 📦 **Durable Snapshots**: Versioned little-endian encoding with an exact round-trip
//! - 🔍 **Corruption Detection**: Truncation, reordering, and lying length fields caught on decode
//!
//! ## Quick Start
//!
//! ### Indexing segments
//!
//! ```rust
//! use segidx::{SegmentIndex, SegmentOffset};
//!
//! let mut index = SegmentIndex::new();
//! index.add_at(0xE1, vec![0x01, 0x02], 10);
//! index.add_at(0xE1, vec![0x03], 50);
//! index.add(0xFE, b"comment".to_vec());
//!
//! assert_eq!(index.count(0xE1), 2);
//! assert_eq!(index.get(0xE1, 1), Some(&[0x03][..]));
//! assert_eq!(index.get_offset(0xE1, 0), Some(SegmentOffset::At(10)));
//! assert_eq!(index.get_offset(0xFE, 0), Some(SegmentOffset::Unknown));
//! ```
//!
//! ### Encoding and decoding snapshots
//!
//! ```rust
//! use segidx::{snapshot, SegmentIndex};
//!
//! let mut index = SegmentIndex::new();
//! index.add(0xDB, vec![0xAA; 64]);
//!
//! let bytes = snapshot::encode(&index);
//! let restored = snapshot::decode(&bytes).unwrap();
//! assert_eq!(restored, index);
//! ```
//!
//! ### Snapshot files
//!
//! ```rust,no_run
//! use segidx::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut index = SegmentIndex::new();
//!     index.add_at(0xE1, vec![0x01, 0x02], 10);
//!
//!     write_file("segments.snapshot", &index)?;
//!
//!     let restored = read_file("segments.snapshot")?;
//!     assert_eq!(restored, index);
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod index;
pub mod snapshot;
pub mod types;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, SegmentError};

// Type exports
pub use types::{Segment, SegmentOffset};

// Index exports
pub use index::SegmentIndex;

// Snapshot exports
pub use snapshot::SNAPSHOT_VERSION;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use segidx::prelude::*;
    //! ```

    pub use crate::error::{Result, SegmentError};
    pub use crate::index::SegmentIndex;
    pub use crate::snapshot::{read_file, write_file};
    pub use crate::types::{Segment, SegmentOffset};
}

// Version information
/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
