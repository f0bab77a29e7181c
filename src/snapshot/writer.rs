// src/snapshot/writer.rs
use crate::error::Result;
use crate::index::SegmentIndex;
use crate::snapshot::SNAPSHOT_VERSION;
use bytes::BufMut;
use std::io::Write;

/// Exact byte size of the snapshot [`encode`] produces for `index`.
///
/// Used by `encode` to size its buffer in one allocation; also handy for
/// reserving file space up front.
pub fn encoded_len(index: &SegmentIndex) -> usize {
    // Version tag and distinct-marker count.
    let mut len = 4 + 4;
    for marker in index.markers() {
        // Marker byte and occurrence count.
        len += 1 + 8;
        for segment in index.segments(marker) {
            // Offset, payload length, payload bytes.
            len += 8 + 8 + segment.len();
        }
    }
    len
}

/// Encode `index` into a snapshot byte vector.
///
/// Markers are written in ascending value order and occurrences in insertion
/// order, so equal indexes always encode to identical bytes. Encoding cannot
/// fail: every state the index can represent has an encoding.
pub fn encode(index: &SegmentIndex) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(index));

    buf.put_u32_le(SNAPSHOT_VERSION);
    buf.put_u32_le(index.marker_count() as u32);

    for marker in index.markers() {
        let segments = index.segments(marker);
        buf.put_u8(marker);
        buf.put_u64_le(segments.len() as u64);

        for segment in segments {
            buf.put_i64_le(segment.offset().to_raw());
            buf.put_u64_le(segment.payload().len() as u64);
            buf.put_slice(segment.payload());
        }
    }

    buf
}

/// Write one snapshot of `index` to `writer`.
///
/// I/O faults from the underlying writer pass through as
/// [`SegmentError::Io`](crate::SegmentError::Io).
pub fn write_snapshot<W: Write>(writer: &mut W, index: &SegmentIndex) -> Result<()> {
    writer.write_all(&encode(index))?;
    Ok(())
}
