// src/snapshot/reader.rs
use crate::error::{Result, SegmentError};
use crate::index::SegmentIndex;
use crate::snapshot::SNAPSHOT_VERSION;
use crate::types::{Segment, SegmentOffset};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Decode a complete in-memory snapshot.
///
/// The whole slice must be exactly one snapshot; any bytes left over after
/// the encoded content are rejected as
/// [`CorruptData`](SegmentError::CorruptData).
pub fn decode(bytes: &[u8]) -> Result<SegmentIndex> {
    let mut cursor = Cursor::new(bytes);
    let index = read_snapshot(&mut cursor)?;

    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(SegmentError::CorruptData(format!(
            "{} trailing bytes after snapshot content",
            bytes.len() - consumed
        )));
    }

    Ok(index)
}

/// Decode one snapshot from `reader`, leaving the stream positioned just
/// past it.
///
/// A stream that ends mid-snapshot or carries inconsistent structure is
/// [`CorruptData`](SegmentError::CorruptData); an unsupported format version
/// is [`VersionMismatch`](SegmentError::VersionMismatch); a genuine transport
/// fault passes through as [`Io`](SegmentError::Io). Decoding never yields a
/// partially populated index.
pub fn read_snapshot<R: Read>(reader: &mut R) -> Result<SegmentIndex> {
    let version = read_u32(reader)?;
    if version != SNAPSHOT_VERSION {
        return Err(SegmentError::VersionMismatch {
            found: version,
            supported: SNAPSHOT_VERSION,
        });
    }

    let marker_count = read_u32(reader)?;
    if marker_count > 256 {
        return Err(SegmentError::CorruptData(format!(
            "snapshot declares {} distinct markers, more than the 256 possible",
            marker_count
        )));
    }

    let mut index = SegmentIndex::new();
    let mut previous_marker: Option<u8> = None;

    for _ in 0..marker_count {
        let marker = read_u8(reader)?;

        // Markers are encoded in ascending value order; anything else means a
        // duplicated or reordered entry.
        if let Some(previous) = previous_marker {
            if marker <= previous {
                return Err(SegmentError::CorruptData(format!(
                    "marker 0x{:02X} out of order after 0x{:02X}",
                    marker, previous
                )));
            }
        }
        previous_marker = Some(marker);

        let occurrence_count = read_u64(reader)?;
        if occurrence_count == 0 {
            return Err(SegmentError::CorruptData(format!(
                "marker 0x{:02X} declares zero occurrences",
                marker
            )));
        }

        for _ in 0..occurrence_count {
            let raw_offset = read_i64(reader)?;
            let offset = SegmentOffset::from_raw(raw_offset).ok_or_else(|| {
                SegmentError::CorruptData(format!(
                    "invalid offset {} for marker 0x{:02X}",
                    raw_offset, marker
                ))
            })?;

            let payload_len = read_u64(reader)?;
            let payload = read_payload(reader, payload_len, marker)?;

            index.add_segment(marker, Segment::with_offset(payload, offset));
        }
    }

    Ok(index)
}

// Running out of bytes mid-field means the snapshot content is bad, not the
// transport.
fn map_eof(err: std::io::Error) -> SegmentError {
    match err.kind() {
        std::io::ErrorKind::UnexpectedEof => {
            SegmentError::CorruptData("snapshot truncated".to_string())
        }
        _ => SegmentError::Io(err),
    }
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    reader.read_u8().map_err(map_eof)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    reader.read_u32::<LittleEndian>().map_err(map_eof)
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    reader.read_u64::<LittleEndian>().map_err(map_eof)
}

fn read_i64<R: Read>(reader: &mut R) -> Result<i64> {
    reader.read_i64::<LittleEndian>().map_err(map_eof)
}

/// Read a declared-length payload, sized by what actually arrives so a
/// corrupt length field cannot force a huge allocation.
fn read_payload<R: Read>(reader: &mut R, declared_len: u64, marker: u8) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(declared_len)
        .read_to_end(&mut payload)?;

    if (payload.len() as u64) < declared_len {
        return Err(SegmentError::CorruptData(format!(
            "payload for marker 0x{:02X} truncated: declared {} bytes, found {}",
            marker,
            declared_len,
            payload.len()
        )));
    }

    Ok(payload)
}
