// src/types.rs
use std::fmt;

/// Byte position of a segment within its source container file.
///
/// Producers that know where a segment came from record `At(position)`;
/// producers working from non-seekable input record `Unknown`. Snapshots
/// carry the offset as a signed 64-bit value with -1 reserved for `Unknown`,
/// so positions above [`SegmentOffset::MAX_OFFSET`] have no wire form and
/// fold to `Unknown` wherever a segment is built or converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentOffset {
    /// Absolute byte offset from the start of the source file.
    At(u64),
    /// No position information was recorded for this segment.
    #[default]
    Unknown,
}

impl SegmentOffset {
    /// Wire sentinel for an unknown offset.
    pub const UNKNOWN_RAW: i64 = -1;

    /// Largest position the signed wire field can carry.
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// Check if a concrete source position was recorded.
    pub fn is_known(&self) -> bool {
        matches!(self, SegmentOffset::At(_))
    }

    /// Get the recorded position, or `None` when unknown.
    pub fn value(&self) -> Option<u64> {
        match self {
            SegmentOffset::At(position) => Some(*position),
            SegmentOffset::Unknown => None,
        }
    }

    /// Replace a position the wire field cannot carry with `Unknown`.
    pub fn normalize(self) -> Self {
        match self {
            SegmentOffset::At(position) if position > Self::MAX_OFFSET => SegmentOffset::Unknown,
            other => other,
        }
    }

    /// Convert to the signed wire representation.
    ///
    /// Positions above [`SegmentOffset::MAX_OFFSET`] map to the unknown
    /// sentinel, agreeing with [`normalize`](SegmentOffset::normalize).
    pub fn to_raw(&self) -> i64 {
        match self {
            SegmentOffset::At(position) if *position <= Self::MAX_OFFSET => *position as i64,
            _ => Self::UNKNOWN_RAW,
        }
    }

    /// Convert from the signed wire representation.
    ///
    /// Returns `None` for negative values other than the unknown sentinel;
    /// a well-formed encoder never produces them.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw == Self::UNKNOWN_RAW {
            Some(SegmentOffset::Unknown)
        } else if raw >= 0 {
            Some(SegmentOffset::At(raw as u64))
        } else {
            None
        }
    }
}

impl From<u64> for SegmentOffset {
    fn from(position: u64) -> Self {
        SegmentOffset::At(position).normalize()
    }
}

/// One occurrence of segment data: an opaque payload plus the offset at
/// which it appeared in the source file, when known.
///
/// Payloads are owned and immutable once stored; zero-length payloads are
/// legal. The payload/offset pairing lives inside the segment itself, so the
/// two can never get out of step.
#[derive(Clone, PartialEq, Eq)]
pub struct Segment {
    payload: Vec<u8>,
    offset: SegmentOffset,
}

impl Segment {
    /// Create a segment with no source position information.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Segment {
            payload: payload.into(),
            offset: SegmentOffset::Unknown,
        }
    }

    /// Create a segment carrying an explicit source offset.
    ///
    /// The offset is normalized on the way in, so a stored segment always
    /// has an exact snapshot representation.
    pub fn with_offset(payload: impl Into<Vec<u8>>, offset: SegmentOffset) -> Self {
        Segment {
            payload: payload.into(),
            offset: offset.normalize(),
        }
    }

    /// Get the raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the source offset recorded for this segment.
    pub fn offset(&self) -> SegmentOffset {
        self.offset
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is zero-length.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Consume the segment, returning ownership of the payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

// Implement Debug manually to avoid printing large payloads
impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("len", &self.payload.len())
            .field("offset", &self.offset)
            .finish()
    }
}
