// src/index.rs
use crate::error::{Result, SegmentError};
use crate::types::{Segment, SegmentOffset};
use std::fmt;

/// In-memory index of container-file segments, keyed by their single-byte
/// marker.
///
/// A container scan need not retain every segment it meets; typically only
/// the metadata-bearing ones are kept. Where multiple segments share a
/// marker, all of them are stored and addressable by a zero-based occurrence
/// index, in insertion order. The index owns every payload it stores.
///
/// Markers span the full 0-255 range, so the mapping is a fixed array of 256
/// optional sequences indexed directly by marker value - no hashing, no boxed
/// keys. An absent marker and a marker with zero occurrences are the same
/// state: the slot is `None`, and removing the last occurrence resets it.
///
/// # Example
///
/// ```
/// use segidx::SegmentIndex;
///
/// let mut index = SegmentIndex::new();
/// index.add_at(0xE1, vec![0x01, 0x02], 10);
/// index.add_at(0xE1, vec![0x03], 50);
///
/// assert_eq!(index.count(0xE1), 2);
/// assert_eq!(index.get(0xE1, 1), Some(&[0x03][..]));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SegmentIndex {
    slots: [Option<Vec<Segment>>; 256],
}

impl SegmentIndex {
    const EMPTY_SLOT: Option<Vec<Segment>> = None;

    /// Create an empty index.
    pub fn new() -> Self {
        SegmentIndex {
            slots: [Self::EMPTY_SLOT; 256],
        }
    }

    /// Append a segment occurrence for `marker`.
    ///
    /// This is the general form; `add` and `add_at` delegate to it. The
    /// sequence for the marker is created on first use. There is no failure
    /// mode: any marker value is legal and payloads are stored verbatim,
    /// zero-length included.
    pub fn add_segment(&mut self, marker: u8, segment: Segment) {
        self.slots[marker as usize]
            .get_or_insert_with(Vec::new)
            .push(segment);
    }

    /// Append a payload for `marker` without source position information.
    ///
    /// # Example
    ///
    /// ```
    /// use segidx::{SegmentIndex, SegmentOffset};
    ///
    /// let mut index = SegmentIndex::new();
    /// index.add(0xFE, b"comment".to_vec());
    ///
    /// assert_eq!(index.get_offset(0xFE, 0), Some(SegmentOffset::Unknown));
    /// ```
    pub fn add(&mut self, marker: u8, payload: impl Into<Vec<u8>>) {
        self.add_segment(marker, Segment::new(payload));
    }

    /// Append a payload for `marker` together with the byte offset at which
    /// it occurred in the source file.
    ///
    /// Offsets above [`SegmentOffset::MAX_OFFSET`] have no snapshot form and
    /// are recorded as unknown.
    pub fn add_at(&mut self, marker: u8, payload: impl Into<Vec<u8>>, offset: u64) {
        self.add_segment(marker, Segment::with_offset(payload, SegmentOffset::At(offset)));
    }

    /// Get the stored segment at `(marker, occurrence)`.
    ///
    /// Returns `None` if the marker is absent or the occurrence index is out
    /// of range; querying never fails.
    pub fn segment(&self, marker: u8, occurrence: usize) -> Option<&Segment> {
        self.slots[marker as usize]
            .as_ref()
            .and_then(|segments| segments.get(occurrence))
    }

    /// Get the payload bytes at `(marker, occurrence)`.
    pub fn get(&self, marker: u8, occurrence: usize) -> Option<&[u8]> {
        self.segment(marker, occurrence).map(Segment::payload)
    }

    /// Get the source offset recorded at `(marker, occurrence)`.
    ///
    /// The two "nothing there" cases are kept apart: `None` means the
    /// occurrence does not exist, while `Some(SegmentOffset::Unknown)` means
    /// it exists but was stored without position information.
    pub fn get_offset(&self, marker: u8, occurrence: usize) -> Option<SegmentOffset> {
        self.segment(marker, occurrence).map(Segment::offset)
    }

    /// Get the first payload stored for `marker`.
    pub fn first(&self, marker: u8) -> Option<&[u8]> {
        self.get(marker, 0)
    }

    /// Get the source offset of the first occurrence of `marker`.
    pub fn first_offset(&self, marker: u8) -> Option<SegmentOffset> {
        self.get_offset(marker, 0)
    }

    /// All occurrences stored for `marker`, in insertion order.
    ///
    /// Returns an empty slice for an absent marker.
    pub fn segments(&self, marker: u8) -> &[Segment] {
        self.slots[marker as usize].as_deref().unwrap_or(&[])
    }

    /// Number of occurrences stored for `marker` (0 if absent).
    pub fn count(&self, marker: u8) -> usize {
        self.slots[marker as usize]
            .as_ref()
            .map_or(0, |segments| segments.len())
    }

    /// Check whether at least one occurrence exists for `marker`.
    pub fn contains(&self, marker: u8) -> bool {
        self.slots[marker as usize].is_some()
    }

    /// Remove exactly one occurrence, returning it.
    ///
    /// Later occurrences shift down by one index; the relative order of the
    /// remainder is preserved. Addressing a nonexistent marker or an
    /// out-of-range occurrence is a caller bug and is reported as
    /// [`SegmentError::InvalidOperation`] - it neither silently no-ops nor
    /// disturbs the stored sequence.
    pub fn remove_occurrence(&mut self, marker: u8, occurrence: usize) -> Result<Segment> {
        let slot = &mut self.slots[marker as usize];
        match slot {
            Some(segments) if occurrence < segments.len() => {
                let removed = segments.remove(occurrence);
                // An emptied sequence reverts to an absent marker.
                if segments.is_empty() {
                    *slot = None;
                }
                Ok(removed)
            }
            _ => Err(SegmentError::InvalidOperation {
                marker,
                occurrence,
                count: slot.as_ref().map_or(0, |segments| segments.len()),
            }),
        }
    }

    /// Remove every occurrence stored for `marker`.
    ///
    /// Afterward `contains(marker)` is false and `count(marker)` is 0. A
    /// no-op, not an error, when the marker was already absent.
    pub fn remove_all(&mut self, marker: u8) {
        self.slots[marker as usize] = None;
    }

    /// Markers with at least one occurrence, in ascending value order.
    pub fn markers(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(marker, slot)| slot.as_ref().map(|_| marker as u8))
    }

    /// Every stored segment as `(marker, segment)` pairs, ascending by
    /// marker and in insertion order within a marker.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Segment)> {
        self.slots.iter().enumerate().flat_map(|(marker, slot)| {
            slot.as_deref()
                .unwrap_or(&[])
                .iter()
                .map(move |segment| (marker as u8, segment))
        })
    }

    /// Number of distinct markers present.
    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }

    /// Total number of stored segments across all markers.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .map(|segments| segments.len())
            .sum()
    }

    /// Check if the index holds no segments at all.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Total payload bytes stored across all segments.
    pub fn payload_bytes(&self) -> usize {
        self.iter().map(|(_, segment)| segment.len()).sum()
    }

    /// Drop every stored segment, leaving an empty index.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
    }
}

impl Default for SegmentIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Bulk-feed from a producer scanning a container file: the scan yields
/// `(marker, segment)` pairs in file order and the index appends them in
/// that order.
impl Extend<(u8, Segment)> for SegmentIndex {
    fn extend<I: IntoIterator<Item = (u8, Segment)>>(&mut self, iter: I) {
        for (marker, segment) in iter {
            self.add_segment(marker, segment);
        }
    }
}

impl FromIterator<(u8, Segment)> for SegmentIndex {
    fn from_iter<I: IntoIterator<Item = (u8, Segment)>>(iter: I) -> Self {
        let mut index = SegmentIndex::new();
        index.extend(iter);
        index
    }
}

// Implement Debug manually to avoid printing stored payloads
impl fmt::Debug for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentIndex")
            .field("marker_count", &self.marker_count())
            .field("len", &self.len())
            .field("payload_bytes", &self.payload_bytes())
            .finish()
    }
}
