// tests/index_tests.rs
use segidx::*;

#[test]
fn test_scan_population_scenario() {
    let mut index = SegmentIndex::new();

    // A scan finds two app segments and a quantization table.
    index.add_at(0xE1, vec![0x01, 0x02], 10);
    index.add_at(0xE1, vec![0x03], 50);
    index.add_at(0xDB, vec![0x10, 0x11, 0x12], 200);

    assert_eq!(index.count(0xE1), 2);
    assert_eq!(index.get(0xE1, 1), Some(&[0x03][..]));
    assert_eq!(index.get_offset(0xE1, 0), Some(SegmentOffset::At(10)));

    // Dropping the first occurrence shifts the second down.
    let removed = index.remove_occurrence(0xE1, 0).unwrap();
    assert_eq!(removed.payload(), &[0x01, 0x02]);
    assert_eq!(index.count(0xE1), 1);
    assert_eq!(index.get(0xE1, 0), Some(&[0x03][..]));
    assert_eq!(index.get_offset(0xE1, 0), Some(SegmentOffset::At(50)));

    index.remove_all(0xE1);
    assert!(!index.contains(0xE1));
    assert_eq!(index.count(0xE1), 0);
    assert!(index.contains(0xDB));
}

#[test]
fn test_populate_via_extend() {
    // A producer yields (marker, segment) pairs in file order.
    let scan = vec![
        (0xD8, Segment::with_offset(Vec::new(), SegmentOffset::At(0))),
        (0xE1, Segment::with_offset(vec![0x45, 0x78], SegmentOffset::At(2))),
        (0xDB, Segment::with_offset(vec![0x01; 64], SegmentOffset::At(90))),
        (0xE1, Segment::new(vec![0x99])),
    ];

    let index: SegmentIndex = scan.into_iter().collect();

    assert_eq!(index.marker_count(), 3);
    assert_eq!(index.len(), 4);
    assert_eq!(index.count(0xE1), 2);
    assert_eq!(index.first(0xD8), Some(&[][..]));
    assert_eq!(index.get_offset(0xE1, 1), Some(SegmentOffset::Unknown));

    // Global iteration goes marker-ascending, insertion order inside a marker.
    let order: Vec<u8> = index.iter().map(|(marker, _)| marker).collect();
    assert_eq!(order, vec![0xD8, 0xDB, 0xE1, 0xE1]);
}

#[test]
fn test_full_marker_space() {
    let mut index = SegmentIndex::new();
    for marker in 0..=255u8 {
        index.add_at(marker, vec![marker], marker as u64 * 4);
    }

    assert_eq!(index.marker_count(), 256);
    assert_eq!(index.len(), 256);

    let markers: Vec<u8> = index.markers().collect();
    assert_eq!(markers.len(), 256);
    assert_eq!(markers[0], 0);
    assert_eq!(markers[255], 255);
    assert!(markers.windows(2).all(|pair| pair[0] < pair[1]));

    assert_eq!(index.get(0xFF, 0), Some(&[0xFF][..]));
    assert_eq!(index.get_offset(0x00, 0), Some(SegmentOffset::At(0)));
}

#[test]
fn test_query_surface_consistency() {
    let mut index = SegmentIndex::new();
    index.add_at(0xE2, vec![0x01, 0x02, 0x03], 7);
    index.add(0xE2, vec![0x04]);

    assert_eq!(index.first(0xE2), index.get(0xE2, 0));
    assert_eq!(index.first_offset(0xE2), index.get_offset(0xE2, 0));
    assert_eq!(index.segments(0xE2).len(), index.count(0xE2));
    assert_eq!(index.payload_bytes(), 4);

    let via_segment = index.segment(0xE2, 1).unwrap();
    assert_eq!(via_segment.payload(), index.get(0xE2, 1).unwrap());
    assert_eq!(via_segment.offset(), index.get_offset(0xE2, 1).unwrap());
}

#[test]
fn test_removal_until_empty() {
    let mut index = SegmentIndex::new();
    for occurrence in 0..4u8 {
        index.add(0xC4, vec![occurrence]);
    }

    // Draining from the front walks through every stored payload in order.
    for expected in 0..4u8 {
        let removed = index.remove_occurrence(0xC4, 0).unwrap();
        assert_eq!(removed.payload(), &[expected]);
    }

    assert!(!index.contains(0xC4));
    match index.remove_occurrence(0xC4, 0) {
        Err(SegmentError::InvalidOperation {
            marker,
            occurrence,
            count,
        }) => {
            assert_eq!(marker, 0xC4);
            assert_eq!(occurrence, 0);
            assert_eq!(count, 0);
        }
        _ => panic!("Expected InvalidOperation error"),
    }
}

#[test]
fn test_remove_middle_occurrence() {
    let mut index = SegmentIndex::new();
    index.add(0xE1, vec![0x00]);
    index.add(0xE1, vec![0x01]);
    index.add(0xE1, vec![0x02]);

    index.remove_occurrence(0xE1, 1).unwrap();

    assert_eq!(index.count(0xE1), 2);
    assert_eq!(index.get(0xE1, 0), Some(&[0x00][..]));
    assert_eq!(index.get(0xE1, 1), Some(&[0x02][..]));
}

#[test]
fn test_clone_is_independent() {
    let mut index = SegmentIndex::new();
    index.add_at(0xE1, vec![0x01], 3);

    let snapshot_copy = index.clone();
    index.add(0xE1, vec![0x02]);
    index.remove_all(0xE1);

    assert_eq!(snapshot_copy.count(0xE1), 1);
    assert_eq!(snapshot_copy.get(0xE1, 0), Some(&[0x01][..]));
    assert!(index.is_empty());
}

#[test]
fn test_equality_reflects_content_not_history() {
    // Same final content reached through different operation sequences.
    let mut direct = SegmentIndex::new();
    direct.add_at(0xE1, vec![0x03], 50);

    let mut reworked = SegmentIndex::new();
    reworked.add_at(0xE1, vec![0x01, 0x02], 10);
    reworked.add_at(0xE1, vec![0x03], 50);
    reworked.remove_occurrence(0xE1, 0).unwrap();

    assert_eq!(direct, reworked);
}
