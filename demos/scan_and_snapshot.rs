// demos/scan_and_snapshot.rs
use segidx::*;

fn main() -> Result<()> {
    let mut index = SegmentIndex::new();

    // Keep the metadata-bearing segments a scan of a container file found
    index.add_at(0xE0, vec![0x4A, 0x46, 0x49, 0x46, 0x00], 2);
    index.add_at(0xE1, vec![0x45, 0x78, 0x69, 0x66, 0x00, 0x00], 20);
    index.add_at(0xE1, vec![0x68, 0x74, 0x74, 0x70, 0x3A], 880);
    index.add_at(0xFE, b"scanned by segidx".to_vec(), 1304);

    println!(
        "Indexed {} segments across {} markers ({} payload bytes)",
        index.len(),
        index.marker_count(),
        index.payload_bytes()
    );

    // Persist the index and load it back
    snapshot::write_file("demo.snapshot", &index)?;
    let restored = snapshot::read_file("demo.snapshot")?;
    assert_eq!(restored, index);

    for marker in restored.markers() {
        println!(
            "  marker 0x{:02X}: {} occurrence(s), first at {:?}",
            marker,
            restored.count(marker),
            restored.first_offset(marker)
        );
    }

    println!("Snapshot round trip verified ({} bytes on disk)", snapshot::encoded_len(&restored));

    std::fs::remove_file("demo.snapshot").ok();

    Ok(())
}
