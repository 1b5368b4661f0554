//! Buffer Manager Tests
//!
//! Pin/unpin bookkeeping and the row format, exercised through the public
//! API against real files in a temporary directory.

use flatbtree::storage::page::codec;
use flatbtree::{BufferManager, ErrorKind, RowId, SlotId};
use proptest::prelude::*;
use std::collections::HashSet;
use tempfile::{tempdir, TempDir};

const FRAMES: usize = 10;
const ROWS: u64 = 16;

/// An index file of `ROWS` rows, row `n` holding the single entry `n+1 → n+2`.
fn create_bm(pool_size: usize) -> (BufferManager, TempDir) {
    let dir = tempdir().unwrap();
    let content: Vec<String> = (0..ROWS)
        .map(|n| format!("{};;;;;;{};;;;;;", n + 1, n + 2))
        .collect();
    std::fs::write(dir.path().join("tree"), content.join("\n")).unwrap();
    (BufferManager::new(dir.path(), pool_size), dir)
}

#[test]
fn test_pin_fill_and_exhaust() {
    let (mut bm, _dir) = create_bm(FRAMES);

    let slots: Vec<SlotId> = (0..FRAMES as u64)
        .map(|row| bm.pin("tree", RowId::new(row)).unwrap())
        .collect();
    let distinct: HashSet<SlotId> = slots.iter().copied().collect();
    assert_eq!(distinct.len(), FRAMES);
    assert_eq!(bm.free_slot_count(), 0);

    let err = bm.pin("tree", RowId::new(FRAMES as u64)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);

    // Every resident page is still there and unchanged
    for (row, &slot) in slots.iter().enumerate() {
        let page = bm.page(slot).unwrap();
        assert_eq!(page.row(), RowId::new(row as u64));
        assert_eq!(page.lookup(row as u64 + 1), Some(row as u64 + 2));
    }

    // Freeing one slot makes room again
    bm.unpin(slots[3]).unwrap();
    let slot = bm.pin("tree", RowId::new(FRAMES as u64)).unwrap();
    assert_eq!(slot, slots[3]);
}

#[test]
fn test_unpin_never_pinned_leaves_map_unchanged() {
    let (mut bm, _dir) = create_bm(FRAMES);
    bm.pin("tree", RowId::new(0)).unwrap();
    bm.pin("tree", RowId::new(1)).unwrap();

    for slot in [2, 7, FRAMES, FRAMES + 5] {
        let err = bm.unpin(SlotId::new(slot)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(bm.page_count(), 2);
    }
}

#[test]
fn test_two_files_share_the_pool() {
    let (mut bm, dir) = create_bm(3);
    std::fs::write(dir.path().join("other"), "1;;;;;;99;;;;;;").unwrap();

    let a = bm.pin("tree", RowId::ROOT).unwrap();
    let b = bm.pin("other", RowId::ROOT).unwrap();
    assert_ne!(a, b);
    assert_eq!(bm.page(a).unwrap().lookup(1), Some(2));
    assert_eq!(bm.page(b).unwrap().lookup(1), Some(99));
    assert_eq!(bm.slot_of("other", RowId::ROOT), Some(b));
}

#[test]
fn test_flush_and_reload() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tree"), "5;;;;;;6;;;;;;\n").unwrap();

    // First session: modify and flush
    {
        let mut bm = BufferManager::new(dir.path(), FRAMES);
        let slot = bm.pin("tree", RowId::ROOT).unwrap();
        bm.page_mut(slot).unwrap().insert(3, 4).unwrap();
        bm.flush(slot).unwrap();
    }

    // Second session: the change is on disk
    {
        let mut bm = BufferManager::new(dir.path(), FRAMES);
        let slot = bm.pin("tree", RowId::ROOT).unwrap();
        let page = bm.page(slot).unwrap();
        assert_eq!(page.lookup(3), Some(4));
        assert_eq!(page.lookup(5), Some(6));
    }

    let content = std::fs::read_to_string(dir.path().join("tree")).unwrap();
    assert_eq!(content, "3;5;;;;;4;6;;;;;\n");
}

/// A field is either empty or a non-zero decimal.
fn field() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), (1u64..=u64::MAX).prop_map(|n| n.to_string())]
}

proptest! {
    /// Deserialize then serialize reproduces a well-formed row exactly.
    #[test]
    fn prop_row_round_trip(fields in proptest::collection::vec(field(), 13)) {
        let line = fields.join(";");
        let page = codec::decode_row("tree", RowId::ROOT, &line).unwrap();
        prop_assert_eq!(codec::encode_row(&page), line);
    }

    /// Flushing an unmodified page leaves the file byte-for-byte unchanged.
    #[test]
    fn prop_flush_unmodified_page(
        rows in proptest::collection::vec(proptest::collection::vec(field(), 13), 1..6),
        trailing_newline in any::<bool>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let dir = tempdir().unwrap();
        let mut content = rows
            .iter()
            .map(|fields| fields.join(";"))
            .collect::<Vec<_>>()
            .join("\n");
        if trailing_newline {
            content.push('\n');
        }
        std::fs::write(dir.path().join("tree"), &content).unwrap();

        let mut bm = BufferManager::new(dir.path(), FRAMES);
        let row = RowId::new(pick.index(rows.len()) as u64);
        let slot = bm.pin("tree", row).unwrap();
        bm.flush(slot).unwrap();

        let rewritten = std::fs::read_to_string(dir.path().join("tree")).unwrap();
        prop_assert_eq!(rewritten, content);
    }

    /// Arbitrary pin/unpin sequences keep one slot-map entry per occupied
    /// slot and never hand one slot to two rows.
    #[test]
    fn prop_slot_map_tracks_occupied_slots(
        ops in proptest::collection::vec((any::<bool>(), 0..ROWS, 0..FRAMES), 1..60)
    ) {
        let (mut bm, _dir) = create_bm(4);

        for (is_pin, row, slot) in ops {
            if is_pin {
                match bm.pin("tree", RowId::new(row)) {
                    Ok(slot) => {
                        prop_assert_eq!(bm.page(slot).unwrap().row(), RowId::new(row));
                    }
                    Err(err) => {
                        prop_assert_eq!(err.kind(), ErrorKind::Capacity);
                    }
                }
            } else {
                let before = bm.page_count();
                match bm.unpin(SlotId::new(slot)) {
                    Ok(()) => {
                        prop_assert_eq!(bm.page_count(), before - 1);
                    }
                    Err(err) => {
                        prop_assert_eq!(err.kind(), ErrorKind::NotFound);
                        prop_assert_eq!(bm.page_count(), before);
                    }
                }
            }

            prop_assert_eq!(bm.page_count() + bm.free_slot_count(), bm.pool_size());

            let resident: Vec<(SlotId, RowId)> = bm
                .resident_pages()
                .map(|(slot, page)| (slot, page.row()))
                .collect();
            let rows: HashSet<RowId> = resident.iter().map(|&(_, row)| row).collect();
            prop_assert_eq!(rows.len(), resident.len());
            for (slot, row) in resident {
                prop_assert_eq!(bm.slot_of("tree", row), Some(slot));
            }
        }
    }
}
