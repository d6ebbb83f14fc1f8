//! Property tests for the dynamic array's growth, preservation, and
//! truncation contracts.

use proptest::prelude::*;

use silt_array::DynArray;
use silt_heap::Heap;

/// Smallest number of doublings that takes `capacity` to at least `need`.
fn doublings_needed(mut capacity: usize, need: usize) -> u32 {
    let mut steps = 0;
    while capacity < need {
        capacity = capacity.max(1) * 2;
        steps += 1;
    }
    steps
}

proptest! {
    // Capacity never decreases under pushes and always covers the count.
    #[test]
    fn capacity_is_monotonic_and_covers_count(
        stride in 1usize..16,
        initial_capacity in 0usize..8,
        pushes in 1usize..200,
    ) {
        let heap = Heap::new();
        let mut arr = DynArray::new_array(&heap, stride, initial_capacity).unwrap();

        let mut last_capacity = arr.capacity();
        for _ in 0..pushes {
            arr.push_back(None).unwrap();
            prop_assert!(arr.capacity() >= last_capacity);
            prop_assert!(arr.capacity() >= arr.len());
            last_capacity = arr.capacity();
        }
        prop_assert_eq!(arr.len(), pushes);
    }

    // With growth factor 2, N pushes trigger at most as many resizes as
    // doublings needed to reach N — the amortized-growth contract.
    #[test]
    fn push_sequences_resize_logarithmically(
        initial_capacity in 1usize..8,
        pushes in 1usize..500,
    ) {
        let heap = Heap::new();
        let mut arr = DynArray::new_array(&heap, 4, initial_capacity).unwrap();

        let mut resizes = 0u32;
        let mut last_capacity = arr.capacity();
        for _ in 0..pushes {
            arr.push_back(None).unwrap();
            if arr.capacity() != last_capacity {
                resizes += 1;
                last_capacity = arr.capacity();
            }
        }
        prop_assert!(resizes <= doublings_needed(initial_capacity, pushes));
    }

    // Growing preserves every populated element byte-for-byte.
    #[test]
    fn grow_preserves_all_elements(
        records in prop::collection::vec(prop::collection::vec(any::<u8>(), 8), 1..32),
        extra in 1usize..64,
    ) {
        let heap = Heap::new();
        let mut arr = DynArray::new_array(&heap, 8, 2).unwrap();
        for record in &records {
            arr.push_back(Some(record)).unwrap();
        }

        arr.resize(arr.len() + extra).unwrap();
        prop_assert_eq!(arr.len(), records.len());
        for (i, record) in records.iter().enumerate() {
            prop_assert_eq!(&*arr.get(i).unwrap(), record.as_slice());
        }
    }

    // Shrinking truncates the count and preserves the surviving prefix.
    #[test]
    fn shrink_truncates_and_preserves_the_prefix(
        records in prop::collection::vec(prop::collection::vec(any::<u8>(), 4), 1..32),
        new_capacity in 0usize..16,
    ) {
        let heap = Heap::new();
        let mut arr = DynArray::new_array(&heap, 4, 1).unwrap();
        for record in &records {
            arr.push_back(Some(record)).unwrap();
        }

        arr.resize(new_capacity).unwrap();
        let expected_count = records.len().min(new_capacity);
        prop_assert_eq!(arr.len(), expected_count);
        prop_assert_eq!(arr.capacity(), new_capacity);
        for (i, record) in records.iter().take(expected_count).enumerate() {
            prop_assert_eq!(&*arr.get(i).unwrap(), record.as_slice());
        }
        prop_assert!(arr.get(expected_count).is_none());
    }

    // A null push always reads back as stride bytes of zero, regardless of
    // what was pushed before it.
    #[test]
    fn null_push_reads_back_as_zero_bytes(
        stride in 1usize..16,
        preceding in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        let heap = Heap::new();
        let mut arr = DynArray::new_array(&heap, stride, 1).unwrap();
        for &byte in &preceding {
            arr.push_back(Some(&vec![byte; stride])).unwrap();
        }

        arr.push_back(None).unwrap();
        let back = arr.back().unwrap();
        prop_assert_eq!(back.len(), stride);
        prop_assert!(back.iter().all(|&b| b == 0));
    }

    // A pushed element is a copy: mutating the source afterwards does not
    // change what the array stored.
    #[test]
    fn pushed_elements_are_independent_copies(
        record in prop::collection::vec(any::<u8>(), 8),
    ) {
        let heap = Heap::new();
        let mut arr = DynArray::new_array(&heap, 8, 1).unwrap();
        let mut source = record.clone();
        arr.push_back(Some(&source)).unwrap();

        for byte in source.iter_mut() {
            *byte = byte.wrapping_add(1);
        }
        prop_assert_eq!(&*arr.back().unwrap(), record.as_slice());
    }
}

#[test]
fn stale_buffer_handles_see_the_old_storage() {
    let heap = Heap::new();
    let mut arr = DynArray::new_array(&heap, 4, 1).unwrap();
    arr.push_back(Some(&[1, 2, 3, 4])).unwrap();

    // A handle cached before a growing resize refers to the old buffer.
    let stale = arr.data();
    arr.resize(8).unwrap();
    assert!(!stale.same_identity(&arr.data()));

    // Writing through the stale handle cannot reach the live storage.
    stale.bytes_mut().unwrap().fill(0xEE);
    assert_eq!(&*arr.get(0).unwrap(), &[1, 2, 3, 4]);
}
