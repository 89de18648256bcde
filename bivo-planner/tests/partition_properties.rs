//! Partition properties
//!
//! The merge-based partitioner against the greedy oracle, plus minimality,
//! ordering and determinism checks.

mod common;

use bivo_planner::{SegmentPartitioner, WindowSizes};
use common::{fewest_windows, greedy_partition, minimal_total, multiset};
use proptest::prelude::*;
use std::time::{Duration, Instant};

#[test]
fn matches_greedy_construction_up_to_100k() {
    let partitioner = SegmentPartitioner::default();
    let sizes = WindowSizes::fft_default();

    for samples in 0..=100_000u64 {
        let merged = partitioner.partition(samples).unwrap();
        let greedy = greedy_partition(samples, sizes.as_slice());

        assert_eq!(multiset(merged.windows()), multiset(&greedy), "samples = {}", samples);
        assert_eq!(merged.total(), greedy.iter().map(|&w| w as u64).sum::<u64>());

        // Only the final two positions may legitimately differ
        let n = greedy.len();
        if n > 2 {
            assert_eq!(&merged.windows()[..n - 2], &greedy[..n - 2], "samples = {}", samples);
        }
    }
}

#[test]
fn long_recordings_partition_in_linear_time() {
    let partitioner = SegmentPartitioner::default();
    let started = Instant::now();

    for samples in [100_000_000u64, 1_000_000_000] {
        let partition = partitioner.partition(samples).unwrap();
        assert_eq!(partition.total(), minimal_total(samples, 256));
        assert_eq!(partition.len(), fewest_windows(partition.total(), 256, 4096));
        assert_eq!(partition.excess(), 0);
    }
    assert_eq!(partitioner.partition(100_000_000).unwrap().len(), 24_415);

    // Generous budget for a linear pass in a debug build
    assert!(started.elapsed() < Duration::from_secs(10), "took {:?}", started.elapsed());
}

#[test]
fn boundary_requests() {
    let partitioner = SegmentPartitioner::default();
    assert_eq!(partitioner.partition(0).unwrap().windows(), &[256]);
    assert_eq!(partitioner.partition(256).unwrap().windows(), &[256]);
    assert_eq!(partitioner.partition(257).unwrap().windows(), &[512]);
}

#[test]
fn tail_window_never_smallest_when_avoidable() {
    let partitioner = SegmentPartitioner::default();
    for samples in 0..=50_000u64 {
        let partition = partitioner.partition(samples).unwrap();
        let windows = partition.windows();
        if windows.len() >= 2 {
            let last = windows[windows.len() - 1];
            let prev = windows[windows.len() - 2];
            assert!(last >= prev, "samples = {}: {:?}", samples, windows);
        }
    }
}

#[test]
fn greedy_oracle_on_custom_ladder() {
    let sizes = WindowSizes::new(64, 1024).unwrap();
    let partitioner = SegmentPartitioner::new(sizes.clone());

    for samples in 0..=20_000u64 {
        let merged = partitioner.partition(samples).unwrap();
        let greedy = greedy_partition(samples, sizes.as_slice());
        assert_eq!(multiset(merged.windows()), multiset(&greedy), "samples = {}", samples);
    }
}

proptest! {
    #[test]
    fn prop_minimal_bounding(samples in 0u64..500_000) {
        let partition = SegmentPartitioner::default().partition(samples).unwrap();

        prop_assert!(partition.total() >= samples);
        prop_assert_eq!(partition.total(), minimal_total(samples, 256));
        prop_assert_eq!(partition.len(), fewest_windows(partition.total(), 256, 4096));
    }

    #[test]
    fn prop_windows_are_admissible(samples in 0u64..500_000) {
        let sizes = WindowSizes::fft_default();
        let partition = SegmentPartitioner::default().partition(samples).unwrap();

        prop_assert!(partition.iter().all(|w| sizes.contains(w)));

        // Every size below the maximum appears at most once
        for size in [256u32, 512, 1024, 2048] {
            prop_assert!(partition.iter().filter(|&w| w == size).count() <= 1);
        }
    }

    #[test]
    fn prop_large_blocks_lead(samples in 0u64..500_000) {
        let partition = SegmentPartitioner::default().partition(samples).unwrap();
        let windows = partition.windows();
        let n = windows.len();

        // Descending apart from the exchanged tail pair
        if n > 2 {
            for pair in windows[..n - 1].windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
            prop_assert!(windows[n - 3] >= windows[n - 1]);
        }
    }

    #[test]
    fn prop_deterministic(samples in any::<u32>()) {
        let partitioner = SegmentPartitioner::default();
        let first = partitioner.partition(samples as u64 % 1_000_000).unwrap();
        let second = partitioner.partition(samples as u64 % 1_000_000).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_excess_below_one_floor_window(samples in 1u64..500_000) {
        let partition = SegmentPartitioner::default().partition(samples).unwrap();
        prop_assert!(partition.excess() < 256);
    }
}
