//! Shared helpers for integration tests
//!
//! - The greedy-descending partition construction, kept here as an oracle
//!   for the merge-based partitioner
//! - Closed-form checks for partitions and collision searches

#![allow(dead_code)]

use bivo_planner::{CircularBufferConfig, CollisionResult};

/// Greedy-descending construction of a minimal bounding partition
///
/// 1. Requests up to the smallest size get one smallest window.
/// 2. Otherwise take the largest size that still fits under the request,
///    repeatedly, until not even the smallest fits.
/// 3. Cover any remainder with the smallest size that overshoots it.
/// 4. Merge the last two windows while they are equal and below the largest.
/// 5. Exchange the last two windows.
pub fn greedy_partition(sample_count: u64, sizes: &[u32]) -> Vec<u32> {
    let min = sizes[0] as u64;
    let max = sizes[sizes.len() - 1];

    if sample_count <= min {
        return vec![min as u32];
    }

    let mut windows: Vec<u32> = Vec::new();
    let mut total = 0u64;

    while total + min <= sample_count {
        let size = sizes
            .iter()
            .rev()
            .copied()
            .find(|&s| total + s as u64 <= sample_count)
            .expect("smallest size fits");
        windows.push(size);
        total += size as u64;
    }

    if total < sample_count {
        let size = sizes
            .iter()
            .copied()
            .find(|&s| total + s as u64 > sample_count)
            .unwrap_or(max);
        windows.push(size);
    }

    while windows.len() > 1 {
        let last = windows[windows.len() - 1];
        let prev = windows[windows.len() - 2];
        if last != prev || last == max {
            break;
        }
        windows.pop();
        let end = windows.len() - 1;
        windows[end] = last * 2;
    }

    let len = windows.len();
    if len >= 2 {
        windows.swap(len - 2, len - 1);
    }

    windows
}

/// Least total reachable with sizes that are all multiples of `min`
pub fn minimal_total(sample_count: u64, min: u32) -> u64 {
    sample_count.div_ceil(min as u64).max(1) * min as u64
}

/// Fewest windows summing to `total` (binary digits below `max`, then `max` blocks)
pub fn fewest_windows(total: u64, min: u32, max: u32) -> usize {
    let full = total / max as u64;
    let rest = (total % max as u64) / min as u64;
    full as usize + rest.count_ones() as usize
}

/// Sorted copy for multiset comparison
pub fn multiset(windows: &[u32]) -> Vec<u32> {
    let mut sorted = windows.to_vec();
    sorted.sort_unstable();
    sorted
}

/// Record and send positions after `steps`, straight from the closed form
pub fn positions_at(config: &CircularBufferConfig, steps: u64) -> (u64, u64) {
    let (advance, per) = config
        .send_rate
        .relative_to(&config.sample_rate)
        .expect("valid rates");
    let capacity = config.capacity as u128;
    let sent = steps as u128 * advance as u128 / per as u128;
    let record = (config.record_start as u128 + steps as u128) % capacity;
    let send = (config.send_start as u128 + sent) % capacity;
    (record as u64, send as u64)
}

/// Assert a solver result is a genuine coincidence
pub fn assert_collision(config: &CircularBufferConfig, result: &CollisionResult) {
    let (record, send) = positions_at(config, result.samples_recorded);
    assert_eq!(record, send, "pointers differ at reported collision");
    assert_eq!(record, result.collision_index as u64);
}
