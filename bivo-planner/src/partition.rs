//! Minimal-Bounding Window Partitioner
//!
//! ## Overview
//!
//! A recorded segment has an arbitrary number of samples, but the FFT stage
//! only accepts the lengths in [`WindowSizes`]. The partitioner picks the
//! sequence of windows whose total is the smallest admissible value that
//! still covers every sample ("minimal bounding"), using as few windows as
//! possible.
//!
//! ## Algorithm
//!
//! 1. Count minimum-size units: `ceil(samples / min)`, at least one.
//! 2. Merge pass: push the units one at a time onto a stack of windows. While
//!    the top two windows are equal and below the maximum, fuse them into one
//!    window of twice the size. This is a binary counter whose place values
//!    are the window sizes, capped at the maximum.
//! 3. Order the windows largest first, then exchange the last two.
//!
//! ```text
//! 7 units
//! [256]
//! [512]
//! [512 256]
//! [1024]
//! [1024 256]
//! [1024 512]
//! [1024 512 256]
//!
//! 1280 samples → 5 units → [1024 256] → swap → [256 1024]
//! ```
//!
//! Because every admissible size is a multiple of the minimum, the total is
//! always `units × min`, which is the least multiple of `min` covering the
//! request. Below the maximum each size appears at most once, and the stack
//! never holds more than `units / (max / min)` maximum windows plus one
//! window per smaller rung.
//!
//! ## Ordering Contract
//!
//! Downstream windowing picks a window function per block and expects the
//! large blocks first with the smallest block *not* in the tail position.
//! Exchanging the last two windows after the descending layout guarantees
//! that whenever the last two differ. When they are equal (two maximum
//! windows) the exchange is a no-op.
//!
//! ## Termination
//!
//! Each unit is pushed once and each merge pops one window, so the pass
//! takes at most `2 × units` steps and runs in linear time. The loop still
//! carries an explicit iteration cap. Hitting it reports
//! [`PlanningError::InternalInvariantViolation`].

use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::{
    errors::{PlanningError, PlanningResult},
    window::WindowSizes,
};

/// Ordered FFT windows covering a sample count
///
/// Only [`SegmentPartitioner::partition`] builds one, so every instance has
/// passed the bounding check. It serializes for reporting but does not
/// deserialize.
///
/// ```compile_fail
/// use bivo_planner::Partition;
///
/// let forged: Partition = serde_json::from_str(r#"{"windows":[7],"requested":0}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Partition {
    windows: Vec<u32>,
    requested: u64,
}

impl Partition {
    /// Window lengths in processing order
    pub fn windows(&self) -> &[u32] {
        &self.windows
    }

    /// Sample count the partition was built for
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Never true; every partition holds at least one window
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Total samples covered by all windows
    pub fn total(&self) -> u64 {
        self.windows.iter().map(|&w| w as u64).sum()
    }

    /// Samples of padding beyond the request
    pub fn excess(&self) -> u64 {
        self.total().saturating_sub(self.requested)
    }

    /// Smallest window in the partition
    pub fn smallest(&self) -> u32 {
        self.windows.iter().copied().min().unwrap_or(0)
    }

    /// Iterate windows in processing order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.windows.iter().copied()
    }

    /// Take ownership of the window list
    pub fn into_windows(self) -> Vec<u32> {
        self.windows
    }
}

/// Splits sample counts into admissible FFT windows
#[derive(Debug, Clone, Default)]
pub struct SegmentPartitioner {
    sizes: WindowSizes,
}

impl SegmentPartitioner {
    /// Partitioner over a custom window ladder
    pub fn new(sizes: WindowSizes) -> Self {
        Self { sizes }
    }

    /// The window ladder in use
    pub fn sizes(&self) -> &WindowSizes {
        &self.sizes
    }

    /// Windows whose total minimally bounds `sample_count`
    ///
    /// An empty request still gets one minimum window.
    ///
    /// ```rust
    /// use bivo_planner::SegmentPartitioner;
    ///
    /// let partitioner = SegmentPartitioner::default();
    /// assert_eq!(partitioner.partition(0).unwrap().windows(), &[256]);
    /// assert_eq!(partitioner.partition(257).unwrap().windows(), &[512]);
    /// assert_eq!(partitioner.partition(1280).unwrap().windows(), &[256, 1024]);
    /// assert_eq!(partitioner.partition(8193).unwrap().windows(), &[4096, 256, 4096]);
    /// ```
    pub fn partition(&self, sample_count: u64) -> PlanningResult<Partition> {
        let min = self.sizes.smallest();
        let units = sample_count.div_ceil(min as u64).max(1);
        let units = usize::try_from(units)
            .map_err(|_| PlanningError::invalid("sample count too large to partition"))?;

        let mut windows = self.merge_pass(units)?;

        // Largest first, then keep the smallest block out of the tail
        windows.sort_unstable_by_key(|&w| Reverse(w));
        let len = windows.len();
        if len >= 2 {
            windows.swap(len - 2, len - 1);
        }

        let partition = Partition {
            windows,
            requested: sample_count,
        };
        self.check(&partition, units)?;

        log_debug!(
            "Partitioned {} samples into {:?} (excess {})",
            sample_count, partition.windows, partition.excess()
        );

        Ok(partition)
    }

    /// Fuse `units` minimum windows into the fewest admissible blocks
    ///
    /// Windows are pushed one at a time and the top two fuse while they are
    /// equal and below the maximum, like carries in a binary counter. The
    /// stack stays strictly descending below its run of maximum windows.
    fn merge_pass(&self, units: usize) -> PlanningResult<Vec<u32>> {
        let min = self.sizes.smallest();
        let max = self.sizes.largest();
        let per_max = (max / min).max(1) as usize;

        // One slot per maximum window plus at most one per smaller rung
        let mut stack = Vec::new();
        stack
            .try_reserve_exact(units / per_max + self.sizes.len() + 1)
            .map_err(|_| PlanningError::invalid("sample count too large to partition"))?;

        // Each unit is pushed once and merged at most once
        let step_cap = units.saturating_mul(2).saturating_add(1);
        let mut steps = 0usize;

        for _ in 0..units {
            steps += 1;
            stack.push(min);

            while let [.., below, top] = stack[..] {
                if below != top || top >= max {
                    break;
                }
                steps += 1;
                if steps > step_cap {
                    log_error!("Merge pass exceeded {} steps", step_cap);
                    return Err(PlanningError::InternalInvariantViolation {
                        reason: "merge pass did not settle",
                    });
                }
                stack.pop();
                if let Some(last) = stack.last_mut() {
                    *last = top * 2;
                }
            }
        }

        Ok(stack)
    }

    /// Bounding and minimality check on a finished partition
    fn check(&self, partition: &Partition, units: usize) -> PlanningResult<()> {
        let min = self.sizes.smallest() as u64;
        let max = self.sizes.largest();
        let total = partition.total();

        let violation = if partition.windows.iter().any(|&w| !self.sizes.contains(w)) {
            Some("window outside admissible sizes")
        } else if total != units as u64 * min {
            Some("windows do not sum to unit count")
        } else if total < partition.requested {
            Some("partition does not bound the request")
        } else if total - partition.requested >= min && partition.requested > 0 {
            Some("partition is not minimal")
        } else if self.has_repeated_below_max(&partition.windows, max) {
            Some("unmerged windows remain")
        } else {
            None
        };

        match violation {
            Some(reason) => {
                log_error!(
                    "Partition of {} samples failed check: {} ({:?})",
                    partition.requested, reason, partition.windows
                );
                Err(PlanningError::InternalInvariantViolation { reason })
            }
            None => Ok(()),
        }
    }

    fn has_repeated_below_max(&self, windows: &[u32], max: u32) -> bool {
        self.sizes
            .iter()
            .filter(|&size| size < max)
            .any(|size| windows.iter().filter(|&&w| w == size).count() > 1)
    }
}
