//! Ring Configuration Picker
//!
//! ## Overview
//!
//! Because the link is slower than the microphone, the board sends while it
//! records and must stop recording before the record pointer laps the send
//! pointer. How long that takes depends on the ring capacity and on how far
//! ahead of the send pointer recording starts. The picker sweeps those
//! choices and keeps the configuration whose recordable time covers one
//! segment with the least to spare:
//!
//! ```text
//! recordable time  ──────────────────────────┐
//! segment length   ─────────────────────┐    │
//!                                       └────┘ headroom (smallest wins)
//! ```
//!
//! ## Search Space
//!
//! - buffer counts `n` in a range
//! - capacities `start, start + step, ...` below `end`, skipping any that
//!   don't split into `n` equal sub-buffers
//! - record starts at sub-buffer boundaries `k · capacity / n`, `1 ≤ k < n`
//!
//! The send pointer always starts at 0: only the offset between the two
//! pointers matters.

use alloc::vec::Vec;

use crate::{
    collision::{CollisionResult, CollisionTimeSolver},
    constants::solver::{
        SWEEP_CAPACITY_END, SWEEP_CAPACITY_START, SWEEP_CAPACITY_STEP,
        SWEEP_MAX_BUFFER_COUNT, SWEEP_MIN_BUFFER_COUNT,
    },
    errors::{PlanningError, PlanningResult},
    profile::DeviceProfile,
};

/// Grid of ring configurations to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRange {
    /// Fewest sub-buffers tried
    pub min_buffer_count: u32,
    /// Most sub-buffers tried (inclusive)
    pub max_buffer_count: u32,
    /// First capacity tried
    pub capacity_start: u32,
    /// Capacities stop below this value
    pub capacity_end: u32,
    /// Capacity increment
    pub capacity_step: u32,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            min_buffer_count: SWEEP_MIN_BUFFER_COUNT,
            max_buffer_count: SWEEP_MAX_BUFFER_COUNT,
            capacity_start: SWEEP_CAPACITY_START,
            capacity_end: SWEEP_CAPACITY_END,
            capacity_step: SWEEP_CAPACITY_STEP,
        }
    }
}

impl SweepRange {
    /// Check the range describes at least one configuration
    pub fn validate(&self) -> PlanningResult<()> {
        if self.min_buffer_count == 0 || self.min_buffer_count > self.max_buffer_count {
            return Err(PlanningError::invalid("buffer count range is empty"));
        }
        if self.capacity_step == 0 {
            return Err(PlanningError::invalid("capacity step must be positive"));
        }
        if self.capacity_start == 0 || self.capacity_start >= self.capacity_end {
            return Err(PlanningError::invalid("capacity range is empty"));
        }
        Ok(())
    }

    /// Capacities in sweep order
    pub fn capacities(&self) -> impl Iterator<Item = u32> {
        let end = self.capacity_end;
        let step = self.capacity_step.max(1) as usize;
        (self.capacity_start..end).step_by(step)
    }
}

/// One evaluated ring configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferCandidate {
    /// Ring size in samples
    pub capacity: u32,
    /// Number of equal sub-buffers
    pub buffer_count: u32,
    /// Record pointer start
    pub record_start: u32,
    /// Solver result for this configuration
    pub collision: CollisionResult,
}

impl BufferCandidate {
    /// Recordable time left over after one segment (negative if too short)
    pub fn headroom_seconds(&self, segment_seconds: f32) -> f64 {
        self.collision.elapsed_seconds - segment_seconds as f64
    }
}

/// Evaluates ring configurations for a device
#[derive(Debug, Clone)]
pub struct ConfigurationPicker {
    profile: DeviceProfile,
    solver: CollisionTimeSolver,
}

impl ConfigurationPicker {
    /// Picker for `profile` with the default solver
    pub fn new(profile: DeviceProfile) -> PlanningResult<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            solver: CollisionTimeSolver::default(),
        })
    }

    /// Use a solver with a different step limit
    pub fn with_solver(mut self, solver: CollisionTimeSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Device being planned for
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Solve a single configuration with the send pointer at 0
    pub fn evaluate(
        &self,
        capacity: u32,
        buffer_count: u32,
        record_start: u32,
    ) -> PlanningResult<BufferCandidate> {
        let config = self.profile.buffer_config(capacity, buffer_count, record_start, 0)?;
        let collision = self.solver.solve(&config)?;
        Ok(BufferCandidate {
            capacity,
            buffer_count,
            record_start,
            collision,
        })
    }

    /// Evaluate every configuration in `range`
    ///
    /// Configurations whose pointers never meet, or whose search hits the
    /// step limit, are left out.
    pub fn sweep(&self, range: &SweepRange) -> PlanningResult<Vec<BufferCandidate>> {
        range.validate()?;
        let mut candidates = Vec::new();

        for buffer_count in range.min_buffer_count..=range.max_buffer_count {
            for capacity in range.capacities() {
                if capacity % buffer_count != 0 {
                    log_warn!(
                        "Skipping capacity {}: does not split evenly into {} buffers",
                        capacity, buffer_count
                    );
                    continue;
                }

                for slot in 1..buffer_count {
                    let record_start = (slot as u64 * capacity as u64 / buffer_count as u64) as u32;
                    match self.evaluate(capacity, buffer_count, record_start) {
                        Ok(candidate) => candidates.push(candidate),
                        Err(PlanningError::NoCollision { .. }) => {}
                        Err(PlanningError::StepLimitExceeded { limit }) => {
                            log_warn!(
                                "Capacity {} / {} buffers / start {}: no answer within {} steps",
                                capacity, buffer_count, record_start, limit
                            );
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        Ok(candidates)
    }

    /// Configuration that fits one segment with the least headroom
    ///
    /// `None` when no configuration in `range` can hold a full segment.
    pub fn pick(&self, range: &SweepRange) -> PlanningResult<Option<BufferCandidate>> {
        let segment = self.profile.segment_seconds;
        let best = self
            .sweep(range)?
            .into_iter()
            .filter(|c| c.headroom_seconds(segment) >= 0.0)
            .min_by(|a, b| {
                a.headroom_seconds(segment)
                    .total_cmp(&b.headroom_seconds(segment))
            });

        if let Some(candidate) = &best {
            log_debug!(
                "Picked capacity {} / {} buffers / start {}: {} s recordable",
                candidate.capacity, candidate.buffer_count, candidate.record_start,
                candidate.collision.elapsed_seconds
            );
        }

        Ok(best)
    }
}
