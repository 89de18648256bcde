//! Circular-Buffer Collision Timing
//!
//! ## Overview
//!
//! The board records into a ring of `capacity` samples while a serial sender
//! drains the same ring. The link is slower than the microphone, so the
//! record pointer eventually laps the send pointer and starts overwriting
//! samples that were never sent. This module computes how long recording can
//! run before that happens, which bounds the length of one segment.
//!
//! ## Model
//!
//! Time advances in recorded samples. After `t` steps:
//!
//! ```text
//! record = (record_start + t)               mod capacity
//! send   = (send_start + ⌊t · q / p⌋)        mod capacity
//! ```
//!
//! where `q / p` is `send_rate / sample_rate` reduced by its gcd
//! (22050 Hz against 14400 samples/s gives `32 / 49`). The reduction keeps the
//! per-step arithmetic small without changing the ratio. The search reports
//! the first `t ≥ 0` where the two positions are equal; `t = 0` is compared
//! so identical starting pointers return immediately.
//!
//! ## Termination
//!
//! Every `p` steps the record pointer gains `p - q` positions on the send
//! pointer, so their relative phase modulo `capacity` repeats with period
//!
//! ```text
//! P = p · capacity / gcd(capacity, |p - q|)
//! ```
//!
//! Scanning `t ∈ [0, P)` therefore either finds the collision or proves there
//! is none ([`PlanningError::NoCollision`]). When `q < p` every residue is
//! reached, and the scan ends within about `capacity · p / (p - q) + p` steps.
//! `P` can still be huge for unlucky rate pairs, so the solver also carries a
//! step limit ([`PlanningError::StepLimitExceeded`]). The limit counts steps
//! after the start, so `t ∈ [0, min(P, limit + 1))` is scanned.

use crate::{
    constants::solver::DEFAULT_SCAN_STEP_LIMIT,
    errors::{PlanningError, PlanningResult},
    rate::{gcd, Rate},
};

/// Ring geometry and pointer rates for one collision search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircularBufferConfig {
    /// Total ring size in samples
    pub capacity: u32,
    /// Equal sub-buffers the ring is split into (reporting only)
    pub buffer_count: u32,
    /// Record pointer start, in `[0, capacity)`
    pub record_start: u32,
    /// Send pointer start, in `[0, capacity)`
    pub send_start: u32,
    /// Capture rate driving the record pointer
    pub sample_rate: Rate,
    /// Transmission rate driving the send pointer
    pub send_rate: Rate,
}

impl CircularBufferConfig {
    /// Single-buffer ring with the given pointers and rates
    pub fn new(
        capacity: u32,
        record_start: u32,
        send_start: u32,
        sample_rate: Rate,
        send_rate: Rate,
    ) -> PlanningResult<Self> {
        let config = Self {
            capacity,
            buffer_count: 1,
            record_start,
            send_start,
            sample_rate,
            send_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Split the ring into `buffer_count` equal sub-buffers
    pub fn with_buffer_count(mut self, buffer_count: u32) -> PlanningResult<Self> {
        self.buffer_count = buffer_count;
        self.validate()?;
        Ok(self)
    }

    /// Check every precondition of the search
    pub fn validate(&self) -> PlanningResult<()> {
        if self.capacity == 0 {
            return Err(PlanningError::invalid("capacity must be positive"));
        }
        if self.buffer_count == 0 {
            return Err(PlanningError::invalid("buffer count must be positive"));
        }
        if self.capacity % self.buffer_count != 0 {
            return Err(PlanningError::invalid("capacity must divide evenly into buffers"));
        }
        if self.record_start >= self.capacity {
            return Err(PlanningError::invalid("record start outside buffer"));
        }
        if self.send_start >= self.capacity {
            return Err(PlanningError::invalid("send start outside buffer"));
        }
        if !self.sample_rate.is_valid() || !self.send_rate.is_valid() {
            return Err(PlanningError::invalid("rates must be positive"));
        }
        Ok(())
    }

    /// Samples per sub-buffer
    pub fn sub_buffer_len(&self) -> u32 {
        self.capacity / self.buffer_count.max(1)
    }

    /// Which sub-buffer holds ring position `position`
    pub fn sub_buffer_of(&self, position: u32) -> u32 {
        (position % self.capacity.max(1)) / self.sub_buffer_len().max(1)
    }
}

/// Where and when the record pointer catches the send pointer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionResult {
    /// Recording time until the collision
    pub elapsed_seconds: f64,
    /// Samples transmitted since the send pointer started
    pub samples_sent: u64,
    /// Samples recorded since the record pointer started
    pub samples_recorded: u64,
    /// Ring position where the pointers meet
    pub collision_index: u32,
    /// Sub-buffer containing the collision
    pub sub_buffer: u32,
}

/// Scans for the first record/send pointer collision
#[derive(Debug, Clone, Copy)]
pub struct CollisionTimeSolver {
    step_limit: u64,
}

impl Default for CollisionTimeSolver {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_SCAN_STEP_LIMIT,
        }
    }
}

impl CollisionTimeSolver {
    /// Solver that gives up after `step_limit` steps
    ///
    /// The starting positions are always compared, so a limit of zero still
    /// reports a collision at step zero.
    pub fn with_step_limit(step_limit: u64) -> Self {
        Self { step_limit }
    }

    /// Configured step limit
    pub fn step_limit(&self) -> u64 {
        self.step_limit
    }

    /// Length of the pointers' relative-phase period in steps
    ///
    /// No search needs more steps than this. Saturates at `u64::MAX`.
    pub fn phase_period(config: &CircularBufferConfig) -> PlanningResult<u64> {
        config.validate()?;
        let (advance, per) = config.send_rate.relative_to(&config.sample_rate)?;
        Ok(period_of(config.capacity, advance, per))
    }

    /// Find the first step at which the pointers coincide
    ///
    /// ```rust
    /// use bivo_planner::{CircularBufferConfig, CollisionTimeSolver, Rate};
    ///
    /// let config = CircularBufferConfig::new(
    ///     38_250,
    ///     7_650,
    ///     0,
    ///     Rate::hz(22_050)?,
    ///     Rate::from_baud(115_200, 8)?,
    /// )?;
    /// let result = CollisionTimeSolver::default().solve(&config)?;
    /// assert_eq!(result.samples_recorded, 88_198);
    /// assert!((result.elapsed_seconds - 4.0).abs() < 0.001);
    /// # Ok::<(), bivo_planner::PlanningError>(())
    /// ```
    pub fn solve(&self, config: &CircularBufferConfig) -> PlanningResult<CollisionResult> {
        config.validate()?;

        let (advance, per) = config.send_rate.relative_to(&config.sample_rate)?;
        let period = period_of(config.capacity, advance, per);
        // Steps 0..=step_limit, never past the phase period
        let scan_len = period.min(self.step_limit.saturating_add(1));

        let capacity = config.capacity as u64;
        let mut record_pos = config.record_start as u64;
        let mut send_pos = config.send_start as u64;

        // carry holds (step · advance) mod per
        let mut carry: u128 = 0;
        let mut sent: u64 = 0;

        let mut step = 0u64;
        while step < scan_len {
            if record_pos == send_pos {
                let result = CollisionResult {
                    elapsed_seconds: config.sample_rate.seconds_for(step),
                    samples_sent: sent,
                    samples_recorded: step,
                    collision_index: record_pos as u32,
                    sub_buffer: config.sub_buffer_of(record_pos as u32),
                };
                log_debug!(
                    "Collision after {} samples ({} s) at index {}",
                    step, result.elapsed_seconds, record_pos
                );
                return Ok(result);
            }

            record_pos += 1;
            if record_pos == capacity {
                record_pos = 0;
            }

            carry += advance as u128;
            let moved = carry / per as u128;
            carry %= per as u128;

            sent = sent.saturating_add(u64::try_from(moved).unwrap_or(u64::MAX));
            send_pos = ((send_pos as u128 + moved % capacity as u128) % capacity as u128) as u64;

            step += 1;
        }

        if scan_len == period {
            Err(PlanningError::NoCollision { period })
        } else {
            log_warn!(
                "Collision scan stopped at {} steps, phase period is {}",
                self.step_limit, period
            );
            Err(PlanningError::StepLimitExceeded {
                limit: self.step_limit,
            })
        }
    }
}

fn period_of(capacity: u32, advance: u64, per: u64) -> u64 {
    let drift = advance.abs_diff(per);
    let laps = capacity as u64 / gcd(capacity as u64, drift);
    u64::try_from(per as u128 * laps as u128).unwrap_or(u64::MAX)
}
