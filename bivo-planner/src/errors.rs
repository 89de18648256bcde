//! Error Types for Buffer Planning
//!
//! ## Design Philosophy
//!
//! Planning runs offline, but the crate also builds for the device itself, so
//! errors follow the same rules as the rest of the embedded code:
//!
//! 1. **No Heap Allocation**: payloads are `&'static str` reasons and integers.
//! 2. **Copy Semantics**: errors are small and `Copy`.
//! 3. **No Partial Results**: a call either returns a complete, checked value
//!    or one of these errors.
//!
//! ## Error Categories
//!
//! ### Caller Mistakes
//! - `InvalidArgument`: a precondition failed (zero capacity, zero rate,
//!   offset outside the ring, capacity not divisible by the buffer count).
//!   Inputs are never clamped or wrapped.
//!
//! ### Algorithm Bugs
//! - `InternalInvariantViolation`: a computed partition failed its own sanity
//!   check. Must never happen for valid input.
//!
//! ### Search Outcomes
//! - `NoCollision`: the pointers' relative phase repeated without them ever
//!   meeting, so they never will.
//! - `StepLimitExceeded`: the caller's iteration cap fired first.
//!
//! ```rust
//! use bivo_planner::{CollisionTimeSolver, DeviceProfile, PlanningError};
//!
//! let profile = DeviceProfile::default();
//! let config = profile.buffer_config(38_250, 1, 7_650, 0).unwrap();
//!
//! match CollisionTimeSolver::default().solve(&config) {
//!     Ok(result) => {
//!         // Record at most result.elapsed_seconds per segment
//!     }
//!     Err(PlanningError::NoCollision { .. }) => {
//!         // Sender never falls behind - any segment length works
//!     }
//!     Err(PlanningError::StepLimitExceeded { .. }) => {
//!         // Raise the limit or try another configuration
//!     }
//!     Err(_) => {
//!         // Bad configuration
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Planning errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningError {
    /// A precondition on the inputs was violated
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the input
        reason: &'static str,
    },

    /// A computed result failed its consistency check
    #[error("Internal invariant violated: {reason}")]
    InternalInvariantViolation {
        /// Which invariant failed
        reason: &'static str,
    },

    /// The pointers never coincide
    #[error("No collision within phase period of {period} steps")]
    NoCollision {
        /// Length of the relative-phase period that was scanned
        period: u64,
    },

    /// The caller's scan cap was reached before the phase period
    #[error("Collision scan exceeded step limit {limit}")]
    StepLimitExceeded {
        /// The configured step limit
        limit: u64,
    },
}

impl PlanningError {
    /// Shorthand for [`PlanningError::InvalidArgument`]
    pub const fn invalid(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }

    /// True for errors caused by the caller's input rather than the search
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PlanningError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidArgument { reason } =>
                defmt::write!(fmt, "Invalid argument: {}", reason),
            Self::InternalInvariantViolation { reason } =>
                defmt::write!(fmt, "Invariant violated: {}", reason),
            Self::NoCollision { period } =>
                defmt::write!(fmt, "No collision within {} steps", period),
            Self::StepLimitExceeded { limit } =>
                defmt::write!(fmt, "Step limit {} exceeded", limit),
        }
    }
}
