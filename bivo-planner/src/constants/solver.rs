//! Collision Search Limits
//!
//! The collision scan always terminates on its own (the pointers' relative
//! phase is periodic), but pathological rate/capacity pairs can push the
//! period far out. Interactive callers cap it.

/// Default cap on collision scan steps.
///
/// 100 million steps is roughly 75 minutes of audio at 22.05 kHz, far beyond
/// any ring the board can hold, and finishes in well under a second.
pub const DEFAULT_SCAN_STEP_LIMIT: u64 = 100_000_000;

// ===== CONFIGURATION SWEEP =====

/// Smallest buffer count tried by the default sweep.
pub const SWEEP_MIN_BUFFER_COUNT: u32 = 1;

/// Largest buffer count tried by the default sweep.
pub const SWEEP_MAX_BUFFER_COUNT: u32 = 9;

/// First ring capacity of the default sweep (one second of audio).
pub const SWEEP_CAPACITY_START: u32 = 22_050;

/// Exclusive end of the default capacity sweep (2.5 seconds of audio).
pub const SWEEP_CAPACITY_END: u32 = 55_125;

/// Capacity increment of the default sweep (a quarter second of audio).
pub const SWEEP_CAPACITY_STEP: u32 = 5_512;
