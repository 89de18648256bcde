//! Constants for BiVo Buffer Planning
//!
//! Every numeric value the planners rely on is defined here with its unit
//! and where it comes from. Nothing in here is read implicitly by the
//! solvers: the constants only seed defaults for [`crate::DeviceProfile`],
//! [`crate::WindowSizes`] and [`crate::CollisionTimeSolver`].
//!
//! ## Organization
//!
//! - **Windows**: FFT window lengths and the frequency-resolution floor
//! - **Device**: capture and serial link characteristics of the board
//! - **Solver**: scan limits for the collision search

/// FFT window lengths accepted by the analysis stage.
pub mod windows;

/// Capture and transmission characteristics of the BiVo board.
pub mod device;

/// Collision search limits and default sweep ranges.
pub mod solver;

pub use windows::{
    FFT_BASE_LENGTH, MIN_WINDOW_EXPONENT, MAX_WINDOW_EXPONENT,
    MIN_WINDOW_SAMPLES, MAX_WINDOW_SAMPLES, DEFAULT_WINDOW_LADDER,
};

pub use device::{
    DEFAULT_SAMPLE_RATE_HZ, DEFAULT_BAUD_RATE, DEFAULT_BITS_PER_SAMPLE,
    DEFAULT_SEGMENT_SECONDS,
};

pub use solver::DEFAULT_SCAN_STEP_LIMIT;
