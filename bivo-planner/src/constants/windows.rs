//! FFT Window Lengths
//!
//! The FFT routine on the board only accepts lengths of the form
//! `32 × 2^N` for `0 ≤ N ≤ 7`, i.e. 32 to 4096 samples.

// ===== FFT LENGTH FAMILY =====

/// Shortest FFT length supported by the analysis routine (`N = 0`).
pub const FFT_BASE_LENGTH: u32 = 32;

/// Largest exponent the FFT routine accepts.
///
/// `32 × 2^7 = 4096` samples, the biggest array the analysis stage
/// can hold in RAM alongside the capture buffers.
pub const FFT_MAX_EXPONENT: u32 = 7;

// ===== ADMISSIBLE WINDOWS =====

/// Smallest exponent used for analysis windows.
///
/// Windows shorter than `32 × 2^3 = 256` samples cannot resolve the low end
/// of the band: at 22050 Hz a 128 sample window has 172 Hz bins, while
/// 256 samples gets down to ~86 Hz, which is enough for the application.
pub const MIN_WINDOW_EXPONENT: u32 = 3;

/// Largest exponent used for analysis windows.
pub const MAX_WINDOW_EXPONENT: u32 = FFT_MAX_EXPONENT;

/// Smallest admissible window (256 samples).
pub const MIN_WINDOW_SAMPLES: u32 = FFT_BASE_LENGTH << MIN_WINDOW_EXPONENT;

/// Largest admissible window (4096 samples).
pub const MAX_WINDOW_SAMPLES: u32 = FFT_BASE_LENGTH << MAX_WINDOW_EXPONENT;

/// Upper bound on distinct window classes.
///
/// Window sizes are powers of two in `u32`, so at most 32 classes exist.
pub const MAX_WINDOW_CLASSES: usize = 32;

/// Rungs from the smallest to the largest admissible window, inclusive.
pub const DEFAULT_WINDOW_CLASSES: usize = (MAX_WINDOW_EXPONENT - MIN_WINDOW_EXPONENT + 1) as usize;

/// Admissible windows smallest first: 256, 512, 1024, 2048, 4096.
pub const DEFAULT_WINDOW_LADDER: [u32; DEFAULT_WINDOW_CLASSES] = default_ladder();

const fn default_ladder() -> [u32; DEFAULT_WINDOW_CLASSES] {
    let mut ladder = [0; DEFAULT_WINDOW_CLASSES];
    let mut rung = 0;
    while rung < DEFAULT_WINDOW_CLASSES {
        ladder[rung] = MIN_WINDOW_SAMPLES << rung;
        rung += 1;
    }
    ladder
}

const _: () = assert!(MIN_WINDOW_EXPONENT <= MAX_WINDOW_EXPONENT);
const _: () = assert!(DEFAULT_WINDOW_CLASSES <= MAX_WINDOW_CLASSES);
const _: () = assert!(DEFAULT_WINDOW_LADDER[DEFAULT_WINDOW_CLASSES - 1] == MAX_WINDOW_SAMPLES);
