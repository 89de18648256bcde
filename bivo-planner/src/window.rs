//! Admissible FFT Window Sizes
//!
//! ## Overview
//!
//! The analysis stage can only transform arrays whose length is one of a
//! fixed ladder of powers of two. [`WindowSizes`] holds the usable rungs of
//! that ladder, smallest first, each double the previous:
//!
//! ```text
//! 256 ─▶ 512 ─▶ 1024 ─▶ 2048 ─▶ 4096
//!  ▲                              ▲
//!  frequency-resolution floor     largest array the stage accepts
//! ```
//!
//! The bottom rung is set by frequency resolution: a window of `L` samples at
//! sample rate `fs` has bins `fs / L` apart, so short windows cannot see low
//! frequencies. [`WindowSizes::with_frequency_floor`] derives it from the
//! lowest frequency of interest.
//!
//! ## Memory Layout
//!
//! Sizes live in a `heapless::Vec` so the set can be built on the device
//! without an allocator. A ladder of `u32` powers of two has at most 32 rungs.

use heapless::Vec;

use crate::{
    constants::windows::{
        DEFAULT_WINDOW_LADDER, FFT_BASE_LENGTH, FFT_MAX_EXPONENT, MAX_WINDOW_CLASSES,
    },
    errors::{PlanningError, PlanningResult},
    rate::Rate,
};

/// Ordered set of window lengths, strictly doubling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSizes {
    sizes: Vec<u32, MAX_WINDOW_CLASSES>,
}

impl Default for WindowSizes {
    fn default() -> Self {
        Self::fft_default()
    }
}

impl WindowSizes {
    /// The board's analysis windows: 256, 512, 1024, 2048, 4096
    pub fn fft_default() -> Self {
        // The ladder's length against MAX_WINDOW_CLASSES is a compile-time assert
        match Vec::from_slice(&DEFAULT_WINDOW_LADDER) {
            Ok(sizes) => Self { sizes },
            Err(()) => unreachable!("default window ladder exceeds MAX_WINDOW_CLASSES"),
        }
    }

    /// Every power of two from `smallest` to `largest` inclusive
    pub fn new(smallest: u32, largest: u32) -> PlanningResult<Self> {
        if !smallest.is_power_of_two() || !largest.is_power_of_two() {
            return Err(PlanningError::invalid("window sizes must be powers of two"));
        }
        if smallest > largest {
            return Err(PlanningError::invalid("smallest window exceeds largest window"));
        }

        let mut sizes = Vec::new();
        let mut size = smallest;
        loop {
            sizes
                .push(size)
                .map_err(|_| PlanningError::invalid("too many window sizes"))?;
            if size == largest {
                break;
            }
            size <<= 1;
        }

        Ok(Self { sizes })
    }

    /// FFT windows fine enough to resolve `min_frequency_hz`
    ///
    /// Picks the shortest `32 × 2^N` length whose bin spacing
    /// (`sample_rate / length`) is at most `min_frequency_hz`, keeping the
    /// board's 4096 sample ceiling. At 22050 Hz a 100 Hz floor gives 256.
    pub fn with_frequency_floor(sample_rate: &Rate, min_frequency_hz: f32) -> PlanningResult<Self> {
        if !min_frequency_hz.is_finite() || min_frequency_hz <= 0.0 {
            return Err(PlanningError::invalid("frequency floor must be positive"));
        }

        let required = libm::ceil(sample_rate.as_f64() / min_frequency_hz as f64);
        let largest = FFT_BASE_LENGTH << FFT_MAX_EXPONENT;

        let mut smallest = FFT_BASE_LENGTH;
        while (smallest as f64) < required {
            if smallest == largest {
                return Err(PlanningError::invalid("frequency floor below largest window resolution"));
            }
            smallest <<= 1;
        }

        Self::new(smallest, largest)
    }

    /// Smallest admissible window
    pub fn smallest(&self) -> u32 {
        self.sizes[0]
    }

    /// Largest admissible window
    pub fn largest(&self) -> u32 {
        self.sizes[self.sizes.len() - 1]
    }

    /// Number of window classes
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Never true; a set always holds at least one size
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Check whether `size` is one of the admissible windows
    pub fn contains(&self, size: u32) -> bool {
        self.sizes.contains(&size)
    }

    /// Sizes from smallest to largest
    pub fn as_slice(&self) -> &[u32] {
        &self.sizes
    }

    /// Iterate sizes from smallest to largest
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.sizes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder() {
        let sizes = WindowSizes::default();
        assert_eq!(sizes.as_slice(), &[256, 512, 1024, 2048, 4096]);
        assert_eq!(sizes.smallest(), 256);
        assert_eq!(sizes.largest(), 4096);
        assert_eq!(sizes.len(), 5);
        assert!(!sizes.is_empty());
    }

    #[test]
    fn default_ladder_spans_admissible_bounds() {
        use crate::constants::{MAX_WINDOW_SAMPLES, MIN_WINDOW_SAMPLES};

        let built = WindowSizes::new(MIN_WINDOW_SAMPLES, MAX_WINDOW_SAMPLES).unwrap();
        assert_eq!(WindowSizes::fft_default(), built);
    }

    #[test]
    fn every_rung_doubles() {
        let sizes = WindowSizes::fft_default();
        for pair in sizes.as_slice().windows(2) {
            assert_eq!(pair[1], pair[0] * 2);
        }
    }

    #[test]
    fn custom_range() {
        let sizes = WindowSizes::new(64, 512).unwrap();
        assert_eq!(sizes.as_slice(), &[64, 128, 256, 512]);

        let single = WindowSizes::new(1024, 1024).unwrap();
        assert_eq!(single.smallest(), single.largest());

        let full = WindowSizes::new(1, 1 << 31).unwrap();
        assert_eq!(full.len(), 32);
    }

    #[test]
    fn invalid_ranges() {
        assert!(WindowSizes::new(300, 4096).is_err());
        assert!(WindowSizes::new(256, 3000).is_err());
        assert!(WindowSizes::new(4096, 256).is_err());
        assert!(WindowSizes::new(0, 256).is_err());
    }

    #[test]
    fn frequency_floor() {
        let fs = Rate::hz(22_050).unwrap();

        // 22050 / 256 = 86 Hz bins
        let sizes = WindowSizes::with_frequency_floor(&fs, 100.0).unwrap();
        assert_eq!(sizes, WindowSizes::fft_default());

        // 172 Hz is resolved by 128 sample windows
        let coarse = WindowSizes::with_frequency_floor(&fs, 173.0).unwrap();
        assert_eq!(coarse.smallest(), 128);

        // Nothing up to 4096 resolves 1 Hz
        assert!(WindowSizes::with_frequency_floor(&fs, 1.0).is_err());
        assert!(WindowSizes::with_frequency_floor(&fs, 0.0).is_err());
    }

    #[test]
    fn membership() {
        let sizes = WindowSizes::default();
        assert!(sizes.contains(1024));
        assert!(!sizes.contains(128));
        assert!(!sizes.contains(8192));
    }
}
