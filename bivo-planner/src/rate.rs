//! Exact sample rates
//!
//! Rates are kept as reduced fractions of samples per second so that the
//! collision search can advance pointers in pure integer arithmetic. The
//! serial link's rate (`baud / bits_per_sample`) is not always an integer,
//! and a float ratio would drift over the hundreds of thousands of steps a
//! search can take.

use crate::errors::{PlanningError, PlanningResult};

/// Greatest common divisor (Euclid). `gcd(0, b) == b`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn gcd_wide(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// A positive rate in samples per second, stored as a reduced fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rate {
    numerator: u64,
    denominator: u64,
}

impl Rate {
    /// Create a rate of `numerator / denominator` samples per second
    pub fn new(numerator: u64, denominator: u64) -> PlanningResult<Self> {
        if numerator == 0 {
            return Err(PlanningError::invalid("rate must be positive"));
        }
        if denominator == 0 {
            return Err(PlanningError::invalid("rate denominator must be positive"));
        }

        let divisor = gcd(numerator, denominator);
        Ok(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    /// Whole samples per second
    pub fn hz(samples_per_second: u32) -> PlanningResult<Self> {
        Self::new(samples_per_second as u64, 1)
    }

    /// Sample throughput of a serial link
    ///
    /// `115200` baud at 8 bits per sample moves 14400 samples per second.
    pub fn from_baud(baud: u32, bits_per_sample: u32) -> PlanningResult<Self> {
        if bits_per_sample == 0 {
            return Err(PlanningError::invalid("bits per sample must be positive"));
        }
        Self::new(baud as u64, bits_per_sample as u64)
    }

    /// Numerator of the reduced fraction
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Denominator of the reduced fraction
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// True when both parts are non-zero
    ///
    /// Always holds for rates built through the constructors. Deserialized
    /// rates are checked with this before use.
    pub fn is_valid(&self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    /// Approximate samples per second
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// `self / base` as a reduced `(numerator, denominator)` pair
    ///
    /// For the collision search this is the send pointer's advance per
    /// recorded sample: `14400 / 22050` reduces to `(32, 49)`.
    pub fn relative_to(&self, base: &Rate) -> PlanningResult<(u64, u64)> {
        if !self.is_valid() || !base.is_valid() {
            return Err(PlanningError::invalid("rate must be positive"));
        }

        let numerator = self.numerator as u128 * base.denominator as u128;
        let denominator = self.denominator as u128 * base.numerator as u128;
        let divisor = gcd_wide(numerator, denominator);

        let numerator = u64::try_from(numerator / divisor)
            .map_err(|_| PlanningError::invalid("rate ratio too large"))?;
        let denominator = u64::try_from(denominator / divisor)
            .map_err(|_| PlanningError::invalid("rate ratio too large"))?;

        Ok((numerator, denominator))
    }

    /// Seconds taken to produce `samples` at this rate
    pub fn seconds_for(&self, samples: u64) -> f64 {
        samples as f64 * self.denominator as f64 / self.numerator as f64
    }

    /// Whole samples needed to cover `seconds`, rounded up
    pub fn samples_for(&self, seconds: f32) -> PlanningResult<u64> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(PlanningError::invalid("duration must be finite and non-negative"));
        }

        // ceil() is not in core, libm keeps this usable without std
        let samples = libm::ceil(seconds as f64 * self.as_f64());
        if samples > u64::MAX as f64 {
            return Err(PlanningError::invalid("duration too long"));
        }
        Ok(samples as u64)
    }
}
