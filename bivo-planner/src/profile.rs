//! Device profile
//!
//! Capture and link characteristics that the planners need, passed in
//! explicitly instead of being baked into the solvers. Defaults describe the
//! BiVo EFM32GG12 board.

use crate::{
    collision::CircularBufferConfig,
    constants::device::{
        DEFAULT_BAUD_RATE, DEFAULT_BITS_PER_SAMPLE, DEFAULT_SAMPLE_RATE_HZ,
        DEFAULT_SEGMENT_SECONDS,
    },
    errors::{PlanningError, PlanningResult},
    rate::Rate,
    window::WindowSizes,
};

/// Capture and transmission characteristics of a recorder
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceProfile {
    /// Microphone sample rate in Hz
    pub sample_rate_hz: u32,
    /// Serial line rate in bits per second
    pub baud_rate: u32,
    /// Bits on the wire per transmitted sample
    pub bits_per_sample: u32,
    /// Length of one recorded segment in seconds
    pub segment_seconds: f32,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            baud_rate: DEFAULT_BAUD_RATE,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            segment_seconds: DEFAULT_SEGMENT_SECONDS,
        }
    }
}

impl DeviceProfile {
    /// Profile with custom rates and the default segment length
    pub fn new(sample_rate_hz: u32, baud_rate: u32, bits_per_sample: u32) -> Self {
        Self {
            sample_rate_hz,
            baud_rate,
            bits_per_sample,
            segment_seconds: DEFAULT_SEGMENT_SECONDS,
        }
    }

    /// Override the segment length
    pub fn with_segment_seconds(mut self, seconds: f32) -> Self {
        self.segment_seconds = seconds;
        self
    }

    /// Check every field is usable
    pub fn validate(&self) -> PlanningResult<()> {
        self.sample_rate()?;
        self.send_rate()?;
        if !self.segment_seconds.is_finite() || self.segment_seconds <= 0.0 {
            return Err(PlanningError::invalid("segment length must be positive"));
        }
        Ok(())
    }

    /// Capture rate
    pub fn sample_rate(&self) -> PlanningResult<Rate> {
        Rate::hz(self.sample_rate_hz)
    }

    /// Samples per second the link can move
    pub fn send_rate(&self) -> PlanningResult<Rate> {
        Rate::from_baud(self.baud_rate, self.bits_per_sample)
    }

    /// Link throughput as a fraction of the capture rate
    pub fn send_ratio(&self) -> PlanningResult<f64> {
        Ok(self.send_rate()?.as_f64() / self.sample_rate()?.as_f64())
    }

    /// Samples in one segment, rounded up
    pub fn segment_samples(&self) -> PlanningResult<u64> {
        self.validate()?;
        self.sample_rate()?.samples_for(self.segment_seconds)
    }

    /// FFT windows able to resolve `min_frequency_hz` at this sample rate
    pub fn window_sizes(&self, min_frequency_hz: f32) -> PlanningResult<WindowSizes> {
        WindowSizes::with_frequency_floor(&self.sample_rate()?, min_frequency_hz)
    }

    /// Ring configuration driven by this profile's rates
    pub fn buffer_config(
        &self,
        capacity: u32,
        buffer_count: u32,
        record_start: u32,
        send_start: u32,
    ) -> PlanningResult<CircularBufferConfig> {
        CircularBufferConfig::new(
            capacity,
            record_start,
            send_start,
            self.sample_rate()?,
            self.send_rate()?,
        )?
        .with_buffer_count(buffer_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_defaults() {
        let profile = DeviceProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.send_rate().unwrap(), Rate::hz(14_400).unwrap());
        assert_eq!(profile.segment_samples().unwrap(), 88_200);

        let ratio = profile.send_ratio().unwrap();
        assert!(ratio > 0.65 && ratio < 0.66);
    }

    #[test]
    fn custom_profile() {
        let profile = DeviceProfile::new(16_000, 921_600, 16).with_segment_seconds(2.5);
        assert_eq!(profile.segment_samples().unwrap(), 40_000);
        assert_eq!(profile.send_rate().unwrap().as_f64(), 57_600.0);
    }

    #[test]
    fn invalid_profiles() {
        assert!(DeviceProfile::new(0, 115_200, 8).validate().is_err());
        assert!(DeviceProfile::new(22_050, 0, 8).validate().is_err());
        assert!(DeviceProfile::new(22_050, 115_200, 0).validate().is_err());
        assert!(DeviceProfile::default()
            .with_segment_seconds(0.0)
            .segment_samples()
            .is_err());
    }

    #[test]
    fn buffer_config_uses_profile_rates() {
        let profile = DeviceProfile::default();
        let config = profile.buffer_config(38_250, 5, 7_650, 0).unwrap();
        assert_eq!(config.buffer_count, 5);
        assert_eq!(config.sample_rate, Rate::hz(22_050).unwrap());
        assert_eq!(config.send_rate, Rate::hz(14_400).unwrap());

        assert!(profile.buffer_config(38_250, 7, 0, 0).is_err());
    }

    #[test]
    fn window_sizes_follow_sample_rate() {
        let profile = DeviceProfile::default();
        assert_eq!(profile.window_sizes(86.2).unwrap().smallest(), 256);

        // Half the sample rate halves the window needed for the same floor
        let slow = DeviceProfile::new(11_025, 115_200, 8);
        assert_eq!(slow.window_sizes(86.2).unwrap().smallest(), 128);
    }
}
