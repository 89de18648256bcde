//! BiVo Board Characteristics
//!
//! Defaults for the EFM32GG12 build: PDM microphone capture and a USB
//! virtual COM port back to the host.

// ===== CAPTURE =====

/// Microphone sample rate in samples per second.
///
/// Half the CD rate: an ~11 kHz Nyquist band at half the RAM and link cost.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 22_050;

/// Length of one recorded audio segment in seconds.
///
/// Matches the firmware's standard-mode segment length.
pub const DEFAULT_SEGMENT_SECONDS: f32 = 4.0;

// ===== SERIAL LINK =====

/// Virtual COM port line rate in bits per second.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Bits on the wire per transmitted sample.
///
/// Samples are captured at 16 bits but sent as 8 bit PCM, so the link moves
/// `115200 / 8 = 14400` samples per second, roughly 0.65× the capture rate.
pub const DEFAULT_BITS_PER_SAMPLE: u32 = 8;
