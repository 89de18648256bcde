//! Buffer-capacity planning for the BiVo audio capture device
//!
//! Design-time calculators that size the buffers an FFT stage consumes and
//! predict when a circular capture buffer overruns its serial sender.
//! Nothing here runs at capture time.
//!
//! Two independent engines:
//! - [`SegmentPartitioner`] carves a raw sample count into FFT-sized windows
//!   whose total minimally bounds the count.
//! - [`CollisionTimeSolver`] finds how long recording can run before the record
//!   pointer laps the (slower) send pointer.
//!
//! ```no_run
//! use bivo_planner::{CollisionTimeSolver, DeviceProfile, SegmentPartitioner};
//!
//! let profile = DeviceProfile::default();
//!
//! // Windows for one 4 second segment
//! let partitioner = SegmentPartitioner::default();
//! let windows = partitioner.partition(profile.segment_samples()?)?;
//!
//! // How long can we record into a 38250 sample ring before overwriting unsent data?
//! let config = profile.buffer_config(38_250, 1, 7_650, 0)?;
//! let result = CollisionTimeSolver::default().solve(&config)?;
//! # Ok::<(), bivo_planner::PlanningError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod collision;
pub mod constants;
pub mod errors;
pub mod partition;
pub mod picker;
pub mod profile;
pub mod rate;
pub mod window;

// Public API
pub use collision::{CircularBufferConfig, CollisionResult, CollisionTimeSolver};
pub use errors::{PlanningError, PlanningResult};
pub use partition::{Partition, SegmentPartitioner};
pub use picker::{BufferCandidate, ConfigurationPicker, SweepRange};
pub use profile::DeviceProfile;
pub use rate::Rate;
pub use window::WindowSizes;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
