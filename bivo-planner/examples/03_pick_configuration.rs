//! Example 03: Picking a ring configuration for a segment
//!
//! Sweeps buffer counts, capacities and record start offsets, then keeps the
//! configuration that just covers one segment. The chosen ring is then split
//! into FFT windows.
//!
//! Run with: `cargo run --release --example 03_pick_configuration`

use bivo_planner::{
    ConfigurationPicker, DeviceProfile, PlanningResult, SegmentPartitioner, SweepRange,
};

fn main() -> PlanningResult<()> {
    println!("=== BiVo Ring Configuration Picker ===\n");

    let profile = DeviceProfile::default();
    let picker = ConfigurationPicker::new(profile)?;
    let range = SweepRange::default();

    let candidates = picker.sweep(&range)?;
    println!("Evaluated {} configurations", candidates.len());

    match picker.pick(&range)? {
        Some(best) => {
            println!(
                "Best: {} samples in {} buffers, record from {} -> {:.4} s ({:+.4} s headroom)",
                best.capacity,
                best.buffer_count,
                best.record_start,
                best.collision.elapsed_seconds,
                best.headroom_seconds(profile.segment_seconds)
            );

            let windows = SegmentPartitioner::default().partition(best.capacity as u64)?;
            println!("Ring as FFT windows: {:?}", windows.windows());
        }
        None => println!(
            "No configuration records a full {} s segment",
            profile.segment_seconds
        ),
    }

    Ok(())
}
