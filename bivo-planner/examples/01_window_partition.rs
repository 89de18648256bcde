//! Example 01: Splitting sample counts into FFT windows
//!
//! Shows how a raw sample count is covered by admissible FFT windows with the
//! least padding, and how the window ladder follows the frequency floor.
//!
//! Run with: `cargo run --example 01_window_partition`

use bivo_planner::{DeviceProfile, PlanningResult, SegmentPartitioner};

fn main() -> PlanningResult<()> {
    println!("=== BiVo Window Partitioning ===\n");

    let profile = DeviceProfile::default();
    let sizes = profile.window_sizes(100.0)?;
    println!(
        "Window ladder for a 100 Hz floor at {} Hz: {:?}\n",
        profile.sample_rate_hz,
        sizes.as_slice()
    );

    let partitioner = SegmentPartitioner::new(sizes);

    for samples in [0, 257, 1_280, 1_792, 8_193, 20_000] {
        let partition = partitioner.partition(samples)?;
        println!(
            "{:>6} samples -> {:?} (total {}, excess {})",
            samples,
            partition.windows(),
            partition.total(),
            partition.excess()
        );
    }

    let segment = profile.segment_samples()?;
    let partition = partitioner.partition(segment)?;
    println!(
        "\n{} s segment = {} samples -> {} windows, excess {}",
        profile.segment_seconds,
        segment,
        partition.len(),
        partition.excess()
    );

    Ok(())
}
