//! Example 02: How long can the board record?
//!
//! The serial link drains the capture ring slower than the microphone fills
//! it. This computes when recording would start overwriting unsent samples.
//!
//! Run with: `cargo run --example 02_collision_time`

use bivo_planner::{CollisionTimeSolver, DeviceProfile, PlanningError, PlanningResult};

fn main() -> PlanningResult<()> {
    println!("=== BiVo Collision Timing ===\n");

    let profile = DeviceProfile::default();
    println!(
        "Capture {} Hz, link {} baud / {} bits = {:.0} samples/s ({:.2}x)\n",
        profile.sample_rate_hz,
        profile.baud_rate,
        profile.bits_per_sample,
        profile.send_rate()?.as_f64(),
        profile.send_ratio()?
    );

    let solver = CollisionTimeSolver::default();
    let capacity = 38_250;
    let buffers = 5;

    for slot in 1..buffers {
        let record_start = slot * capacity / buffers;
        let config = profile.buffer_config(capacity, buffers, record_start, 0)?;

        match solver.solve(&config) {
            Ok(result) => println!(
                "Rec start {:>5}: {:.4} s | recorded {} | sent {} | meets in buffer {}",
                record_start,
                result.elapsed_seconds,
                result.samples_recorded,
                result.samples_sent,
                result.sub_buffer
            ),
            Err(PlanningError::NoCollision { .. }) => {
                println!("Rec start {:>5}: sender never falls behind", record_start)
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
