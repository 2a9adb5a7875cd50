// Headless dam break: runs the default scene without a window and reports
// per-frame timings and particle statistics, then the total wall time.
//
// Usage: cargo run --example headless_dam_break [frames] [jitter]
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sph2d::config::{DEFAULT_FRAME_COUNT, STATS_LOG_PERIOD};
use sph2d::{DamController, LatticeSpec, SimulationError, SimulationParams, SphState};

fn main() -> Result<(), SimulationError> {
    let mut args = std::env::args().skip(1);
    let frames: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_FRAME_COUNT);
    let jitter: f32 = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(0.0);

    let params = SimulationParams::default();
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let particles = LatticeSpec::dam_break(&params)
        .with_jitter(jitter)
        .generate_with_rng(params.gravity, &mut rng);
    let mut state = SphState::new(params, particles)?;
    let mut dam = DamController::new(state.params().dam_break_frame);

    println!(
        "\n=== Dam break: {} particles, {} frames ===\n",
        state.particle_count(),
        frames
    );

    let start = Instant::now();
    for frame in 0..frames {
        if dam.advance() {
            println!("Breaking the dam at frame {frame}");
        }

        let tick_start = Instant::now();
        let report = state.step(dam.state())?;
        let tick_ms = tick_start.elapsed().as_secs_f64() * 1000.0;

        if frame % STATS_LOG_PERIOD == 0 {
            let stats = state.stats();
            println!(
                "[frame {:04}] tick={:.3}ms pairs={} skipped={} max_speed={:.4} mean_density={:.3} momentum=({:.4},{:.4})",
                frame,
                tick_ms,
                report.neighbor_pairs,
                report.skipped_pairs,
                stats.max_speed,
                stats.mean_density,
                stats.total_momentum.x,
                stats.total_momentum.y,
            );
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    let (min_x, max_x) = state
        .visual_positions()
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    println!("\nfluid spans x in [{min_x:.3}, {max_x:.3}]");
    println!("Execution time: {elapsed:.6}s");
    Ok(())
}
