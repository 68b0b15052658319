//! Step and serialization timings across board sizes

use std::time::Instant;

use lifeboard::{IntervalScheduler, LifeConfig, LifeResult, Simulation, StepStrategy};
use lifeboard::application::NullRenderer;
use rand::SeedableRng;
use rand::rngs::StdRng;

type HeadlessSimulation = Simulation<NullRenderer, IntervalScheduler>;

fn seeded(size: usize, strategy: StepStrategy) -> LifeResult<HeadlessSimulation> {
    let config = LifeConfig {
        rows: size,
        cols: size,
        wrap: true,
        strategy,
        ..LifeConfig::default()
    };
    let mut simulation = Simulation::new(&config, NullRenderer::default(), IntervalScheduler::new())?;
    simulation.randomize(0.3, &mut StdRng::seed_from_u64(size as u64))?;
    Ok(simulation)
}

/// Milliseconds per generation
fn benchmark_steps(size: usize, strategy: StepStrategy, iterations: u32) -> LifeResult<f64> {
    let mut simulation = seeded(size, strategy)?;

    let start = Instant::now();
    for _ in 0..iterations {
        simulation.advance();
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

/// Milliseconds for one export plus one import
fn benchmark_round_trip(size: usize) -> LifeResult<f64> {
    let mut simulation = seeded(size, StepStrategy::Serial)?;

    let start = Instant::now();
    let text = simulation.export_state();
    simulation.import_state(&text)?;
    Ok(start.elapsed().as_secs_f64() * 1000.0)
}

fn main() -> LifeResult<()> {
    println!("=== Game of Life Benchmark ===\n");

    let sizes = [50, 100, 250, 500, 1000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10} {:>12}",
        "Size", "Serial", "Parallel", "Speedup", "Export+Import");
    println!("{:-<62}", "");

    for size in sizes {
        let serial_ms = benchmark_steps(size, StepStrategy::Serial, iterations)?;
        let parallel_ms = benchmark_steps(size, StepStrategy::Parallel, iterations)?;
        let io_ms = benchmark_round_trip(size)?;

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>9.1}x {:>12.2}",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms.max(f64::EPSILON),
            io_ms
        );
    }

    Ok(())
}
