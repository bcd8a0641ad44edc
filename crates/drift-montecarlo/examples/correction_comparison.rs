use drift_montecarlo::{MonteCarloEngine, OdometryStrategy, SimulationConfig};

fn main() {
    let config = SimulationConfig::circular_correction().with_runs(500).with_seed(7);

    let engine = match MonteCarloEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid simulation configuration: {}", e);
            return;
        }
    };

    println!("Running {} runs of {} steps (seed {})...", engine.num_runs(), engine.num_steps(), engine.base_seed());
    let output = engine.run();

    if let Some(stats) = output.truth().stats() {
        let (sx, sy) = stats.std_dev();
        println!("true:               mean ({:+.4}, {:+.4})  std ({:.4}, {:.4})", stats.mean_x, stats.mean_y, sx, sy);
    }

    for strategy in OdometryStrategy::ALL {
        let (Some(set), Some(error)) = (output.estimate(strategy), output.mean_position_error(strategy)) else {
            continue;
        };
        if let Some(stats) = set.stats() {
            let (sx, sy) = stats.std_dev();
            println!(
                "{:<19} mean ({:+.4}, {:+.4})  std ({:.4}, {:.4})  mean error {:.4} m",
                format!("{}:", strategy),
                stats.mean_x,
                stats.mean_y,
                sx,
                sy,
                error
            );
        }
    }
}
