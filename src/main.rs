mod config; // scenario file loading
mod report; // text summary of terminal poses

use anyhow::{Context, bail};
use argh::FromArgs;
use drift_montecarlo::{ExecutionStrategy, MonteCarloEngine};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_PATH, load_config};

/// Monte Carlo simulation of differential-drive odometry drift.
#[derive(Debug, FromArgs)]
struct Args {
    /// path to the TOML scenario file
    #[argh(option, short = 'c', default = "String::from(DEFAULT_CONFIG_PATH)")]
    config: String,

    /// run only the scenario with this name
    #[argh(option, short = 's')]
    scenario: Option<String>,

    /// base seed applied to every scenario, overriding the file
    #[argh(option)]
    seed: Option<u64>,

    /// run every scenario sequentially on the current thread
    #[argh(switch)]
    serial: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args: Args = argh::from_env();
    let app = load_config(&args.config).with_context(|| format!("loading {}", args.config))?;
    let execution = if args.serial { ExecutionStrategy::Serial } else { app.execution };

    let scenarios: Vec<_> = app
        .scenario
        .into_iter()
        .filter(|s| args.scenario.as_deref().is_none_or(|name| s.name == name))
        .collect();
    if scenarios.is_empty() {
        bail!("no scenario named {:?} in {}", args.scenario.unwrap_or_default(), args.config);
    }

    for mut scenario in scenarios {
        if let Some(seed) = args.seed {
            scenario.simulation.seed = Some(seed);
        }
        info!(scenario = %scenario.name, "Preparing scenario");

        let engine = match MonteCarloEngine::new(&scenario.simulation) {
            Ok(engine) => engine.with_execution(execution),
            Err(e) => {
                error!(scenario = %scenario.name, "Invalid scenario: {}", e);
                return Err(e).with_context(|| format!("scenario {}", scenario.name));
            }
        };

        let output = engine.run();
        println!("{}", report::Summary::new(&scenario.name, &output));
        info!(scenario = %scenario.name, seed = engine.base_seed(), "Scenario complete");
    }

    Ok(())
}
