#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;

use anyhow::{bail, Context, Result};
use runner::{app::App, config::RunnerConfig, constants::LOOP_TIME, formatter::FrameFormatter};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

const USAGE: &str = "usage: runner [RUNS] [SEED] [--fast]";

struct Args {
    runs: u32,
    seed: Option<u64>,
    fast: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        runs: 1,
        seed: None,
        fast: false,
    };
    let mut positional = 0;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--fast" | "-f" => args.fast = true,
            "--help" | "-h" => bail!(USAGE),
            value => {
                match positional {
                    0 => args.runs = value.parse().with_context(|| format!("Invalid run count {value:?}"))?,
                    1 => args.seed = Some(value.parse().with_context(|| format!("Invalid seed {value:?}"))?),
                    _ => bail!("Unexpected argument {value:?}\n{USAGE}"),
                }
                positional += 1;
            }
        }
    }

    Ok(args)
}

fn init_tracing() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().event_format(FrameFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set tracing subscriber")
}

/// Runs the play loop headless, restarting after each game over.
pub fn main() -> Result<()> {
    init_tracing()?;
    let args = parse_args()?;

    let mut app = App::new(RunnerConfig::default(), args.seed, args.runs.max(1), !args.fast)?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    let high_score = app.game.high_score();
    info!(runs = app.finished_runs(), high_score = %high_score.text, "Finished");
    Ok(())
}
