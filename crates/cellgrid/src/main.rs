use std::time::Duration;

use anyhow::{bail, Context, Result};
use cellgrid::{Encoding, RunOptions, Scenario};

fn parse<T: std::str::FromStr>(arg: Option<String>, name: &str, default: T) -> Result<T> {
    match arg {
        Some(value) => value
            .parse()
            .ok()
            .with_context(|| format!("invalid {}: '{}'", name, value)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scenario = args.next().unwrap_or_else(|| "replicator".to_string());
    let encoding = args.next().unwrap_or_else(|| "canonical".to_string());

    let scenario = match scenario.as_str() {
        "replicator" | "replicate" => Scenario::Replicator,
        "bootstrap" => Scenario::Bootstrap,
        other => bail!("Unknown scenario '{}'. Supported: replicator, bootstrap", other),
    };
    let encoding = match encoding.as_str() {
        "canonical" => Encoding::Canonical,
        "legacy" => Encoding::Legacy,
        other => bail!("Unknown encoding '{}'. Supported: canonical, legacy", other),
    };

    let defaults = RunOptions::default();
    let options = RunOptions {
        width: parse(args.next(), "width", defaults.width)?,
        height: parse(args.next(), "height", defaults.height)?,
        generations: match args.next() {
            Some(value) => Some(parse(Some(value), "generations", 0)?),
            None => defaults.generations,
        },
        delay: Duration::from_millis(parse(args.next(), "delay", 100)?),
    };

    log::info!("Running {:?} ({:?}) with {:?}", scenario, encoding, options);
    cellgrid::run(scenario, encoding, options)
}
