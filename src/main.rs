use anyhow::{bail, Context, Result};
use foldcast::config::AppConfig;
use foldcast::engine::RandomSeedSource;
use foldcast::pipeline;
use foldcast::types::UsageDataset;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut input_path = None;
    let mut output_path = None;
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().context("--config requires a path")?);
            }
            "--help" | "-h" => {
                println!("Usage: foldcast <input.json> [output.json] [--config foldcast.toml]");
                return Ok(());
            }
            _ if input_path.is_none() => input_path = Some(arg),
            _ if output_path.is_none() => output_path = Some(arg),
            _ => bail!("Unexpected argument: {arg}"),
        }
    }

    let Some(input_path) = input_path else {
        bail!("Usage: foldcast <input.json> [output.json] [--config foldcast.toml]");
    };

    let config = match config_path {
        Some(path) => AppConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => AppConfig::default(),
    };

    let contents = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read {input_path}"))?;
    let input: UsageDataset =
        serde_json::from_str(&contents).with_context(|| format!("Failed to parse {input_path}"))?;

    let mut seeds = RandomSeedSource::new();
    let output = pipeline::run(&input, &config.folds, &mut seeds)?;

    if let Some(reason) = &output.fold_resolution.reason {
        log::warn!("Fold count override rejected: {reason}");
    }
    log::info!(
        "Generated fold sets for {} target customer(s) with {} fold(s) each",
        output.target_customers.len(),
        output.fold_resolution.num_folds
    );

    let json = serde_json::to_string_pretty(&output.target_customers)?;
    match output_path {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("Failed to write {path}"))?;
        }
        None => println!("{json}"),
    }

    Ok(())
}
