use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;
use variable_injector::{cli::Cli, process_all, Config, ResourceList};

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the function config: --config wins over the ResourceList functionConfig
fn load_config(args: &Cli, list: &ResourceList) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None if list.is_stream() => bail!(
            "Input is a plain YAML stream without functionConfig; pass the configuration with --config"
        ),
        None => Config::from_value(list.function_config.clone())
            .context("Failed to load functionConfig")?,
    };

    if let Some(prefix) = &args.prefix {
        config.prefix = Some(prefix.clone());
        config.validate()?;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read input from stdin")?;

    let mut list = ResourceList::parse(&input)?;
    let config = load_config(&args, &list)?;
    tracing::debug!(
        items = list.items.len(),
        stream = list.is_stream(),
        replacements = config.replacements.len(),
        prefix = config.prefix().unwrap_or(""),
        "processing resources"
    );

    // Nothing reaches stdout unless every item succeeded
    let items = process_all(std::mem::take(&mut list.items), &config)?;
    let output = list.with_items(items).render(args.format)?;

    io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("Failed to write output to stdout")?;

    Ok(())
}
