//! `hal` renders a tagged JSON tree as a HAL+JSON or HAL+XML document.

mod config;

use anyhow::Context;
use clap::Parser;
use config::{CliConfig, OutputFormat};
use helios_hal::{HalSerializer, HalTransformer, JsonRenderer, Mapper, Node};
use std::io::Read;
use std::{fs, io};
use tracing::{debug, info};

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("helios_hal={level},hal={level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn read_input(config: &CliConfig) -> anyhow::Result<String> {
    match &config.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading input from stdin")?;
            Ok(buffer)
        }
    }
}

fn build_transformer(config: &CliConfig) -> anyhow::Result<HalTransformer> {
    let mappings = fs::read_to_string(&config.mappings)
        .with_context(|| format!("reading mappings {}", config.mappings.display()))?;
    let mapper = Mapper::from_json_str(&mappings).context("parsing mappings")?;
    debug!(mappings = mapper.len(), "loaded mappings");

    let mut transformer = HalTransformer::new(mapper);
    if let Some(url) = &config.self_url {
        transformer.set_self_url(url.as_str());
    }
    if let Some(url) = &config.first_url {
        transformer.set_first_url(url.as_str());
    }
    if let Some(url) = &config.prev_url {
        transformer.set_prev_url(url.as_str());
    }
    if let Some(url) = &config.next_url {
        transformer.set_next_url(url.as_str());
    }
    if let Some(url) = &config.last_url {
        transformer.set_last_url(url.as_str());
    }
    for (key, value) in config.meta_entries() {
        transformer.add_meta(key, value);
    }
    Ok(transformer)
}

fn render(config: &CliConfig, transformer: HalTransformer, node: Node) -> anyhow::Result<String> {
    let output = match config.format {
        OutputFormat::Json => {
            let renderer = if config.pretty {
                JsonRenderer::pretty()
            } else {
                JsonRenderer::new()
            };
            HalSerializer::new(transformer, renderer).serialize_node(node)?
        }
        #[cfg(feature = "xml")]
        OutputFormat::Xml => {
            HalSerializer::new(transformer, helios_hal::XmlRenderer).serialize_node(node)?
        }
        #[cfg(not(feature = "xml"))]
        OutputFormat::Xml => anyhow::bail!("XML output requires the `xml` feature"),
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(2);
    }

    let transformer = build_transformer(&config)?;
    let input = read_input(&config)?;
    let tree: serde_json::Value = serde_json::from_str(&input).context("parsing input tree")?;
    let node = Node::from_tagged_json(tree);

    info!(format = ?config.format, "rendering document");
    let output = render(&config, transformer, node)?;
    println!("{}", output);
    Ok(())
}
