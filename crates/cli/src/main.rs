// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `sqlforge`: load a schema, compile statement documents, print JSON.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use sqlforge_compiler::{Generator, GeneratorConfig, GeneratorOutput, TemplateDocument};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sqlforge")]
#[command(about = "Compile annotated SQL statement templates against a live schema")]
#[command(version)]
struct Cli {
    /// Path to JSON configuration file
    #[arg(short, long, default_value = "sqlforge.json")]
    config: PathBuf,

    /// Override the configured connection string
    #[arg(long)]
    dsn: Option<String>,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log verbosity: trace, debug, info, warn, error (RUST_LOG when unset)
    #[arg(long)]
    verbosity: Option<String>,

    /// Statement documents
    templates: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match &cli.verbosity {
        Some(level) => EnvFilter::try_new(level).context("invalid --verbosity")?,
        None => EnvFilter::from_default_env(),
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut config = load_config(&cli.config)?;
    if let Some(dsn) = cli.dsn {
        config.dsn = dsn;
    }
    let generator = Generator::new(config)?;

    let documents = cli
        .templates
        .iter()
        .map(|path| read_document(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(
        "Running driver '{}' over {} documents",
        generator.config().driver,
        documents.len()
    );
    let output = run(&generator, &documents).await?;

    let json = serde_json::to_string_pretty(&output)?;
    match cli.output {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn read_document(path: &Path) -> anyhow::Result<TemplateDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(TemplateDocument::new(name, text))
}

#[cfg(feature = "mysql")]
async fn run(
    generator: &Generator,
    documents: &[TemplateDocument],
) -> anyhow::Result<GeneratorOutput> {
    let mut conn = sqlforge_catalog::MySqlConnection::connect(&generator.config().dsn).await?;
    let output = generator.run(&mut conn, documents).await;
    let closed = conn.close().await;
    let output = output?;
    closed?;
    Ok(output)
}

#[cfg(not(feature = "mysql"))]
async fn run(
    _generator: &Generator,
    _documents: &[TemplateDocument],
) -> anyhow::Result<GeneratorOutput> {
    anyhow::bail!("built without a database driver, enable the `mysql` feature")
}
