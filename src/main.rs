use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use envrepo::config::{self, Limits};
use envrepo::resolver::{Resolver, default_specs, load_specs};
use envrepo::store;

#[derive(Parser)]
#[command(name = "envrepo")]
#[command(version, about = "Resolves download URLs for a development-environment catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve all environments and rewrite the catalog documents
    Update {
        /// Path of the catalog document to write
        #[arg(long, default_value = ".env.repository.json")]
        catalog: PathBuf,

        /// Default-config document whose version options get refreshed
        #[arg(long)]
        options: Option<PathBuf>,

        /// JSON file with environment specs, replacing the built-ins
        #[arg(long)]
        spec_file: Option<PathBuf>,

        /// Restrict the run to the named environments (repeatable)
        #[arg(long = "env")]
        envs: Vec<String>,

        /// JSON file overriding resolution bounds (caps, concurrency, timeouts)
        #[arg(long)]
        limits: Option<PathBuf>,

        /// How many versions to expose as options per environment
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// List the configured environments
    Envs {
        /// JSON file with environment specs, replacing the built-ins
        #[arg(long)]
        spec_file: Option<PathBuf>,
    },
}

fn init_tracing() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_path = config::log_path();
    let log_dir = log_path
        .parent()
        .context("log path has no parent directory")?;
    let log_file = log_path.file_name().context("log path has no file name")?;
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

fn specs_for(spec_file: Option<&PathBuf>) -> anyhow::Result<Vec<envrepo::resolver::EnvironmentSpec>> {
    Ok(match spec_file {
        Some(path) => load_specs(path)?,
        None => default_specs(),
    })
}

async fn run_update(
    catalog: PathBuf,
    options: Option<PathBuf>,
    spec_file: Option<PathBuf>,
    envs: Vec<String>,
    limits: Option<PathBuf>,
    top: usize,
) -> anyhow::Result<()> {
    let mut specs = specs_for(spec_file.as_ref())?;
    if !envs.is_empty() {
        specs.retain(|s| envs.contains(&s.name));
        anyhow::ensure!(!specs.is_empty(), "no configured environment matches the --env filter");
    }

    let limits = match limits {
        Some(path) => Limits::from_file(&path)?,
        None => Limits::default(),
    };
    let resolver = Resolver::with_defaults(limits);

    let repository = resolver.resolve_all(&specs).await;
    store::catalog::save_catalog(&catalog, &repository)?;

    if let Some(options_path) = options {
        store::options::update_options_file(&options_path, &repository, top)?;
    }

    info!("update complete: {} environments resolved", repository.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing()?;

    match cli.command {
        Command::Update {
            catalog,
            options,
            spec_file,
            envs,
            limits,
            top,
        } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_update(catalog, options, spec_file, envs, limits, top)),
        Command::Envs { spec_file } => {
            for spec in specs_for(spec_file.as_ref())? {
                println!("{}", spec.name);
            }
            Ok(())
        }
    }
}
