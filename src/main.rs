use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use defi_canvas::config::{ServeConfig, ServeOptions};
use defi_canvas::{api, engine, example, list_nodes, run, schema, validate};

mod cli;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let level = match cli.command {
        cli::Command::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(level);

    match cli.command {
        cli::Command::Schema => schema::run(),
        cli::Command::Validate { file } => validate::run(&file),
        cli::Command::Preview { file } => engine::preview::run(&file),
        cli::Command::ListNodes => list_nodes::run(),
        cli::Command::Example => example::run(),
        cli::Command::Quote {
            input,
            output,
            amount,
            slippage_bps,
            seed,
        } => run::quote(&input, &output, amount, slippage_bps, seed),
        cli::Command::Simulate {
            file,
            seed,
            yes,
            failure_rate,
        } => run::simulate(&file, &run::SimulateOptions {
            seed,
            yes,
            failure_rate,
        }),
        cli::Command::Serve {
            host,
            port,
            data_dir,
            in_memory,
        } => {
            let config = ServeConfig::from_cli(&ServeOptions {
                host: &host,
                port,
                data_dir: data_dir.as_deref(),
                in_memory,
            })?;
            let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
            rt.block_on(api::serve(config))
        }
    }
}
