use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Visual DeFi workflow builder: validate, preview, and simulate
/// Solana swap workflows, or serve the canvas API.
#[derive(Parser)]
#[command(name = "defi-canvas", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Output the JSON schema for saved workflows
    Schema,

    /// Validate a workflow JSON file
    Validate {
        /// Path to the workflow JSON file
        file: PathBuf,
    },

    /// Print the step-by-step execution preview of a workflow
    Preview {
        /// Path to the workflow JSON file
        file: PathBuf,
    },

    /// List the node library and each action's parameters
    ListNodes,

    /// Output an example workflow JSON to stdout
    Example,

    /// Quote a swap against the simulated market
    Quote {
        /// Input token symbol or mint
        input: String,

        /// Output token symbol or mint
        output: String,

        /// Amount of the input token, in whole tokens
        amount: f64,

        /// Slippage tolerance in basis points
        #[arg(long, default_value = "50")]
        slippage_bps: u16,

        /// Random seed for price noise
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Simulate the first swap of a workflow end to end
    Simulate {
        /// Path to the workflow JSON file
        file: PathBuf,

        /// Random seed for price noise and execution
        #[arg(long)]
        seed: Option<u64>,

        /// Approve the confirmation without prompting
        #[arg(long, short = 'y')]
        yes: bool,

        /// Override the simulated failure rate (0.0 to 1.0)
        #[arg(long)]
        failure_rate: Option<f64>,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value = "5000")]
        port: u16,

        /// Directory for the workflow database (default: platform data dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Keep workflows in memory only
        #[arg(long)]
        in_memory: bool,
    },
}
