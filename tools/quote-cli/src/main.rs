//! paintquote - Command line tool for painting estimates and quote carts.
//!
//! Commands:
//! - `paintquote rates` - Show the active rate table
//! - `paintquote estimate` - Price one service
//! - `paintquote cart` - Manage the persisted cart and check out

mod commands;
mod context;
mod output;
mod telemetry;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, EstimateArgs, RatesArgs};

/// paintquote - Price painting jobs and build quote requests
#[derive(Parser)]
#[command(name = "paintquote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active rates
    Rates(RatesArgs),

    /// Price a service without adding it to the cart
    Estimate(EstimateArgs),

    /// Manage the quote cart
    Cart(CartArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        ctx.config.log_level.as_str()
    };
    if let Err(e) = telemetry::init(level) {
        ctx.output.warn(&format!("{:#}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Rates(args) => commands::rates::run(args, &ctx),
        Commands::Estimate(args) => commands::estimate::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
