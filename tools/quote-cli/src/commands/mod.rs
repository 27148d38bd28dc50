//! CLI command implementations.

pub mod cart;
pub mod estimate;
pub mod rates;
pub mod service;

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use paint_quote::session::FlowKind;

pub use service::ServiceCommand;

/// Arguments for the rates command.
#[derive(Args)]
pub struct RatesArgs {
    /// Print the full configuration as TOML.
    #[arg(long)]
    pub toml: bool,
}

/// Arguments for the estimate command.
#[derive(Args)]
pub struct EstimateArgs {
    #[command(subcommand)]
    pub service: ServiceCommand,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Session the cart belongs to.
    #[arg(short, long, default_value = "local", global = true)]
    pub session: String,

    /// Booking flow; decides how long the cart is kept.
    #[arg(short, long, value_enum, default_value_t = FlowArg::Booking, global = true)]
    pub flow: FlowArg,

    #[command(subcommand)]
    pub action: CartAction,
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show items, totals and checkout status
    Show,

    /// Price a service and add it to the cart
    #[command(subcommand)]
    Add(ServiceCommand),

    /// Remove a line item
    Remove {
        /// Line item id, as shown by `cart show`.
        id: String,
    },

    /// Remove every item
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Submit the cart as a quote request
    Checkout {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,

        /// Write the request to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowArg {
    Booking,
    Single,
}

impl From<FlowArg> for FlowKind {
    fn from(flow: FlowArg) -> Self {
        match flow {
            FlowArg::Booking => FlowKind::Booking,
            FlowArg::Single => FlowKind::SingleService,
        }
    }
}
