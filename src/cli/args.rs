use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;

#[derive(Parser)]
#[command(name = "storefront-cart")]
#[command(about = "Renders the mock storefront's cart, checkout link and chat search handoff")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the cart id comes from: a page location or the id itself.
#[derive(clap::Args, Clone, Debug)]
pub struct CartSource {
    /// Page url carrying a cartId query parameter
    #[arg(short, long, conflicts_with = "cart_id")]
    pub url: Option<String>,

    /// Cart id to use directly
    #[arg(long)]
    pub cart_id: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a cart and render its items and totals
    Cart {
        #[command(flatten)]
        source: CartSource,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
        /// Write the rendered cart to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build the checkout link for a page
    Link {
        /// Page url carrying a cartId query parameter
        url: String,
    },
    /// Hand a search query to the chat widget
    Search {
        /// Search query; prompted for when omitted
        query: Option<String>,
        /// Decode a widget context back into its query instead
        #[arg(long, conflicts_with = "query")]
        decode: Option<String>,
    },
    /// Submit a cart as an order and show the confirmation
    Checkout {
        #[command(flatten)]
        source: CartSource,
        /// Order id; generated when omitted
        #[arg(long)]
        order_id: Option<String>,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// List the catalog used for prices and images
    Catalog,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Html,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
