use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gpumarket", about = "GPU market price reconciliation and value analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a product to the catalog
    Add {
        /// Product name (primary key, e.g. "GeForce RTX 3080")
        name: String,
        /// JSON with optional rel_performance, launch_price, driver_support
        #[arg(default_value = "{}")]
        json: String,
    },
    /// Set a product's relative performance score
    SetPerformance {
        name: String,
        /// Percentage against the reference device (100 = baseline)
        score: f64,
    },
    /// Set a product's launch MSRP from raw scraped text
    SetLaunchPrice {
        name: String,
        /// Price text ("$699", "N/A", "Not Found")
        text: String,
    },
    /// Set a product's driver-support note
    SetDriverSupport {
        name: String,
        note: String,
    },
    /// Feed listing data for one product and channel
    Ingest {
        name: String,
        /// Channel: new or used
        channel: String,
        /// JSON array of listing snippets, or {"average_price": f}
        json: String,
    },
    /// Reconcile market prices from the configured listing source
    Reconcile {
        /// Limit the run to specific products
        #[arg(long)]
        names: Vec<String>,
        /// Null out new-market prices before the run
        #[arg(long)]
        reset_new: bool,
        /// Null out used-market prices before the run
        #[arg(long)]
        reset_used: bool,
    },
    /// Recompute performance tiers for every scored product
    Retier,
    /// Full value report for all priced, scored products
    Report,
    /// Single-product record
    Show {
        name: String,
    },
    /// Rank products by cost-per-frame at a resolution
    BestValue {
        /// Resolution: 1080p, 1440p or 4k
        resolution: String,
        /// Minimum estimated FPS to qualify
        #[arg(long)]
        min_fps: f64,
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Null out one price channel for every product
    Reset {
        /// Channel: new, used or launch
        channel: String,
    },
    /// Catalog statistics
    Stats,
}
