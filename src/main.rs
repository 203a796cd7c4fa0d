use clap::Parser;
use gpumarket::cli::commands::{Cli, Commands};
use gpumarket::domain::values::channel::Channel;
use gpumarket::domain::values::resolution::Resolution;
use gpumarket::GpuMarket;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("GPUMARKET_DB").unwrap_or_else(|_| "./gpumarket.db".into());

    let gm = match GpuMarket::new(&db_path) {
        Ok(gm) => gm,
        Err(e) => {
            eprintln!("Error initializing gpumarket: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(gm, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(gm: GpuMarket, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Add { name, json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let rel_performance = data["rel_performance"].as_f64();
            let launch_price = data["launch_price"].as_f64();
            let driver_support = data["driver_support"].as_str().map(String::from);

            let product = gm.add_product(name, rel_performance, launch_price, driver_support)?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
        Commands::SetPerformance { name, score } => {
            gm.set_performance(&name, score)?;
            println!("{}", serde_json::to_string_pretty(&gm.get_product(&name)?)?);
        }
        Commands::SetLaunchPrice { name, text } => {
            match gm.set_launch_price(&name, &text)? {
                Some(price) => println!("Launch price for '{name}' set to {price}"),
                None => println!("No price in '{text}'; stored value unchanged"),
            }
        }
        Commands::SetDriverSupport { name, note } => {
            gm.set_driver_support(&name, &note)?;
            println!("Driver support for '{name}' set");
        }
        Commands::Ingest {
            name,
            channel,
            json,
        } => {
            let channel: Channel = channel.parse().map_err(|e: String| e)?;
            let data: serde_json::Value = serde_json::from_str(&json)?;

            let stored = if let Some(items) = data.as_array() {
                let snippets: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect();
                gm.ingest_listings(&name, channel, &snippets)?
            } else if let Some(price) = data["average_price"].as_f64() {
                gm.ingest_aggregate(&name, channel, price)?
            } else {
                return Err("Expected a JSON array of snippets or {\"average_price\": ...}".into());
            };

            match stored {
                Some(price) => println!("{channel} price for '{name}' set to {price}"),
                None => println!("No valid {channel} data for '{name}'; stored value unchanged"),
            }
        }
        Commands::Reconcile {
            names,
            reset_new,
            reset_used,
        } => {
            if reset_new {
                let n = gm.reset_channel(Channel::New)?;
                eprintln!("Reset new-market prices on {n} products");
            }
            if reset_used {
                let n = gm.reset_channel(Channel::Used)?;
                eprintln!("Reset used-market prices on {n} products");
            }
            let names = if names.is_empty() { None } else { Some(names) };
            let report = gm.reconcile(names).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Retier => {
            let assignments = gm.retier()?;
            println!("{}", serde_json::to_string_pretty(&assignments)?);
        }
        Commands::Report => {
            let records = gm.report()?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Show { name } => {
            let record = gm.product_report(&name)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::BestValue {
            resolution,
            min_fps,
            limit,
        } => {
            let resolution: Resolution = resolution.parse().map_err(|e: String| e)?;
            let records = gm.best_value(resolution, min_fps, limit)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Reset { channel } => {
            let channel: Channel = channel.parse().map_err(|e: String| e)?;
            let n = gm.reset_channel(channel)?;
            println!("Reset {channel} prices on {n} products");
        }
        Commands::Stats => {
            let stats = gm.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
