//! Product Cache - command-line client
//!
//! Fetches the product list through the client-side cache and prints it.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::{ClientConfig, Product, ProductClient};

/// Fetch products from the product API.
#[derive(Parser, Debug)]
#[command(name = "product_client", version, about)]
struct Cli {
    /// Base URL of the API (overrides PRODUCTS_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Bypass the client cache on the first fetch
    #[arg(long)]
    refresh: bool,

    /// Clear the client cache before fetching
    #[arg(long)]
    clear: bool,

    /// Number of fetches to perform; later ones are served from cache while fresh
    #[arg(long, default_value_t = 1)]
    repeat: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.url {
        config.api_url = url;
    }
    info!("Fetching products from {}", config.api_url);

    let client = ProductClient::new(&config)?;
    if cli.clear {
        client.clear_cache().await;
    }

    for round in 0..cli.repeat.max(1) {
        let force = cli.refresh && round == 0;
        match client.fetch_products(force).await {
            Ok(products) => print_products(&products),
            Err(e) => {
                // Failures are reported, never fatal; a later round may succeed
                error!("Failed to fetch products: {}", e);
            }
        }
    }

    let stats = client.stats().await;
    info!(
        "Client cache: hits={}, upstream_calls={}, forced={}, failures={}",
        stats.hits,
        stats.upstream_calls(),
        stats.forced_refreshes,
        stats.failures
    );
    Ok(())
}

fn print_products(products: &[Product]) {
    println!(
        "{:>4}  {:<24} {:>10} {:>6}  {:<12} {}",
        "ID", "NAME", "PRICE", "STOCK", "CATEGORY", "AVAILABLE"
    );
    for product in products {
        let category = product
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        let available = if product.in_stock() { "yes" } else { "sold out" };
        println!(
            "{:>4}  {:<24} {:>10.2} {:>6}  {:<12} {}",
            product.id, product.name, product.price, product.stock, category, available
        );
    }
}
