use anyhow::Result;
use clap::Parser;
use storefront_cart::{
    cli::{Args, CliApp},
    utils::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let filter = if args.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "🛒 Storefront cart starting for {} environment",
        config.environment
    );
    tracing::debug!(
        "Config: cart service {}, catalog {}",
        config.cart_service_url,
        config
            .catalog_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string())
    );

    let app = CliApp::new(&config)?;
    app.run(args).await?;

    tracing::info!("🛒 Storefront cart stopped");
    Ok(())
}
