use std::sync::Arc;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{Input, theme::ColorfulTheme};

use tracing::{error, info, warn};

use crate::{
    cli::args::*,
    client::HttpCartClient,
    models::cart::CartId,
    render::html::{render_cart_page, render_checkout_link, render_confirmation, render_error_state, render_widget_script},
    services::{
        build_checkout_link, decode_context, CartService, CheckoutLink, SearchService,
        MISSING_CART_ID,
    },
    utils::{
        formatting::{format_cart_table, format_catalog_table, format_confirmation, format_totals},
        parse_page_url, page_cart_id, Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    cart_service: Arc<CartService>,
    search_service: Arc<SearchService>,
}

impl CliApp {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.cart_service_url()?;
        let catalog = config
            .load_catalog()
            .context("Failed to load catalog")?;
        info!("Using {} catalog entries, cart service at {}", catalog.len(), base_url);

        let cart_client = Arc::new(HttpCartClient::new(base_url));
        let cart_service = Arc::new(CartService::new(cart_client, Arc::new(catalog)));
        let search_service = Arc::new(SearchService::new(config.widget_class.clone()));

        Ok(Self {
            cart_service,
            search_service,
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::Cart { source, format, output } => self.handle_cart_command(source, format, output).await,
            Commands::Link { url } => self.handle_link_command(url),
            Commands::Search { query, decode } => self.handle_search_command(query, decode),
            Commands::Checkout { source, order_id, format } => self.handle_checkout_command(source, order_id, format).await,
            Commands::Catalog => self.handle_catalog_command(),
        }
    }

    async fn handle_cart_command(&self, source: CartSource, format: OutputFormat, output: Option<String>) -> Result<()> {
        let cart_id = resolve_cart_id(&source)?;
        let link = CheckoutLink::for_cart(Some(&cart_id));

        let rendered = match self.cart_service.load_cart(&cart_id).await {
            Ok(view) => match format {
                OutputFormat::Table => {
                    let mut out = format!("{} {}\n", CART, style(format!("Cart {}", cart_id)).bold().cyan());
                    let table = format_cart_table(&view);
                    if table.is_empty() {
                        out.push_str(&format!("{} Your cart is empty\n", INFO));
                    } else {
                        out.push_str(&table);
                        out.push('\n');
                    }
                    out.push_str(&format_totals(&view.totals));
                    out.push_str(&format!("Checkout: {}\n", style(&link.href).underlined()));
                    out
                }
                OutputFormat::Html => render_cart_page(&view, &link, None),
                OutputFormat::Json => serde_json::to_string_pretty(&view)?,
            },
            Err(e) => {
                println!("{} Failed to load cart: {}", CROSS, style(&e).red());
                error!("Failed to load cart {}: {}", cart_id, e);
                match format {
                    OutputFormat::Html => render_error_state(&e),
                    _ => return Ok(()),
                }
            }
        };

        self.emit(rendered, output).await
    }

    fn handle_link_command(&self, url: String) -> Result<()> {
        let page_url = parse_page_url(&url).context("Invalid page url")?;
        let link = build_checkout_link(&page_url);

        if page_cart_id(&page_url).is_none() {
            println!("{} Page has no cartId parameter", WARNING);
        }
        println!("{}", render_checkout_link(&link));
        Ok(())
    }

    fn handle_search_command(&self, query: Option<String>, decode: Option<String>) -> Result<()> {
        if let Some(context) = decode {
            match decode_context(&context) {
                Ok(text) => println!("{} {}", INFO, style(text).green()),
                Err(e) => {
                    println!("{} Failed to decode context: {}", CROSS, style(&e).red());
                    error!("Failed to decode context: {}", e);
                }
            }
            return Ok(());
        }

        let query = match query {
            Some(query) => query,
            None => Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Search")
                .allow_empty(true)
                .interact_text()?,
        };

        let init = self.search_service.dispatch(&query);
        println!("{}", render_widget_script(&init));
        Ok(())
    }

    async fn handle_checkout_command(&self, source: CartSource, order_id: Option<String>, format: OutputFormat) -> Result<()> {
        let cart_id = resolve_cart_id(&source)?;

        match self.cart_service.submit_order(&cart_id, order_id).await {
            Ok(confirmation) => {
                match format {
                    OutputFormat::Table => {
                        println!("{} Order placed successfully!", CHECKMARK);
                        println!("{}", format_confirmation(&confirmation));
                    }
                    OutputFormat::Html => println!("{}", render_confirmation(&confirmation)),
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&confirmation)?),
                }
                info!("Order {} placed for cart {}", confirmation.order_id, cart_id);
            }
            Err(e) => {
                println!("{} Failed to place order: {}", CROSS, style(&e).red());
                error!("Failed to place order for cart {}: {}", cart_id, e);
            }
        }

        Ok(())
    }

    fn handle_catalog_command(&self) -> Result<()> {
        let catalog = self.cart_service.catalog();
        if catalog.is_empty() {
            println!("{} Catalog is empty", WARNING);
        } else {
            println!("{} {}", INFO, style(format!("{} catalog items", catalog.len())).bold());
            println!("{}", format_catalog_table(catalog));
        }
        Ok(())
    }

    async fn emit(&self, rendered: String, output: Option<String>) -> Result<()> {
        match output {
            Some(path) => {
                tokio::fs::write(&path, rendered)
                    .await
                    .with_context(|| format!("Failed to write {}", path))?;
                println!("{} Wrote {}", CHECKMARK, style(&path).green());
                info!("Rendered cart written to {}", path);
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }
}

/// Cart id from `--cart-id`, or the `cartId` parameter of `--url`. A page
/// without one resolves to `null`, the id its checkout link carries.
pub fn resolve_cart_id(source: &CartSource) -> Result<CartId> {
    if let Some(id) = &source.cart_id {
        return Ok(CartId::new(id.as_str()));
    }

    let url = source
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Pass a page --url or a --cart-id"))?;
    let page_url = parse_page_url(url).context("Invalid page url")?;

    Ok(page_cart_id(&page_url).unwrap_or_else(|| {
        warn!("Page {} has no cartId parameter, using {}", url, MISSING_CART_ID);
        CartId::new(MISSING_CART_ID)
    }))
}
