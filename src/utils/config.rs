use std::env;
use std::path::PathBuf;
use url::Url;
use validator::Validate;

use crate::models::{
    catalog::{Catalog, CatalogError},
    widget::DEFAULT_WIDGET_CLASS,
};

pub const DEFAULT_CART_SERVICE_URL: &str = "https://rbm-boot-camp-15.wl.r.appspot.com";

#[derive(Debug, Clone, Validate)]
pub struct Config {
    #[validate(url(message = "CART_SERVICE_URL must be a valid url"))]
    pub cart_service_url: String,
    pub catalog_path: Option<PathBuf>,
    #[validate(length(min = 1, message = "CHAT_WIDGET_CLASS must not be empty"))]
    pub widget_class: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cart_service_url: DEFAULT_CART_SERVICE_URL.to_string(),
            catalog_path: None,
            widget_class: DEFAULT_WIDGET_CLASS.to_string(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            cart_service_url: env::var("CART_SERVICE_URL").unwrap_or(defaults.cart_service_url),
            catalog_path: env::var("CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            widget_class: env::var("CHAT_WIDGET_CLASS").unwrap_or(defaults.widget_class),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
        };

        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), anyhow::Error> {
        self.validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

        if self.is_production() && !self.cart_service_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "CART_SERVICE_URL must use https in production"
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn cart_service_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.cart_service_url)
            .map_err(|e| anyhow::anyhow!("CART_SERVICE_URL is not a valid url: {}", e))
    }

    /// The catalog named by CATALOG_PATH, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_json_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}
