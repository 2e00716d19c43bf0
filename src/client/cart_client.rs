use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::cart::{Cart, CartId};

#[derive(Error, Debug)]
pub enum CartClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Cart service responded with status {status}")]
    Status { status: u16 },
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Cart service url cannot carry a path: {url}")]
    InvalidBaseUrl { url: String },
}

/// Access to the remote cart service.
#[async_trait]
pub trait CartClient: Send + Sync {
    async fn fetch_cart(&self, cart_id: &CartId) -> Result<Cart, CartClientError>;
    /// Turns the cart into an order and returns the ordered items.
    async fn submit_order(&self, cart_id: &CartId, order_id: &str) -> Result<Cart, CartClientError>;
}

/// HTTP implementation of CartClient
pub struct HttpCartClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCartClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, CartClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CartClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(path);
        url.query_pairs_mut().extend_pairs(query.iter());
        Ok(url)
    }

    async fn read_cart(response: reqwest::Response) -> Result<Cart, CartClientError> {
        let status = response.status();
        if !status.is_success() {
            warn!("Cart service returned {}", status);
            return Err(CartClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Cart service body: {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CartClient for HttpCartClient {
    async fn fetch_cart(&self, cart_id: &CartId) -> Result<Cart, CartClientError> {
        let url = self.endpoint("cart", &[("cartId", cart_id.as_str())])?;
        info!("Fetching cart {} from {}", cart_id, url);

        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let cart = Self::read_cart(response).await?;
        info!("Fetched cart {} with {} items", cart_id, cart.len());
        Ok(cart)
    }

    async fn submit_order(&self, cart_id: &CartId, order_id: &str) -> Result<Cart, CartClientError> {
        let url = self.endpoint(
            "submitorder",
            &[("cartId", cart_id.as_str()), ("orderId", order_id)],
        )?;
        info!("Submitting order {} for cart {}", order_id, cart_id);

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        Self::read_cart(response).await
    }
}
