use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    client::{CartClient, CartClientError},
    models::{
        cart::CartId,
        catalog::{Catalog, LookupMiss},
        order::{CartView, OrderConfirmation},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decode,
    LookupMiss,
}

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("Could not reach the cart service: {0}")]
    Network(CartClientError),

    #[error("Could not read the cart: {0}")]
    Decode(CartClientError),

    #[error("Item '{title}' is not in the catalog")]
    LookupMiss { title: String },
}

impl CartServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartServiceError::Network(_) => ErrorKind::Network,
            CartServiceError::Decode(_) => ErrorKind::Decode,
            CartServiceError::LookupMiss { .. } => ErrorKind::LookupMiss,
        }
    }
}

impl From<CartClientError> for CartServiceError {
    fn from(err: CartClientError) -> Self {
        match err {
            CartClientError::Decode(_) => CartServiceError::Decode(err),
            other => CartServiceError::Network(other),
        }
    }
}

impl From<LookupMiss> for CartServiceError {
    fn from(miss: LookupMiss) -> Self {
        CartServiceError::LookupMiss { title: miss.title }
    }
}

/// Fetches carts and turns them into render-ready views.
pub struct CartService {
    cart_client: Arc<dyn CartClient>,
    catalog: Arc<Catalog>,
}

impl CartService {
    pub fn new(cart_client: Arc<dyn CartClient>, catalog: Arc<Catalog>) -> Self {
        Self {
            cart_client,
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch a cart and build its view: rows in display order plus totals.
    pub async fn load_cart(&self, cart_id: &CartId) -> Result<CartView, CartServiceError> {
        info!("Loading cart: {}", cart_id);

        let cart = self.cart_client.fetch_cart(cart_id).await.map_err(|e| {
            error!("Failed to fetch cart {}: {}", cart_id, e);
            CartServiceError::from(e)
        })?;

        let view = CartView::build(&cart, &self.catalog).map_err(|miss| {
            error!("Cart {} has an unknown item: {}", cart_id, miss.title);
            CartServiceError::from(miss)
        })?;

        debug!(
            "Cart {}: {} rows, subtotal {}, total {}",
            cart_id,
            view.rows.len(),
            view.totals.subtotal,
            view.totals.total
        );
        Ok(view)
    }

    /// Submit the cart as an order. A fresh order id is generated when none is given.
    pub async fn submit_order(
        &self,
        cart_id: &CartId,
        order_id: Option<String>,
    ) -> Result<OrderConfirmation, CartServiceError> {
        let order_id = order_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        info!("Placing order {} for cart {}", order_id, cart_id);

        let ordered = self
            .cart_client
            .submit_order(cart_id, &order_id)
            .await
            .map_err(|e| {
                error!("Failed to submit order {}: {}", order_id, e);
                CartServiceError::from(e)
            })?;

        let view = CartView::build(&ordered, &self.catalog)?;

        info!("Order {} placed, total ${}", order_id, view.totals.total);
        Ok(OrderConfirmation {
            order_id,
            cart_id: cart_id.clone(),
            view,
            placed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cart::{Cart, CartItem};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mock client for testing
    struct MockCartClient {
        carts: Mutex<HashMap<CartId, Cart>>,
        orders: Mutex<Vec<String>>,
        fail_status: Option<u16>,
        raw_body: Option<String>,
    }

    impl MockCartClient {
        fn new() -> Self {
            Self {
                carts: Mutex::new(HashMap::new()),
                orders: Mutex::new(Vec::new()),
                fail_status: None,
                raw_body: None,
            }
        }

        fn with_cart(self, id: &str, cart: Cart) -> Self {
            self.carts.lock().unwrap().insert(CartId::new(id), cart);
            self
        }

        fn respond(&self, cart_id: &CartId) -> Result<Cart, CartClientError> {
            if let Some(status) = self.fail_status {
                return Err(CartClientError::Status { status });
            }
            if let Some(body) = &self.raw_body {
                return Ok(serde_json::from_str(body)?);
            }
            Ok(self
                .carts
                .lock()
                .unwrap()
                .get(cart_id)
                .cloned()
                .unwrap_or_default())
        }
    }

    #[async_trait]
    impl CartClient for MockCartClient {
        async fn fetch_cart(&self, cart_id: &CartId) -> Result<Cart, CartClientError> {
            self.respond(cart_id)
        }

        async fn submit_order(&self, cart_id: &CartId, order_id: &str) -> Result<Cart, CartClientError> {
            let cart = self.respond(cart_id)?;
            self.orders.lock().unwrap().push(order_id.to_string());
            self.carts.lock().unwrap().remove(cart_id);
            Ok(cart)
        }
    }

    fn sample_cart() -> Cart {
        Cart::new(vec![
            CartItem::new("Asics Blue Running Shoes", 2),
            CartItem::new("Adidas Neon Running Shoes", 1),
        ])
    }

    fn service(client: MockCartClient) -> CartService {
        CartService::new(Arc::new(client), Arc::new(Catalog::builtin()))
    }

    #[tokio::test]
    async fn test_load_cart_success() {
        let service = service(MockCartClient::new().with_cart("abc123", sample_cart()));

        let view = service.load_cart(&CartId::new("abc123")).await.unwrap();
        assert_eq!(view.totals.subtotal, 130);
        assert_eq!(view.totals.total, 136);
        assert_eq!(view.rows[0].title, "Adidas Neon Running Shoes");
    }

    #[tokio::test]
    async fn test_load_cart_network_error() {
        let mut client = MockCartClient::new();
        client.fail_status = Some(503);

        let err = service(client).load_cart(&CartId::new("abc123")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_load_cart_decode_error() {
        let mut client = MockCartClient::new();
        client.raw_body = Some("<html>not json</html>".to_string());

        let err = service(client).load_cart(&CartId::new("abc123")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_load_cart_lookup_miss() {
        let cart = Cart::new(vec![CartItem::new("Mystery Sandals", 1)]);
        let service = service(MockCartClient::new().with_cart("abc123", cart));

        let err = service.load_cart(&CartId::new("abc123")).await.unwrap_err();
        assert!(matches!(err, CartServiceError::LookupMiss { ref title } if title == "Mystery Sandals"));
        assert_eq!(err.kind(), ErrorKind::LookupMiss);
    }

    #[tokio::test]
    async fn test_submit_order_generates_id() {
        let service = service(MockCartClient::new().with_cart("abc123", sample_cart()));

        let confirmation = service
            .submit_order(&CartId::new("abc123"), None)
            .await
            .unwrap();
        assert!(Uuid::parse_str(&confirmation.order_id).is_ok());
        assert_eq!(confirmation.cart_id, CartId::new("abc123"));
        assert_eq!(confirmation.view.totals.total, 136);
    }

    #[tokio::test]
    async fn test_submit_order_keeps_given_id() {
        let client = Arc::new(MockCartClient::new().with_cart("abc123", sample_cart()));
        let service = CartService::new(client.clone(), Arc::new(Catalog::builtin()));

        let confirmation = service
            .submit_order(&CartId::new("abc123"), Some("order-42".to_string()))
            .await
            .unwrap();
        assert_eq!(confirmation.order_id, "order-42");
        assert_eq!(client.orders.lock().unwrap().as_slice(), ["order-42"]);

        // Submitting empties the cart.
        let view = service.load_cart(&CartId::new("abc123")).await.unwrap();
        assert!(view.is_empty());
    }
}
