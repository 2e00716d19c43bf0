use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::{models::cart::CartId, utils::query::page_cart_id};

pub const CONFIRMATION_PAGE: &str = "confirmation.html";
/// Stands in for the cart id of a page whose url carries none.
pub const MISSING_CART_ID: &str = "null";

/// Anchor appended to the `checkout-options` container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLink {
    pub text: String,
    pub title: String,
    pub href: String,
}

impl CheckoutLink {
    /// The id is concatenated as-is, without URL encoding. A page without a
    /// cart id links to `cartId=null`.
    pub fn for_cart(cart_id: Option<&CartId>) -> Self {
        let id = cart_id.map(CartId::as_str).unwrap_or(MISSING_CART_ID);
        Self {
            text: "Checkout".to_string(),
            title: "Checkout".to_string(),
            href: format!("{}?cartId={}", CONFIRMATION_PAGE, id),
        }
    }
}

/// Build the checkout link for the page at `page_url`.
pub fn build_checkout_link(page_url: &Url) -> CheckoutLink {
    let cart_id = page_cart_id(page_url);
    if cart_id.is_none() {
        warn!("Page {} has no cartId parameter", page_url);
    }

    let link = CheckoutLink::for_cart(cart_id.as_ref());
    debug!("Checkout link: {}", link.href);
    link
}
