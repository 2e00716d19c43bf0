use url::Url;

use crate::models::cart::CartId;

pub const CART_ID_PARAM: &str = "cartId";

/// Parse a page location. Relative locations such as `cart.html?cartId=abc`
/// are resolved against a placeholder origin so their query can still be read.
pub fn parse_page_url(location: &str) -> Result<Url, url::ParseError> {
    match Url::parse(location) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/")?.join(location)
        }
        other => other,
    }
}

/// The `cartId` query parameter of a page, percent-decoded.
pub fn page_cart_id(page_url: &Url) -> Option<CartId> {
    page_url
        .query_pairs()
        .find(|(key, _)| key == CART_ID_PARAM)
        .map(|(_, value)| CartId::new(value.into_owned()))
}
