pub mod cart;
pub mod catalog;
pub mod order;
pub mod widget;

pub use cart::{Cart, CartId, CartItem};
pub use catalog::{Catalog, CatalogEntry, CatalogError, LookupMiss, MAX_PRICE};
pub use order::{CartView, LineRow, OrderConfirmation, OrderTotal, FLAT_TAX};
pub use widget::{WidgetConfig, WidgetInit};
