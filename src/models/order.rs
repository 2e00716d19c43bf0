use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    cart::{Cart, CartId},
    catalog::{Catalog, LookupMiss},
};

/// Flat tax added to every order, in currency units.
pub const FLAT_TAX: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotal {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl OrderTotal {
    pub fn from_subtotal(subtotal: i64) -> Self {
        Self {
            subtotal,
            tax: FLAT_TAX,
            total: subtotal + FLAT_TAX,
        }
    }
}

/// One rendered line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRow {
    pub image: String,
    pub title: String,
    pub price: i64,
    pub count: i64,
}

/// Cart rows in display order plus the computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub rows: Vec<LineRow>,
    pub totals: OrderTotal,
}

impl CartView {
    /// Each fetched item is inserted at the top of the table, so rows end up
    /// in reverse fetch order. The subtotal sums one unit price per line; the
    /// item count is display-only.
    pub fn build(cart: &Cart, catalog: &Catalog) -> Result<Self, LookupMiss> {
        let mut rows = Vec::with_capacity(cart.items.len());
        let mut subtotal = 0;

        for item in &cart.items {
            let entry = catalog.lookup(&item.item_title)?;
            subtotal += entry.price;
            rows.insert(
                0,
                LineRow {
                    image: entry.image.clone(),
                    title: item.item_title.clone(),
                    price: entry.price,
                    count: item.item_count,
                },
            );
        }

        Ok(Self {
            rows,
            totals: OrderTotal::from_subtotal(subtotal),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of submitting a cart as an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub cart_id: CartId,
    pub view: CartView,
    pub placed_at: DateTime<Utc>,
}
