//! HTML fragments for the cart page.
//!
//! Every function here is pure: it takes a view-model and returns markup, so
//! the page can be checked without a live document.

use std::fmt::Write as _;

use crate::{
    models::{
        order::{CartView, LineRow, OrderConfirmation, OrderTotal},
        widget::WidgetInit,
    },
    services::{
        cart_service::{CartServiceError, ErrorKind},
        checkout_service::CheckoutLink,
        search_service::CHAT_BUTTON_ID,
    },
};

pub const CHECKOUT_OPTIONS_ID: &str = "checkout-options";
pub const CART_ITEMS_TABLE_ID: &str = "cart-items-table";
pub const CART_PRICE_TOTAL_ID: &str = "cart-price-total";
pub const SEARCH_INPUT_ID: &str = "search-input";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_checkout_link(link: &CheckoutLink) -> String {
    format!(
        r#"<a href="{}" title="{}">{}</a>"#,
        escape(&link.href),
        escape(&link.title),
        escape(&link.text)
    )
}

/// The checkout container with the link as its last child.
pub fn render_checkout_options(link: &CheckoutLink) -> String {
    format!(
        r#"<div id="{}">{}</div>"#,
        CHECKOUT_OPTIONS_ID,
        render_checkout_link(link)
    )
}

/// Image, title, price and a static quantity control.
pub fn render_line_row(row: &LineRow) -> String {
    format!(
        concat!(
            "<tr>",
            r#"<td><img src="{image}" style="height: 150px; width: 200px;"></td>"#,
            "<td>{title}</td>",
            "<td>{price}</td>",
            "<td><cart_quantity_button><cart_quantity_up></cart_quantity_up>{count}",
            "<cart_quantity_down></cart_quantity_down></cart_quantity_button></td>",
            "</tr>"
        ),
        image = escape(&row.image),
        title = escape(&row.title),
        price = row.price,
        count = row.count,
    )
}

pub fn render_cart_items_table(view: &CartView) -> String {
    let mut html = format!(r#"<table id="{}"><tbody>"#, CART_ITEMS_TABLE_ID);
    for row in &view.rows {
        html.push_str(&render_line_row(row));
    }
    html.push_str("</tbody></table>");
    html
}

/// Summary rows in order: sub-total, tax, total.
pub fn render_price_total_table(totals: &OrderTotal) -> String {
    let rows = [
        ("Cart Sub-Total:", totals.subtotal),
        ("Tax:", totals.tax),
        ("Total:", totals.total),
    ];

    let mut html = format!(r#"<table id="{}"><tbody>"#, CART_PRICE_TOTAL_ID);
    for (label, amount) in rows {
        let _ = write!(html, "<tr><td>{}</td><td>${}</td></tr>", label, amount);
    }
    html.push_str("</tbody></table>");
    html
}

pub fn render_search_box() -> String {
    format!(
        r#"<input id="{}" type="text"><button id="{}">Chat</button>"#,
        SEARCH_INPUT_ID, CHAT_BUTTON_ID
    )
}

/// `window.bmwidget.init(...)` call for a dispatched search.
pub fn render_widget_script(init: &WidgetInit) -> String {
    let config = serde_json::json!({
        "class": init.config.class,
        "context": init.config.context,
    });
    // keep the payload from closing the script element
    let config = config.to_string().replace("</", "<\\/");

    format!(
        "<script>window.bmwidget.init(document.getElementById({}), {});</script>",
        serde_json::Value::from(init.target_id.as_str()),
        config
    )
}

pub fn render_cart_page(view: &CartView, link: &CheckoutLink, widget: Option<&WidgetInit>) -> String {
    let mut html = String::from("<section class=\"cart\">");
    html.push_str(&render_search_box());
    html.push_str(&render_cart_items_table(view));
    html.push_str(&render_price_total_table(&view.totals));
    html.push_str(&render_checkout_options(link));
    if let Some(widget) = widget {
        html.push_str(&render_widget_script(widget));
    }
    html.push_str("</section>");
    html
}

/// User-visible replacement for the cart tables when loading fails.
pub fn render_error_state(error: &CartServiceError) -> String {
    let (kind, message) = match error.kind() {
        ErrorKind::Network => ("network", "We couldn't reach the store. Please try again later."),
        ErrorKind::Decode => ("decode", "We couldn't read your cart."),
        ErrorKind::LookupMiss => ("lookup-miss", "Your cart contains an item we don't recognise."),
    };

    format!(
        r#"<div class="cart-error" role="alert" data-kind="{}"><p>{}</p><p class="detail">{}</p></div>"#,
        kind,
        message,
        escape(&error.to_string())
    )
}

pub fn render_confirmation(confirmation: &OrderConfirmation) -> String {
    let mut html = String::from("<section class=\"confirmation\">");
    let _ = write!(
        html,
        "<h2>Order {}</h2><p>Cart {} placed {}</p>",
        escape(&confirmation.order_id),
        escape(confirmation.cart_id.as_str()),
        confirmation.placed_at.to_rfc3339()
    );
    html.push_str(&render_cart_items_table(&confirmation.view));
    html.push_str(&render_price_total_table(&confirmation.view.totals));
    html.push_str("</section>");
    html
}
