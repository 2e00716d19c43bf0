use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{
    catalog::Catalog,
    order::{CartView, OrderConfirmation, OrderTotal},
};

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "Item")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    count: i64,
    #[tabled(rename = "Image")]
    image: String,
}

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Image")]
    image: String,
}

pub fn format_cart_table(view: &CartView) -> String {
    if view.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = view
        .rows
        .iter()
        .map(|row| CartTableRow {
            title: truncate_title(&row.title, 40),
            price: format!("${}", row.price),
            count: row.count,
            image: row.image.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

/// Cuts titles longer than `max` characters, ending them with "...".
fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        format!("{}...", title.chars().take(max - 3).collect::<String>())
    } else {
        title.to_string()
    }
}

pub fn format_totals(totals: &OrderTotal) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<16}{}\n", "Cart Sub-Total:", style(format!("${}", totals.subtotal)).cyan()));
    output.push_str(&format!("{:<16}{}\n", "Tax:", style(format!("${}", totals.tax)).dim()));
    output.push_str(&format!("{:<16}{}\n", style("Total:").bold(), style(format!("${}", totals.total)).green().bold()));

    output
}

pub fn format_catalog_table(catalog: &Catalog) -> String {
    let rows: Vec<CatalogTableRow> = catalog
        .sorted()
        .into_iter()
        .map(|(title, entry)| CatalogTableRow {
            title: title.to_string(),
            price: format!("${}", entry.price),
            image: entry.image.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_confirmation(confirmation: &OrderConfirmation) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Order").bold(), style(&confirmation.order_id).cyan()));
    output.push_str(&format!("{}: {}\n", style("Cart").bold(), style(&confirmation.cart_id).dim()));
    output.push_str(&format!("{}: {}\n", style("Placed").bold(), style(format_date(&confirmation.placed_at)).dim()));

    let table = format_cart_table(&confirmation.view);
    if !table.is_empty() {
        output.push_str(&table);
        output.push('\n');
    }
    output.push_str(&format_totals(&confirmation.view.totals));

    output
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cart::{Cart, CartItem};

    #[test]
    fn test_cart_table_lists_rows() {
        let cart = Cart::new(vec![CartItem::new("Asics Blue Running Shoes", 2)]);
        let view = CartView::build(&cart, &Catalog::builtin()).unwrap();

        let table = format_cart_table(&view);
        assert!(table.contains("Asics Blue Running Shoes"));
        assert!(table.contains("$55"));
    }

    #[test]
    fn test_empty_cart_table() {
        let view = CartView::build(&Cart::default(), &Catalog::builtin()).unwrap();
        assert!(format_cart_table(&view).is_empty());
    }

    #[test]
    fn test_truncate_title_counts_characters() {
        let accented = "é".repeat(38);
        assert_eq!(truncate_title(&accented, 40), accented);

        let long = "x".repeat(45);
        let cut = truncate_title(&long, 40);
        assert_eq!(cut.chars().count(), 40);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_cart_table_keeps_short_multibyte_title() {
        let title = "é".repeat(38);
        let catalog = Catalog::from_json_str(&format!(
            r#"{{"{}": {{"image": "images/e.jpg", "price": 10}}}}"#,
            title
        ))
        .unwrap();
        let cart = Cart::new(vec![CartItem::new(title.as_str(), 1)]);
        let view = CartView::build(&cart, &catalog).unwrap();

        let table = format_cart_table(&view);
        assert!(table.contains(&title));
        assert!(!table.contains("..."));
    }

    #[test]
    fn test_totals_lines() {
        console::set_colors_enabled(false);
        let totals = format_totals(&OrderTotal::from_subtotal(130));
        assert!(totals.contains("$130"));
        assert!(totals.contains("$6"));
        assert!(totals.contains("$136"));
    }
}
