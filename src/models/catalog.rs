use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

use crate::models::cart::LooseInt;

/// Built-in storefront inventory: title, image path, price.
const BUILTIN_ENTRIES: &[(&str, &str, i64)] = &[
    ("Nike Neon and Grey Running Shoes", "images/home/neon_yellow_running_shoes.jpg", 80),
    ("Asics Blue Running Shoes", "images/home/blue_running_shoes.jpeg", 55),
    ("Adidas Neon Running Shoes", "images/home/neon_running_shoes.jpg", 75),
    ("Asics Pink Running Shoes", "images/home/pink_running_shoes.jpeg", 65),
    ("Asics Purple Running Shoes", "images/home/teal_running_shoes.jpeg", 70),
    ("Asics White Running Shoes", "images/home/white_running_shoes.jpg", 55),
    ("New Balance Black Running Shoes", "images/home/black_running_shoes.jpg", 60),
    ("New Balance White Running Shoes", "images/home/white_running_shoes_nb.jpeg", 65),
    ("Nike Neon Blue Running Shoes", "images/home/blue_neon_running_shoes_nike.jpg", 80),
    ("Nike Navy Running Shoes", "images/home/blue_running_shoes_nike.jpg", 80),
    ("Asics Neon Orange Running Shoes", "images/home/orange_neon_running_shoes_asics.jpeg", 70),
    ("New Balance Neon Pink Running Shoes", "images/home/pink_neon_running_shoes_nb.jpg", 65),
    ("Asics Pink and Purple Running Shoes", "images/home/pink_purple_running_shoes.jpeg", 60),
];

/// Largest unit price a catalog may carry. Keeps cart sums far from `i64` overflow.
pub const MAX_PRICE: i64 = 1_000_000;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid price '{value}' for catalog item '{title}'")]
    InvalidPrice { title: String, value: String },
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A cart title that has no catalog entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Item '{title}' is not in the catalog")]
pub struct LookupMiss {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub image: String,
    pub price: i64,
}

#[derive(Deserialize)]
struct RawCatalogEntry {
    image: String,
    price: LooseInt,
}

/// Immutable title → image/price lookup, built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ENTRIES.iter().map(|(title, image, price)| {
            (
                title.to_string(),
                CatalogEntry {
                    image: image.to_string(),
                    price: *price,
                },
            )
        }))
    }

    fn from_entries(entries: impl IntoIterator<Item = (String, CatalogEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse `{ "<title>": { "image": "...", "price": "80" } }`.
    ///
    /// Prices must lie in `0..=MAX_PRICE`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, RawCatalogEntry> = serde_json::from_str(json)?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (title, entry) in raw {
            let price = entry
                .price
                .to_i64()
                .filter(|price| (0..=MAX_PRICE).contains(price))
                .ok_or_else(|| CatalogError::InvalidPrice {
                    title: title.clone(),
                    value: entry.price.raw(),
                })?;
            entries.insert(
                title,
                CatalogEntry {
                    image: entry.image,
                    price,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::debug!("Loading catalog from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Titles must match the cart service's titles exactly.
    pub fn lookup(&self, title: &str) -> Result<&CatalogEntry, LookupMiss> {
        self.entries.get(title).ok_or_else(|| LookupMiss {
            title: title.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by title.
    pub fn sorted(&self) -> BTreeMap<&str, &CatalogEntry> {
        self.entries
            .iter()
            .map(|(title, entry)| (title.as_str(), entry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 13);

        let entry = catalog.lookup("Asics Blue Running Shoes").unwrap();
        assert_eq!(entry.price, 55);
        assert_eq!(entry.image, "images/home/blue_running_shoes.jpeg");
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let catalog = Catalog::builtin();
        let miss = catalog.lookup("asics blue running shoes").unwrap_err();
        assert_eq!(miss.title, "asics blue running shoes");
    }

    #[test]
    fn test_from_json_accepts_string_and_number_prices() {
        let catalog = Catalog::from_json_str(
            r#"{
                "Trail Shoes": {"image": "images/trail.jpg", "price": "90"},
                "Road Shoes": {"image": "images/road.jpg", "price": 45}
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.lookup("Trail Shoes").unwrap().price, 90);
        assert_eq!(catalog.lookup("Road Shoes").unwrap().price, 45);
    }

    #[test]
    fn test_from_json_rejects_invalid_price() {
        let result = Catalog::from_json_str(
            r#"{"Trail Shoes": {"image": "images/trail.jpg", "price": "ninety"}}"#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::InvalidPrice { ref title, ref value }) if title == "Trail Shoes" && value == "ninety"
        ));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_prices() {
        for price in [r#""9223372036854775807""#, "9223372036854775806", r#""-5""#, "1000001"] {
            let json = format!(r#"{{"Big": {{"image": "a.jpg", "price": {}}}}}"#, price);
            assert!(
                matches!(Catalog::from_json_str(&json), Err(CatalogError::InvalidPrice { .. })),
                "price {} accepted",
                price
            );
        }

        let json = format!(r#"{{"Big": {{"image": "a.jpg", "price": {}}}}}"#, MAX_PRICE);
        assert_eq!(Catalog::from_json_str(&json).unwrap().lookup("Big").unwrap().price, MAX_PRICE);
    }
}
