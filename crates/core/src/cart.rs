//! The visitor's cart.
//!
//! A cart is an ordered list of product IDs. Adding the same product twice
//! yields two entries; there is no quantity aggregation and no stock check.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{CurrencyCode, Price, ProductId};

/// In-progress, unsaved product selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<ProductId>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a product.
    pub fn add(&mut self, product: &Product) {
        self.entries.push(product.id);
    }

    /// Remove the first entry for `id`.
    ///
    /// Returns `false` and leaves the cart untouched when `id` is absent.
    pub fn remove(&mut self, id: ProductId) -> bool {
        match self.entries.iter().position(|entry| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ProductId] {
        &self.entries
    }

    /// Resolve entries against the catalog, in insertion order.
    ///
    /// Entries whose product is no longer in the catalog are skipped.
    #[must_use]
    pub fn lines<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.entries
            .iter()
            .filter_map(|id| catalog.get(*id))
            .collect()
    }

    /// Sum of every entry's price.
    ///
    /// Lines in a currency other than the first line's are not counted; the
    /// seeded catalog is single-currency.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Price {
        let lines = self.lines(catalog);
        let currency = lines
            .first()
            .map_or(CurrencyCode::default(), |p| p.price.currency_code);
        lines
            .iter()
            .fold(Price::zero(currency), |sum, product| {
                sum.checked_add(product.price).unwrap_or(sum)
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(catalog: &Catalog, id: i32) -> &Product {
        catalog.get(ProductId::new(id)).unwrap()
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(&Catalog::seeded()), Price::usd(0));
    }

    #[test]
    fn test_add_counts_every_call() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        let sequence = [1, 3, 1, 4, 1];
        for id in sequence {
            cart.add(product(&catalog, id));
        }

        assert_eq!(cart.len(), sequence.len());
        // 89 * 3 + 65 + 35
        assert_eq!(cart.total(&catalog), Price::usd(367));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(product(&catalog, 4));
        cart.add(product(&catalog, 2));

        let names: Vec<_> = cart.lines(&catalog).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Wooden Bowl", "Linen Throw"]);
    }

    #[test]
    fn test_remove_takes_exactly_one_entry() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(product(&catalog, 2));
        cart.add(product(&catalog, 2));
        cart.add(product(&catalog, 3));

        assert!(cart.remove(ProductId::new(2)));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.entries(), &[ProductId::new(2), ProductId::new(3)]);
        assert_eq!(cart.total(&catalog), Price::usd(110));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(product(&catalog, 1));
        let before = cart.clone();

        assert!(!cart.remove(ProductId::new(3)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_unknown_entries_are_skipped() {
        let catalog = Catalog::seeded();
        let cart: Cart = serde_json::from_str(r#"{"entries":[1,42]}"#).unwrap();

        assert_eq!(cart.lines(&catalog).len(), 1);
        assert_eq!(cart.total(&catalog), Price::usd(89));
    }
}
