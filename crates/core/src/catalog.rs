//! Product catalog and category filtering.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Placeholder image shared by every seeded product.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// Errors produced while interpreting catalog input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The category tag is not one the catalog knows.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Category tag attached to every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Home,
    Accessories,
}

impl Category {
    /// Every category, in tab order.
    pub const ALL: [Self; 2] = [Self::Home, Self::Accessories];

    /// URL/query tag, e.g. `home`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Active view restriction over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Query tag, `all` or a category tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Whether a product passes this filter.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Opaque image reference.
    pub image: String,
    pub category: Category,
}

impl Product {
    fn seed(id: i32, name: &str, dollars: i64, category: Category) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::usd(dollars),
            image: PLACEHOLDER_IMAGE.to_string(),
            category,
        }
    }
}

/// The static list of products shown to visitors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in sample catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(vec![
            Product::seed(1, "Ceramic Vase", 89, Category::Home),
            Product::seed(2, "Linen Throw", 45, Category::Home),
            Product::seed(3, "Minimalist Clock", 65, Category::Accessories),
            Product::seed(4, "Wooden Bowl", 35, Category::Home),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products passing `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }

    /// Filter tabs offered on the catalog screen.
    #[must_use]
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.products().len(), 4);
        let vase = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(vase.name, "Ceramic Vase");
        assert_eq!(vase.price, Price::usd(89));
        assert_eq!(vase.category, Category::Home);
    }

    #[test]
    fn test_filter_all_returns_full_list() {
        let catalog = Catalog::seeded();
        let all = catalog.filter(CategoryFilter::All);
        assert_eq!(ids(&all), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_home_preserves_order() {
        let catalog = Catalog::seeded();
        let home = catalog.filter(CategoryFilter::Only(Category::Home));
        assert_eq!(ids(&home), vec![1, 2, 4]);
        assert!(home.iter().all(|p| p.category == Category::Home));
    }

    #[test]
    fn test_filter_accessories() {
        let catalog = Catalog::seeded();
        let accessories = catalog.filter(CategoryFilter::Only(Category::Accessories));
        assert_eq!(ids(&accessories), vec![3]);
    }

    #[test]
    fn test_get_unknown_product() {
        assert!(Catalog::seeded().get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "home".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Home)
        );
        assert_eq!(
            "garden".parse::<CategoryFilter>(),
            Err(CatalogError::UnknownCategory("garden".to_string()))
        );
    }

    #[test]
    fn test_filter_tag_roundtrips_through_display() {
        for tab in Catalog::tabs() {
            assert_eq!(tab.to_string().parse::<CategoryFilter>().unwrap(), tab);
        }
    }

    #[test]
    fn test_tabs_order() {
        let labels: Vec<_> = Catalog::tabs().into_iter().map(CategoryFilter::label).collect();
        assert_eq!(labels, vec!["All", "Home", "Accessories"]);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Accessories).unwrap();
        assert_eq!(json, "\"accessories\"");
    }
}
