//! Product detail screen state.

use serde::{Deserialize, Serialize};

use crate::types::Price;

const GALLERY_IMAGE: &str = "/static/images/placeholder.svg";

/// Errors raised by detail screen interactions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    /// The requested gallery index does not exist.
    #[error("image {index} is out of range (gallery has {count} images)")]
    ImageOutOfRange { index: usize, count: usize },
}

/// Full product record shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub details: Vec<String>,
    pub images: Vec<String>,
}

impl ProductDetail {
    /// The product the detail screen currently renders.
    #[must_use]
    pub fn featured() -> Self {
        Self {
            name: "Ceramic Vase".to_string(),
            price: Price::usd(89),
            description: "Hand-crafted ceramic vase with a minimalist design. Each piece is \
                          unique and features subtle variations in texture and glaze."
                .to_string(),
            details: [
                "Height: 25cm",
                "Diameter: 12cm",
                "Material: Ceramic",
                "Color: Natural White",
                "Care: Hand wash only",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            images: vec![GALLERY_IMAGE.to_string(); 3],
        }
    }

    /// Image reference at `index`.
    #[must_use]
    pub fn image(&self, index: usize) -> Option<&str> {
        self.images.get(index).map(String::as_str)
    }
}

/// Quantity counter with a floor of 1 and no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: Self = Self(1);

    /// Current value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn increase(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Decrement, staying at 1.
    pub const fn decrease(&mut self) {
        if self.0 > Self::MIN.0 {
            self.0 -= 1;
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u32> for Quantity {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value < Self::MIN.0 {
            return Err(format!("quantity must be at least {}", Self::MIN.0));
        }
        Ok(Self(value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Interface state of the detail screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailState {
    pub selected_image: usize,
    pub quantity: Quantity,
}

impl DetailState {
    /// Show gallery image `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DetailError::ImageOutOfRange`] when `index >= image_count`;
    /// the selection is left unchanged.
    pub const fn select_image(&mut self, index: usize, image_count: usize) -> Result<(), DetailError> {
        if index >= image_count {
            return Err(DetailError::ImageOutOfRange {
                index,
                count: image_count,
            });
        }
        self.selected_image = index;
        Ok(())
    }

    pub const fn increase_quantity(&mut self) {
        self.quantity.increase();
    }

    pub const fn decrease_quantity(&mut self) {
        self.quantity.decrease();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_product() {
        let product = ProductDetail::featured();
        assert_eq!(product.name, "Ceramic Vase");
        assert_eq!(product.price.to_string(), "$89.00");
        assert_eq!(product.images.len(), 3);
        assert_eq!(product.details.len(), 5);
        assert!(product.image(3).is_none());
    }

    #[test]
    fn test_quantity_starts_at_one() {
        assert_eq!(DetailState::default().quantity.get(), 1);
    }

    #[test]
    fn test_decrease_clamps_at_one() {
        let mut state = DetailState::default();
        state.decrease_quantity();
        state.decrease_quantity();
        assert_eq!(state.quantity.get(), 1);
    }

    #[test]
    fn test_decrease_from_above_one() {
        let mut state = DetailState::default();
        for _ in 0..4 {
            state.increase_quantity();
        }
        assert_eq!(state.quantity.get(), 5);

        state.decrease_quantity();
        assert_eq!(state.quantity.get(), 4);
    }

    #[test]
    fn test_increase_saturates() {
        let mut quantity = Quantity::try_from(u32::MAX).unwrap();
        quantity.increase();
        assert_eq!(quantity.get(), u32::MAX);
    }

    #[test]
    fn test_select_image() {
        let mut state = DetailState::default();
        state.select_image(2, 3).unwrap();
        assert_eq!(state.selected_image, 2);
    }

    #[test]
    fn test_select_image_out_of_range_keeps_selection() {
        let mut state = DetailState::default();
        state.select_image(1, 3).unwrap();

        let err = state.select_image(3, 3).unwrap_err();
        assert_eq!(err, DetailError::ImageOutOfRange { index: 3, count: 3 });
        assert_eq!(state.selected_image, 1);
    }

    #[test]
    fn test_zero_quantity_is_rejected_on_deserialize() {
        let result: Result<DetailState, _> =
            serde_json::from_str(r#"{"selected_image":0,"quantity":0}"#);
        assert!(result.is_err());
    }
}
