//! Minimal Store Core - Domain types and screen state.
//!
//! This crate provides the types behind the three storefront screens:
//! - [`catalog`] - Product list, categories and the category filter
//! - [`cart`] - The visitor's in-progress selection
//! - [`detail`] - Product detail record, quantity selector and gallery state
//! - [`checkout`] - Checkout form data and the simulated submission flow
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! timers, no HTTP. The storefront crate owns sessions, delays and rendering.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod detail;
pub mod types;

pub use cart::Cart;
pub use catalog::{Catalog, CatalogError, Category, CategoryFilter, Product};
pub use checkout::{
    CheckoutError, CheckoutFlow, CheckoutForm, CheckoutPhase, Country, ShippingMethod,
};
pub use detail::{DetailError, DetailState, ProductDetail, Quantity};
pub use types::*;
