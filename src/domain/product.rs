//! Static product catalog for the landing page.
//!
//! Prices live in Stripe; the catalog only carries the identifiers the
//! front end needs to start a checkout, plus display amounts in cents.

use serde::Serialize;

use super::checkout::CheckoutMode;

/// A purchasable product shown on the landing page.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Stripe product id.
    pub id: String,
    /// Stripe price id used to start checkout.
    pub price_id: String,
    /// Display name.
    pub name: String,
    /// Checkout mode this product is sold under.
    pub mode: CheckoutMode,
    /// Price in cents.
    pub unit_amount_cents: i64,
    /// Struck-through compare-at price in cents, if any.
    pub compare_at_cents: Option<i64>,
}

/// The catalog of products offered on the site.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn by_price_id(&self, price_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.price_id == price_id)
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new(vec![Product {
            id: "prod_estate_complete".to_string(),
            price_id: "price_estate_complete_lifetime".to_string(),
            name: "Complete Will & Trust Package - Lifetime Access".to_string(),
            mode: CheckoutMode::Payment,
            unit_amount_cents: 49_900,
            compare_at_cents: Some(99_900),
        }])
    }
}
