//! Historical mineral prices inserted at startup.

use std::sync::Arc;

use tracing::info;

use super::catalogue_service::map_repository_error;
use super::ports::PriceSeedRepository;
use super::{Error, MineralPriceDraft};

/// Yearly prices in USD per tonne, as `(mineral, year, price)`.
pub const HISTORICAL_PRICES: [(&str, i32, f64); 12] = [
    ("Cobalt", 2023, 50229.0),
    ("Cobalt", 2024, 49822.0),
    ("Cobalt", 2025, 52000.0),
    ("Graphite", 2023, 729.0),
    ("Graphite", 2024, 821.0),
    ("Graphite", 2025, 800.0),
    ("Lithium", 2023, 64093.0),
    ("Lithium", 2024, 69273.0),
    ("Lithium", 2025, 70000.0),
    ("Manganese", 2023, 1980.0),
    ("Manganese", 2024, 2300.0),
    ("Manganese", 2025, 2200.0),
];

/// Drafts for every historical price.
#[must_use]
pub fn historical_price_drafts() -> Vec<MineralPriceDraft> {
    HISTORICAL_PRICES
        .iter()
        .map(|&(name, year, price)| MineralPriceDraft::new(name, year, price))
        .collect()
}

/// Seeds the price table without duplicating existing `(mineral, year)` pairs.
#[derive(Clone)]
pub struct PriceSeeder {
    repo: Arc<dyn PriceSeedRepository>,
}

impl PriceSeeder {
    /// Create a seeder over `repo`.
    pub fn new(repo: Arc<dyn PriceSeedRepository>) -> Self {
        Self { repo }
    }

    /// Insert the missing historical prices and return how many were added.
    pub async fn seed(&self) -> Result<usize, Error> {
        let drafts = historical_price_drafts();
        let inserted = self
            .repo
            .insert_missing(&drafts)
            .await
            .map_err(map_repository_error)?;
        info!(inserted, total = drafts.len(), "historical prices seeded");
        Ok(inserted)
    }
}
