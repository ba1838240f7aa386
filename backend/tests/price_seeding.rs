//! Historical price seeding and price analysis over SQLite.

use std::sync::Arc;

use mining_insights::domain::ports::{EntityRepository, ReportQuery};
use mining_insights::domain::{HISTORICAL_PRICES, PriceSeeder, ReportService};
use mining_insights::outbound::persistence::{
    DieselCountryRepository, DieselMineralPriceRepository, DieselMineralRepository,
    DieselSiteRepository,
};
use rstest::rstest;

mod support;

use support::TestDatabase;

#[rstest]
#[tokio::test]
async fn seeding_twice_matches_seeding_once() {
    let db = TestDatabase::migrated().await;
    let prices = Arc::new(DieselMineralPriceRepository::new(db.pool.clone()));
    let seeder = PriceSeeder::new(prices.clone());

    let first = seeder.seed().await.expect("first seed");
    let second = seeder.seed().await.expect("second seed");

    assert_eq!(first, HISTORICAL_PRICES.len());
    assert_eq!(second, 0);
    assert_eq!(prices.list().await.expect("list").len(), HISTORICAL_PRICES.len());
}

#[rstest]
#[tokio::test]
async fn seeded_lithium_latest_price_is_2025() {
    let db = TestDatabase::migrated().await;
    let prices = Arc::new(DieselMineralPriceRepository::new(db.pool.clone()));
    PriceSeeder::new(prices.clone()).seed().await.expect("seed");

    let reports = ReportService::new(
        Arc::new(DieselCountryRepository::new(db.pool.clone())),
        Arc::new(DieselMineralRepository::new(db.pool.clone())),
        Arc::new(DieselSiteRepository::new(db.pool.clone())),
        prices,
    );
    let analysis = reports.analyze_prices().await.expect("analysis");
    let lithium = analysis
        .minerals
        .iter()
        .find(|series| series.mineral_name == "Lithium")
        .expect("lithium series");
    assert_eq!(lithium.latest.year, 2025);
    assert_eq!(lithium.latest.price_usd_per_tonne, 70_000.0);
    assert_eq!(lithium.series.len(), 3);
}
