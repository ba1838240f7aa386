//! Integration tests for the Diesel reference-table repositories against a
//! temporary SQLite database.

use std::sync::Arc;

use mining_insights::domain::ports::{
    EntityRepository, ReportQuery, RepositoryError, ResearchInsights,
};
use mining_insights::domain::{
    CountryDraft, InsightService, MineralDraft, MineralInsightDraft, RecordId, ReportService,
    RoleDraft, SiteDraft, UNKNOWN_COUNTRY, UNKNOWN_MINERAL, UserDraft,
};
use mining_insights::outbound::persistence::{
    DieselCountryRepository, DieselMineralInsightRepository, DieselMineralPriceRepository,
    DieselMineralRepository, DieselRoleRepository, DieselSiteRepository, DieselUserRepository,
};
use rstest::rstest;

mod support;

use support::TestDatabase;

fn country(name: &str) -> CountryDraft {
    CountryDraft {
        name: name.to_owned(),
        gdp_billion_usd: 66.4,
        mining_revenue_billion_usd: 20.0,
        key_projects: "Kamoa-Kakula".to_owned(),
    }
}

fn cobalt() -> MineralDraft {
    MineralDraft {
        name: "Cobalt".to_owned(),
        description: "Battery cathodes".to_owned(),
        market_price_usd_per_tonne: 33_000.0,
    }
}

#[rstest]
#[tokio::test]
async fn built_in_roles_are_migrated() {
    let db = TestDatabase::migrated().await;
    let roles = DieselRoleRepository::new(db.pool.clone())
        .list()
        .await
        .expect("list roles");
    let names: Vec<&str> = roles.iter().map(|role| role.name.as_str()).collect();
    assert_eq!(names, ["Administrator", "Investor", "Researcher"]);
}

#[rstest]
#[tokio::test]
async fn country_crud_round_trip() {
    let db = TestDatabase::migrated().await;
    let repo = DieselCountryRepository::new(db.pool.clone());

    let added = repo.add(&country("DR Congo")).await.expect("add");
    assert_eq!(added.id, RecordId::new(1));

    let edited = repo
        .edit(added.id, &country("Democratic Republic of the Congo"))
        .await
        .expect("edit");
    assert_eq!(edited.name, "Democratic Republic of the Congo");
    assert_eq!(
        repo.get(added.id).await.expect("get"),
        Some(edited.clone())
    );

    repo.delete(added.id).await.expect("delete");
    assert!(repo.list().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn missing_rows_are_reported_as_not_found() {
    let db = TestDatabase::migrated().await;
    let repo = DieselCountryRepository::new(db.pool.clone());
    let missing = RecordId::new(42);

    let edit = repo.edit(missing, &country("Chile")).await;
    let delete = repo.delete(missing).await;
    assert!(matches!(edit, Err(RepositoryError::NotFound { .. })));
    assert!(matches!(delete, Err(RepositoryError::NotFound { .. })));
    assert_eq!(repo.get(missing).await.expect("get"), None);
}

#[rstest]
#[tokio::test]
async fn deleted_country_leaves_site_with_unknown_name() {
    let db = TestDatabase::migrated().await;
    let countries = Arc::new(DieselCountryRepository::new(db.pool.clone()));
    let minerals = Arc::new(DieselMineralRepository::new(db.pool.clone()));
    let sites = Arc::new(DieselSiteRepository::new(db.pool.clone()));
    let prices = Arc::new(DieselMineralPriceRepository::new(db.pool.clone()));

    let congo = countries.add(&country("DR Congo")).await.expect("country");
    let mineral = minerals.add(&cobalt()).await.expect("mineral");
    let site = sites
        .add(&SiteDraft {
            name: "Mutanda".to_owned(),
            country_id: congo.id,
            mineral_id: mineral.id,
            latitude: -10.8,
            longitude: 25.8,
            production_tonnes: 25_000.0,
        })
        .await
        .expect("site");

    countries.delete(congo.id).await.expect("delete country");

    let reports = ReportService::new(countries, minerals, sites.clone(), prices);
    let map = reports.site_map().await.expect("site map");
    assert_eq!(map.points.len(), 1);
    let point = &map.points[0];
    assert_eq!(point.site_id, site.id);
    assert_eq!(point.country_name, UNKNOWN_COUNTRY);
    assert_eq!(point.mineral_name, "Cobalt");
    assert_eq!(point.production_tonnes, 25_000.0);
    assert_eq!(
        sites.get(site.id).await.expect("get").map(|row| row.country_id),
        Some(congo.id)
    );
}

#[rstest]
#[tokio::test]
async fn sites_may_reference_rows_that_do_not_exist() {
    let db = TestDatabase::migrated().await;
    let countries = Arc::new(DieselCountryRepository::new(db.pool.clone()));
    let minerals = Arc::new(DieselMineralRepository::new(db.pool.clone()));
    let sites = Arc::new(DieselSiteRepository::new(db.pool.clone()));
    let prices = Arc::new(DieselMineralPriceRepository::new(db.pool.clone()));

    let site = sites
        .add(&SiteDraft {
            name: "Greenbushes".to_owned(),
            country_id: RecordId::new(77),
            mineral_id: RecordId::new(88),
            latitude: -33.9,
            longitude: 116.1,
            production_tonnes: 1_400.0,
        })
        .await
        .expect("site with unknown references");

    let reports = ReportService::new(countries, minerals, sites, prices);
    let map = reports.site_map().await.expect("site map");
    assert_eq!(map.points.len(), 1);
    assert_eq!(map.points[0].site_id, site.id);
    assert_eq!(map.points[0].country_name, UNKNOWN_COUNTRY);
    assert_eq!(map.points[0].mineral_name, UNKNOWN_MINERAL);
}

#[rstest]
#[tokio::test]
async fn role_in_use_can_be_deleted() {
    let db = TestDatabase::migrated().await;
    let roles = DieselRoleRepository::new(db.pool.clone());
    let users = DieselUserRepository::new(db.pool.clone());

    let auditor = roles
        .add(&RoleDraft {
            name: "Auditor".to_owned(),
            permissions: "read".to_owned(),
        })
        .await
        .expect("role");
    let user = users
        .add(&UserDraft {
            username: "ines".to_owned(),
            password_hash: "$argon2id$placeholder".to_owned(),
            role_id: auditor.id,
        })
        .await
        .expect("user");

    roles.delete(auditor.id).await.expect("delete referenced role");

    assert_eq!(roles.get(auditor.id).await.expect("get role"), None);
    let stored = users.get(user.id).await.expect("get user").expect("user kept");
    assert_eq!(stored.role_id, auditor.id);
}

#[rstest]
#[tokio::test]
async fn insights_are_listed_newest_first() {
    let db = TestDatabase::migrated().await;
    let minerals = Arc::new(DieselMineralRepository::new(db.pool.clone()));
    let insights = Arc::new(DieselMineralInsightRepository::new(db.pool.clone()));
    let service = InsightService::new(insights.clone(), minerals.clone());

    let cobalt = minerals.add(&cobalt()).await.expect("mineral");
    for text in ["Output steady.", "Export quota announced."] {
        service
            .add(MineralInsightDraft {
                mineral_id: cobalt.id,
                insight: text.to_owned(),
            })
            .await
            .expect("insight");
    }
    service
        .revise(RecordId::new(1), "Output falling.".to_owned())
        .await
        .expect("revise");

    let board = service.board().await.expect("board");
    let listed: Vec<(i32, &str)> = board
        .insights
        .iter()
        .map(|entry| (entry.insight_id.get(), entry.insight.as_str()))
        .collect();
    assert_eq!(listed, [(2, "Export quota announced."), (1, "Output falling.")]);
    assert!(board.insights.iter().all(|entry| entry.mineral_name == "Cobalt"));

    insights.delete(RecordId::new(2)).await.expect("delete");
    let remaining = insights.list().await.expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].mineral_id, cobalt.id);
}
