//! Pure report calculations over loaded rows.
//!
//! Nothing here touches a store; [`super::ReportService`] loads the rows
//! and hands them over.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{Country, Mineral, MineralInsight, MineralPrice, RecordId, Site};

/// Label of the mining revenue slice.
pub const MINING_REVENUE_LABEL: &str = "Mining Revenue";
/// Label of the remaining GDP slice.
pub const OTHER_GDP_LABEL: &str = "Other GDP";
/// Country name shown for sites whose country row is gone.
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";
/// Mineral name shown for sites whose mineral row is gone.
pub const UNKNOWN_MINERAL: &str = "Unknown Mineral";
/// Default map centre as (latitude, longitude).
pub const MAP_CENTER: (f64, f64) = (-2.0, 23.5);
/// Default map zoom level.
pub const MAP_ZOOM: u8 = 4;

/// One slice of a GDP pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpSlice {
    pub label: &'static str,
    pub value_billion_usd: f64,
    /// Share of GDP in percent; absent when GDP is zero.
    pub share_percent: Option<f64>,
}

/// Mining revenue against the rest of a country's GDP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpComposition {
    pub country_id: RecordId,
    pub country_name: String,
    pub gdp_billion_usd: f64,
    /// Mining revenue first, then the rest of GDP.
    pub slices: [GdpSlice; 2],
}

/// Split a country's GDP into mining revenue and everything else.
///
/// The second slice is `gdp - revenue` and is reported as-is, even when
/// revenue exceeds GDP.
///
/// # Examples
/// ```
/// use mining_insights::domain::{gdp_composition, Country, RecordId};
///
/// let country = Country {
///     id: RecordId::new(1),
///     name: "Zambia".into(),
///     gdp_billion_usd: 100.0,
///     mining_revenue_billion_usd: 30.0,
///     key_projects: String::new(),
/// };
/// let pie = gdp_composition(&country);
/// assert_eq!(pie.slices[0].value_billion_usd, 30.0);
/// assert_eq!(pie.slices[1].value_billion_usd, 70.0);
/// ```
#[must_use]
pub fn gdp_composition(country: &Country) -> GdpComposition {
    let gdp = country.gdp_billion_usd;
    let revenue = country.mining_revenue_billion_usd;
    let share = |value: f64| (gdp != 0.0).then(|| value * 100.0 / gdp);
    let other = gdp - revenue;
    GdpComposition {
        country_id: country.id,
        country_name: country.name.clone(),
        gdp_billion_usd: gdp,
        slices: [
            GdpSlice {
                label: MINING_REVENUE_LABEL,
                value_billion_usd: revenue,
                share_percent: share(revenue),
            },
            GdpSlice {
                label: OTHER_GDP_LABEL,
                value_billion_usd: other,
                share_percent: share(other),
            },
        ],
    }
}

/// Headline figures for one compared country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryComparisonRow {
    pub country_id: RecordId,
    pub name: String,
    pub gdp_billion_usd: f64,
    pub mining_revenue_billion_usd: f64,
}

/// Rows for the requested ids, in request order.
///
/// Unknown ids are skipped; repeated ids produce repeated rows.
#[must_use]
pub fn compare_countries(countries: &[Country], ids: &[RecordId]) -> Vec<CountryComparisonRow> {
    let by_id: HashMap<RecordId, &Country> =
        countries.iter().map(|country| (country.id, country)).collect();
    ids.iter()
        .filter_map(|id| by_id.get(id))
        .map(|country| CountryComparisonRow {
            country_id: country.id,
            name: country.name.clone(),
            gdp_billion_usd: country.gdp_billion_usd,
            mining_revenue_billion_usd: country.mining_revenue_billion_usd,
        })
        .collect()
}

/// A single year's price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub price_id: RecordId,
    pub year: i32,
    pub price_usd_per_tonne: f64,
}

/// Price history of one mineral.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MineralPriceSeries {
    pub mineral_name: String,
    /// Ordered by year, then by price id.
    pub series: Vec<PricePoint>,
    pub latest: PricePoint,
}

/// Price histories for every mineral with at least one price row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceAnalysis {
    /// Ordered by mineral name.
    pub minerals: Vec<MineralPriceSeries>,
}

/// Group prices by mineral name and pick each mineral's latest price.
///
/// When several rows share the latest year, the one with the lowest id wins.
#[must_use]
pub fn analyze_prices(prices: &[MineralPrice]) -> PriceAnalysis {
    let mut groups: BTreeMap<&str, Vec<PricePoint>> = BTreeMap::new();
    for price in prices {
        groups
            .entry(price.mineral_name.as_str())
            .or_default()
            .push(PricePoint {
                price_id: price.id,
                year: price.year,
                price_usd_per_tonne: price.price_usd_per_tonne,
            });
    }

    let minerals = groups
        .into_iter()
        .filter_map(|(name, mut series)| {
            series.sort_by_key(|point| (point.year, point.price_id));
            let max_year = series.last()?.year;
            let latest = series.iter().find(|point| point.year == max_year)?.clone();
            Some(MineralPriceSeries {
                mineral_name: name.to_owned(),
                series,
                latest,
            })
        })
        .collect();
    PriceAnalysis { minerals }
}

/// A marker on the site map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMapPoint {
    pub site_id: RecordId,
    pub site_name: String,
    pub country_name: String,
    pub mineral_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub production_tonnes: f64,
}

/// Everything a client needs to draw the site map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMap {
    pub center: (f64, f64),
    pub zoom: u8,
    pub points: Vec<SiteMapPoint>,
}

/// One point per site, ordered by site id, with names resolved.
#[must_use]
pub fn site_map_points(
    sites: &[Site],
    countries: &[Country],
    minerals: &[Mineral],
) -> Vec<SiteMapPoint> {
    let country_names: HashMap<RecordId, &str> = countries
        .iter()
        .map(|country| (country.id, country.name.as_str()))
        .collect();
    let mineral_names: HashMap<RecordId, &str> = minerals
        .iter()
        .map(|mineral| (mineral.id, mineral.name.as_str()))
        .collect();

    let mut points: Vec<SiteMapPoint> = sites
        .iter()
        .map(|site| SiteMapPoint {
            site_id: site.id,
            site_name: site.name.clone(),
            country_name: country_names
                .get(&site.country_id)
                .copied()
                .unwrap_or(UNKNOWN_COUNTRY)
                .to_owned(),
            mineral_name: mineral_names
                .get(&site.mineral_id)
                .copied()
                .unwrap_or(UNKNOWN_MINERAL)
                .to_owned(),
            latitude: site.latitude,
            longitude: site.longitude,
            production_tonnes: site.production_tonnes,
        })
        .collect();
    points.sort_by_key(|point| point.site_id);
    points
}

/// Wrap points with the default centre and zoom.
#[must_use]
pub fn site_map(points: Vec<SiteMapPoint>) -> SiteMap {
    SiteMap {
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        points,
    }
}

/// An insight with its mineral name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightEntry {
    pub insight_id: RecordId,
    pub mineral_id: RecordId,
    pub mineral_name: String,
    pub insight: String,
}

/// The researcher insights page: minerals to pick from plus every note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightBoard {
    pub minerals: Vec<Mineral>,
    pub insights: Vec<InsightEntry>,
}

/// Minerals ordered by name and insights newest first.
///
/// An insight whose mineral is gone is listed under [`UNKNOWN_MINERAL`].
#[must_use]
pub fn insight_board(minerals: &[Mineral], insights: &[MineralInsight]) -> InsightBoard {
    let mineral_names: HashMap<RecordId, &str> = minerals
        .iter()
        .map(|mineral| (mineral.id, mineral.name.as_str()))
        .collect();
    let mut entries: Vec<InsightEntry> = insights
        .iter()
        .map(|insight| InsightEntry {
            insight_id: insight.id,
            mineral_id: insight.mineral_id,
            mineral_name: mineral_names
                .get(&insight.mineral_id)
                .copied()
                .unwrap_or(UNKNOWN_MINERAL)
                .to_owned(),
            insight: insight.insight.clone(),
        })
        .collect();
    entries.sort_by(|a, b| b.insight_id.cmp(&a.insight_id));

    let mut minerals = minerals.to_vec();
    minerals.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    InsightBoard {
        minerals,
        insights: entries,
    }
}
