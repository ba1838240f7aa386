//! Diesel table definitions for the SQLite schema.
//!
//! These must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Built-in and administrator-defined roles.
    roles (id) {
        id -> Integer,
        name -> Text,
        permissions -> Text,
    }
}

diesel::table! {
    /// User accounts; `password_hash` holds an Argon2 PHC string.
    users (id) {
        id -> Integer,
        username -> Text,
        password_hash -> Text,
        role_id -> Integer,
    }
}

diesel::table! {
    minerals (id) {
        id -> Integer,
        name -> Text,
        description -> Text,
        market_price_usd_per_tonne -> Double,
    }
}

diesel::table! {
    countries (id) {
        id -> Integer,
        name -> Text,
        gdp_billion_usd -> Double,
        mining_revenue_billion_usd -> Double,
        key_projects -> Text,
    }
}

diesel::table! {
    sites (id) {
        id -> Integer,
        name -> Text,
        country_id -> Integer,
        mineral_id -> Integer,
        latitude -> Double,
        longitude -> Double,
        production_tonnes -> Double,
    }
}

diesel::table! {
    production_stats (id) {
        id -> Integer,
        year -> Integer,
        country_id -> Integer,
        mineral_id -> Integer,
        production_tonnes -> Double,
        export_value_billion_usd -> Double,
    }
}

diesel::table! {
    /// Yearly prices keyed loosely by mineral name.
    mineral_prices (id) {
        id -> Integer,
        mineral_name -> Text,
        year -> Integer,
        price_usd_per_tonne -> Double,
    }
}

diesel::table! {
    /// Researcher notes; `mineral_id` is not enforced.
    mineral_insights (id) {
        id -> Integer,
        mineral_id -> Integer,
        insight -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    roles,
    users,
    minerals,
    countries,
    sites,
    production_stats,
    mineral_prices,
    mineral_insights,
);
