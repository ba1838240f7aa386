//! Diesel-backed CRUD repositories for the reference tables.
//!
//! Every table shares the same five statements, so the adapters are
//! generated by [`diesel_entity_repository!`]. Tables with extra lookups
//! (users, prices) add their own trait impls below the generated code.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    CountryRow, CountryWrite, MineralInsightRow, MineralInsightWrite, MineralPriceRow,
    MineralPriceWrite, MineralRow, MineralWrite, ProductionStatRow, ProductionStatWrite, RoleRow,
    RoleWrite, SiteRow, SiteWrite, UserRow, UserWrite,
};
use super::pool::DbPool;
use super::schema::{
    countries, mineral_insights, mineral_prices, minerals, production_stats, roles, sites, users,
};
use crate::domain::ports::{
    EntityRepository, PriceSeedRepository, RepositoryError, UserRepository,
};
use crate::domain::{
    Country, Mineral, MineralInsight, MineralPrice, MineralPriceDraft, ProductionStat, Record,
    RecordId, Role, Site, User,
};

/// Generate a pooled repository struct and its `EntityRepository` impl.
///
/// The generated adapter:
/// - lists rows ordered by primary key
/// - inserts and updates through one write struct built with `From<&Draft>`
/// - reads the stored row back with `RETURNING`
/// - reports a missing id on edit and delete as `RepositoryError::NotFound`
macro_rules! diesel_entity_repository {
    (
        $(#[$meta:meta])*
        $repo:ident {
            record: $record:ty,
            row: $row:ty,
            write: $write:ty,
            table: $table:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $repo {
            pool: DbPool,
        }

        impl $repo {
            /// Create a repository over `pool`.
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl EntityRepository<$record> for $repo {
            async fn list(&self) -> Result<Vec<$record>, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<$row> = $table::table
                    .order($table::id.asc())
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(rows.into_iter().map(<$record>::from).collect())
            }

            async fn get(&self, id: RecordId) -> Result<Option<$record>, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = $table::table
                    .find(id.get())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                Ok(row.map(<$record>::from))
            }

            async fn add(
                &self,
                draft: &<$record as Record>::Draft,
            ) -> Result<$record, RepositoryError> {
                let values = <$write>::from(draft);
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: $row = diesel::insert_into($table::table)
                    .values(&values)
                    .returning(<$row>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(<$record>::from(row))
            }

            async fn edit(
                &self,
                id: RecordId,
                draft: &<$record as Record>::Draft,
            ) -> Result<$record, RepositoryError> {
                let values = <$write>::from(draft);
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = diesel::update($table::table.find(id.get()))
                    .set(&values)
                    .returning(<$row>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(<$record>::from)
                    .ok_or_else(|| RepositoryError::missing::<$record>(id))
            }

            async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let affected = diesel::delete($table::table.find(id.get()))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                if affected == 0 {
                    return Err(RepositoryError::missing::<$record>(id));
                }
                Ok(())
            }
        }
    };
}

diesel_entity_repository! {
    /// Role table adapter.
    DieselRoleRepository { record: Role, row: RoleRow, write: RoleWrite<'_>, table: roles }
}

diesel_entity_repository! {
    /// User table adapter. Also implements [`UserRepository`].
    DieselUserRepository { record: User, row: UserRow, write: UserWrite<'_>, table: users }
}

diesel_entity_repository! {
    DieselMineralRepository {
        record: Mineral,
        row: MineralRow,
        write: MineralWrite<'_>,
        table: minerals,
    }
}

diesel_entity_repository! {
    DieselCountryRepository {
        record: Country,
        row: CountryRow,
        write: CountryWrite<'_>,
        table: countries,
    }
}

diesel_entity_repository! {
    DieselSiteRepository { record: Site, row: SiteRow, write: SiteWrite<'_>, table: sites }
}

diesel_entity_repository! {
    DieselProductionStatRepository {
        record: ProductionStat,
        row: ProductionStatRow,
        write: ProductionStatWrite,
        table: production_stats,
    }
}

diesel_entity_repository! {
    /// Price table adapter. Also implements [`PriceSeedRepository`].
    DieselMineralPriceRepository {
        record: MineralPrice,
        row: MineralPriceRow,
        write: MineralPriceWrite<'_>,
        table: mineral_prices,
    }
}

diesel_entity_repository! {
    /// Researcher insight adapter.
    DieselMineralInsightRepository {
        record: MineralInsight,
        row: MineralInsightRow,
        write: MineralInsightWrite<'_>,
        table: mineral_insights,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RoleRow> = roles::table
            .filter(roles::name.eq(name))
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Role::from))
    }
}

#[async_trait]
impl PriceSeedRepository for DieselMineralPriceRepository {
    async fn insert_missing(&self, rows: &[MineralPriceDraft]) -> Result<usize, RepositoryError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let mut inserted = 0;
                for draft in rows {
                    let existing: Option<i32> = mineral_prices::table
                        .filter(mineral_prices::mineral_name.eq(draft.mineral_name.as_str()))
                        .filter(mineral_prices::year.eq(draft.year))
                        .select(mineral_prices::id)
                        .first(conn)
                        .await
                        .optional()?;
                    if existing.is_some() {
                        continue;
                    }
                    diesel::insert_into(mineral_prices::table)
                        .values(MineralPriceWrite::from(draft))
                        .execute(conn)
                        .await?;
                    inserted += 1;
                }
                Ok::<usize, diesel::result::Error>(inserted)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
