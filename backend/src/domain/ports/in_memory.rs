//! In-memory port implementations.
//!
//! These back unit tests and HTTP handler tests so they run without a
//! database. They honour the same contracts as the Diesel adapters: ids are
//! assigned in insertion order, lists are ordered by id, unique columns are
//! enforced, and edits or deletes of unknown ids fail with `NotFound`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{EntityRepository, PriceSeedRepository, RepositoryError, UserRepository};
use crate::domain::{
    AccessRole, MineralPrice, MineralPriceDraft, Record, RecordId, Role, User,
};

struct StoredRow<R> {
    record: R,
    unique_key: Option<String>,
}

struct TableState<R> {
    rows: BTreeMap<RecordId, StoredRow<R>>,
    next_id: i32,
}

/// A single reference table held in memory.
pub struct InMemoryEntityRepository<R: Record> {
    state: Mutex<TableState<R>>,
}

impl<R: Record> Default for InMemoryEntityRepository<R> {
    fn default() -> Self {
        Self {
            state: Mutex::new(TableState {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<R: Record> InMemoryEntityRepository<R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with `drafts`, assigning ids from 1.
    pub fn with_drafts(drafts: impl IntoIterator<Item = R::Draft>) -> Self {
        let repo = Self::default();
        if let Ok(mut state) = repo.state.lock() {
            for draft in drafts {
                let id = RecordId::new(state.next_id);
                state.next_id += 1;
                let unique_key = R::unique_key(&draft).map(str::to_owned);
                state.rows.insert(
                    id,
                    StoredRow {
                        record: R::from_draft(id, draft),
                        unique_key,
                    },
                );
            }
        }
        repo
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TableState<R>>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::connection("in-memory table lock poisoned"))
    }

    fn check_unique(
        state: &TableState<R>,
        key: Option<&str>,
        except: Option<RecordId>,
    ) -> Result<(), RepositoryError> {
        let Some(key) = key else {
            return Ok(());
        };
        let clash = state
            .rows
            .iter()
            .any(|(id, row)| Some(*id) != except && row.unique_key.as_deref() == Some(key));
        if clash {
            return Err(RepositoryError::constraint(format!(
                "{} '{key}' already exists",
                R::ENTITY.label()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> EntityRepository<R> for InMemoryEntityRepository<R> {
    async fn list(&self) -> Result<Vec<R>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.values().map(|row| row.record.clone()).collect())
    }

    async fn get(&self, id: RecordId) -> Result<Option<R>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.get(&id).map(|row| row.record.clone()))
    }

    async fn add(&self, draft: &R::Draft) -> Result<R, RepositoryError> {
        let mut state = self.lock()?;
        let unique_key = R::unique_key(draft).map(str::to_owned);
        Self::check_unique(&state, unique_key.as_deref(), None)?;
        let id = RecordId::new(state.next_id);
        state.next_id += 1;
        let record = R::from_draft(id, draft.clone());
        state.rows.insert(
            id,
            StoredRow {
                record: record.clone(),
                unique_key,
            },
        );
        Ok(record)
    }

    async fn edit(&self, id: RecordId, draft: &R::Draft) -> Result<R, RepositoryError> {
        let mut state = self.lock()?;
        if !state.rows.contains_key(&id) {
            return Err(RepositoryError::missing::<R>(id));
        }
        let unique_key = R::unique_key(draft).map(str::to_owned);
        Self::check_unique(&state, unique_key.as_deref(), Some(id))?;
        let record = R::from_draft(id, draft.clone());
        state.rows.insert(
            id,
            StoredRow {
                record: record.clone(),
                unique_key,
            },
        );
        Ok(record)
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::missing::<R>(id))
    }
}

/// Users plus the built-in role rows.
pub struct InMemoryUserRepository {
    users: InMemoryEntityRepository<User>,
    roles: Vec<Role>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        let roles = [
            AccessRole::Administrator,
            AccessRole::Investor,
            AccessRole::Researcher,
        ]
        .into_iter()
        .map(|role| Role {
            id: role.id(),
            name: role.display_name().to_owned(),
            permissions: String::new(),
        })
        .collect();
        Self {
            users: InMemoryEntityRepository::new(),
            roles,
        }
    }
}

impl InMemoryUserRepository {
    /// Repository seeded with the three built-in roles and no users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the role rows, e.g. to simulate a missing role.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }
}

#[async_trait]
impl EntityRepository<User> for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        self.users.list().await
    }

    async fn get(&self, id: RecordId) -> Result<Option<User>, RepositoryError> {
        self.users.get(id).await
    }

    async fn add(&self, draft: &<User as Record>::Draft) -> Result<User, RepositoryError> {
        self.users.add(draft).await
    }

    async fn edit(
        &self,
        id: RecordId,
        draft: &<User as Record>::Draft,
    ) -> Result<User, RepositoryError> {
        self.users.edit(id, draft).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.users.delete(id).await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.list().await?;
        Ok(users.into_iter().find(|user| user.username == username))
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        Ok(self.roles.iter().find(|role| role.name == name).cloned())
    }
}

#[async_trait]
impl PriceSeedRepository for InMemoryEntityRepository<MineralPrice> {
    async fn insert_missing(&self, rows: &[MineralPriceDraft]) -> Result<usize, RepositoryError> {
        let mut inserted = 0;
        for draft in rows {
            let existing = self.list().await?;
            let present = existing
                .iter()
                .any(|row| row.mineral_name == draft.mineral_name && row.year == draft.year);
            if !present {
                self.add(draft).await?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
