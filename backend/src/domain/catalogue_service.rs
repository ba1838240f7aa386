//! Administrator CRUD over the reference tables.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::ports::{CatalogueAdmin, EntityRepository, RepositoryError};
use super::{Error, Record, RecordId, RecordValidationError, Validate};

/// Validating CRUD service for one table.
pub struct CatalogueService<R: Record> {
    repo: Arc<dyn EntityRepository<R>>,
}

impl<R: Record> CatalogueService<R> {
    /// Create a service over `repo`.
    pub fn new(repo: Arc<dyn EntityRepository<R>>) -> Self {
        Self { repo }
    }
}

impl<R: Record> Clone for CatalogueService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

#[async_trait]
impl<R: Record> CatalogueAdmin<R> for CatalogueService<R> {
    async fn list(&self) -> Result<Vec<R>, Error> {
        self.repo.list().await.map_err(map_repository_error)
    }

    async fn add(&self, draft: R::Draft) -> Result<R, Error> {
        draft.validate().map_err(map_validation_error)?;
        let record = self.repo.add(&draft).await.map_err(map_repository_error)?;
        info!(entity = %R::ENTITY, id = %record.id(), "record added");
        Ok(record)
    }

    async fn edit(&self, id: RecordId, draft: R::Draft) -> Result<R, Error> {
        draft.validate().map_err(map_validation_error)?;
        let record = self
            .repo
            .edit(id, &draft)
            .await
            .map_err(map_repository_error)?;
        info!(entity = %R::ENTITY, %id, "record updated");
        Ok(record)
    }

    async fn delete(&self, id: RecordId) -> Result<(), Error> {
        self.repo.delete(id).await.map_err(map_repository_error)?;
        info!(entity = %R::ENTITY, %id, "record deleted");
        Ok(())
    }
}

/// Translate adapter failures into domain errors.
///
/// Connection problems surface as `ServiceUnavailable`; query failures are
/// internal and their text is redacted at the HTTP boundary.
pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("database unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("database error: {message}"))
        }
        RepositoryError::Constraint { message } => Error::conflict(message),
        RepositoryError::NotFound { entity, id } => Error::not_found(format!("{entity} {id} not found")),
    }
}

/// Reject an invalid draft with the offending field in the details.
pub(crate) fn map_validation_error(error: RecordValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": error.field() }))
}

#[cfg(test)]
mod tests {
    //! Catalogue behaviour over the in-memory adapter.
    use super::*;
    use crate::domain::ports::InMemoryEntityRepository;
    use crate::domain::{Country, CountryDraft, ErrorCode};
    use rstest::{fixture, rstest};

    fn draft(name: &str) -> CountryDraft {
        CountryDraft {
            name: name.to_owned(),
            gdp_billion_usd: 29.0,
            mining_revenue_billion_usd: 4.5,
            key_projects: "Kansanshi".to_owned(),
        }
    }

    #[fixture]
    fn service() -> CatalogueService<Country> {
        CatalogueService::new(Arc::new(InMemoryEntityRepository::<Country>::new()))
    }

    #[rstest]
    #[tokio::test]
    async fn add_then_edit_overwrites_row(service: CatalogueService<Country>) {
        let added = service.add(draft("Zambia")).await.expect("add");
        let edited = service
            .edit(added.id, draft("Republic of Zambia"))
            .await
            .expect("edit");
        assert_eq!(edited.id, added.id);
        let rows = service.list().await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Republic of Zambia");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_draft_is_rejected_before_storage(service: CatalogueService<Country>) {
        let err = service.add(draft("  ")).await.expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": "name" })));
        assert!(service.list().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_ids_are_not_found(service: CatalogueService<Country>) {
        let missing = RecordId::new(5);
        let edit = service.edit(missing, draft("Chile")).await.expect_err("edit");
        let delete = service.delete(missing).await.expect_err("delete");
        assert_eq!(edit.code(), ErrorCode::NotFound);
        assert_eq!(delete.code(), ErrorCode::NotFound);
        assert_eq!(delete.message(), "country 5 not found");
    }

    #[rstest]
    #[case(RepositoryError::connection("pool timed out"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::constraint("duplicate"), ErrorCode::Conflict)]
    #[case(RepositoryError::not_found("site", 3), ErrorCode::NotFound)]
    fn repository_errors_map_to_codes(#[case] error: RepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_repository_error(error).code(), code);
    }
}
