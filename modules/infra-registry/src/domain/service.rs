use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::error::DomainError;
use super::repo::ResourceRepository;
use super::resource::{ListQuery, Page, RecordId, Resource};

/// Business operations of one registry.
///
/// Inputs are validated before the repository is touched, and repository
/// absence is turned into [`DomainError::NotFound`].
pub struct ResourceService<R: Resource> {
    repo: Arc<dyn ResourceRepository<R>>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(repo: Arc<dyn ResourceRepository<R>>) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns [`DomainError::Database`] when storage fails.
    #[instrument(skip(self, query), fields(resource = R::KIND))]
    pub async fn list(&self, query: ListQuery<R::Category>) -> Result<Page<R::Record>, DomainError> {
        debug!(
            skip = query.page.skip,
            limit = query.page.limit,
            "Listing records"
        );

        let page = self.repo.list(&query).await?;

        debug!(returned = page.items.len(), total = page.total, "Listed records");
        Ok(page)
    }

    /// # Errors
    /// Returns [`DomainError::NotFound`] for an unknown id.
    #[instrument(skip(self), fields(resource = R::KIND))]
    pub async fn get(&self, id: RecordId) -> Result<R::Record, DomainError> {
        debug!("Getting record by id");

        let found = self.repo.get(id).await?;

        found.ok_or_else(|| DomainError::not_found(R::KIND, id))
    }

    /// # Errors
    /// Returns [`DomainError::Validation`] listing every violated rule.
    #[instrument(skip(self, draft), fields(resource = R::KIND))]
    pub async fn create(&self, draft: R::Draft) -> Result<R::Record, DomainError> {
        let new = R::validate_new(draft)?;

        let record = self.repo.create(new).await?;

        info!(id = R::id(&record), "Created record");
        Ok(record)
    }

    /// # Errors
    /// Returns [`DomainError::Validation`] for invalid changes (checked before
    /// the lookup) and [`DomainError::NotFound`] for an unknown id.
    #[instrument(skip(self, changes), fields(resource = R::KIND))]
    pub async fn update(&self, id: RecordId, changes: R::Changes) -> Result<R::Record, DomainError> {
        let patch = R::validate_changes(changes)?;

        let updated = self
            .repo
            .update(id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found(R::KIND, id))?;

        info!("Updated record");
        Ok(updated)
    }

    /// # Errors
    /// Returns [`DomainError::NotFound`] for an unknown id.
    #[instrument(skip(self), fields(resource = R::KIND))]
    pub async fn delete(&self, id: RecordId) -> Result<(), DomainError> {
        let deleted = self.repo.delete(id).await?;

        if !deleted {
            return Err(DomainError::not_found(R::KIND, id));
        }

        info!("Deleted record");
        Ok(())
    }
}
