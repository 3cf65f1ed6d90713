use async_trait::async_trait;

use super::error::DomainError;
use super::resource::{ListQuery, Page, RecordId, Resource};

/// Storage contract for one registry.
///
/// Absence is a normal outcome: `get` and `update` return `None` and `delete`
/// returns `false` for unknown ids. `Err` is reserved for storage failures.
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Filtered page plus the filtered total before pagination.
    async fn list(&self, query: &ListQuery<R::Category>) -> Result<Page<R::Record>, DomainError>;

    async fn get(&self, id: RecordId) -> Result<Option<R::Record>, DomainError>;

    /// Assigns identity and both timestamps.
    async fn create(&self, new: R::New) -> Result<R::Record, DomainError>;

    /// Applies only the fields present in `patch` and refreshes `updated_at`.
    async fn update(
        &self,
        id: RecordId,
        patch: R::Patch,
    ) -> Result<Option<R::Record>, DomainError>;

    async fn delete(&self, id: RecordId) -> Result<bool, DomainError>;
}
