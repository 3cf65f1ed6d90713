//! Binding between a domain [`Resource`] and its SeaORM table.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, EntityTrait, FromQueryResult,
    IntoActiveModel, ModelTrait, Set, Value,
};

use crate::domain::error::DomainError;
use crate::domain::patch::FieldPatch;
use crate::domain::resource::Resource;

pub type ColumnOf<T> = <<T as ResourceTable>::Entity as EntityTrait>::Column;

/// Everything the generic repository needs to know about one table.
pub trait ResourceTable: Resource {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;

    fn id_column() -> ColumnOf<Self>;

    /// Column holding the categorical value as text.
    fn category_column() -> ColumnOf<Self>;

    /// The two text columns matched by a search term.
    fn search_columns() -> [ColumnOf<Self>; 2];

    /// Date column bounded by a list date range, if the table has one.
    fn date_column() -> Option<ColumnOf<Self>> {
        None
    }

    /// Insertable row with both timestamps set to `now`.
    fn new_row(new: Self::New, now: DateTime<Utc>) -> Self::ActiveModel;

    /// Row with the patched fields set and `updated_at` refreshed.
    fn patched_row(
        model: Self::Model,
        patch: Self::Patch,
        now: DateTime<Utc>,
    ) -> Self::ActiveModel;

    /// # Errors
    /// Returns [`DomainError::Database`] when the stored row holds a value
    /// the domain does not accept.
    fn to_record(model: Self::Model) -> Result<Self::Record, DomainError>;
}

/// Set `slot` when a new value is present.
pub fn assign<V: Into<Value>>(slot: &mut ActiveValue<V>, value: Option<V>) {
    if let Some(value) = value {
        *slot = Set(value);
    }
}

/// Set a nullable `slot` unless the patch leaves it unchanged.
pub fn assign_nullable<V>(slot: &mut ActiveValue<Option<V>>, patch: FieldPatch<V>)
where
    Option<V>: Into<Value>,
{
    if let Some(value) = patch.into_nullable() {
        *slot = Set(value);
    }
}
