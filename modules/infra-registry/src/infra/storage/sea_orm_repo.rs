//! SeaORM-backed implementation of the repository port, shared by every table.
//!
//! List queries apply the category filter, the inclusive date range and the
//! case-insensitive search in that order, count the filtered set, then page it
//! in ascending id order. Create and update each run in their own transaction.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, TransactionTrait,
};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::repo::ResourceRepository;
use crate::domain::resource::{Categorical, ListQuery, Page, RecordId};
use crate::infra::storage::db::db_err;
use crate::infra::storage::table::ResourceTable;

/// Generic SeaORM repository; `T` selects the table.
pub struct SeaOrmRepository<T> {
    db: DatabaseConnection,
    _table: PhantomData<fn() -> T>,
}

impl<T> Clone for SeaOrmRepository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _table: PhantomData,
        }
    }
}

impl<T> SeaOrmRepository<T> {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _table: PhantomData,
        }
    }
}

/// `%term%` with LIKE wildcards in `term` escaped by a backslash.
///
/// Case is left alone: both sides are folded by the database's `LOWER`, so a
/// term always matches its own stored text.
fn contains_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// `LOWER(col) LIKE LOWER(pattern) ESCAPE '\'`
fn lower_like(col: SimpleExpr, pattern: String) -> SimpleExpr {
    Expr::cust_with_exprs(
        "LOWER($1) LIKE LOWER($2) ESCAPE '\\'",
        [col, Expr::val(pattern).into()],
    )
}

impl<T: ResourceTable> SeaOrmRepository<T> {
    fn by_id(id: RecordId) -> Condition {
        Condition::all().add(Expr::col(T::id_column()).eq(id))
    }

    fn filtered(query: &ListQuery<T::Category>) -> Select<T::Entity> {
        let mut cond = Condition::all();

        if let Some(category) = query.category {
            cond = cond.add(Expr::col(T::category_column()).eq(category.as_str()));
        }

        if let Some(date_col) = T::date_column()
            && !query.dates.is_open()
        {
            if let Some(from) = query.dates.from {
                cond = cond.add(Expr::col(date_col).gte(from));
            }
            if let Some(to) = query.dates.to {
                cond = cond.add(Expr::col(date_col).lte(to));
            }
        }

        if let Some(term) = query.search_term() {
            let pattern = contains_pattern(term);
            let any = T::search_columns()
                .into_iter()
                .fold(Condition::any(), |any, col| {
                    any.add(lower_like(Expr::col(col).into(), pattern.clone()))
                });
            cond = cond.add(any);
        }

        T::Entity::find().filter(cond)
    }
}

#[async_trait]
impl<T: ResourceTable> ResourceRepository<T> for SeaOrmRepository<T> {
    #[instrument(skip_all, fields(resource = T::KIND))]
    async fn list(&self, query: &ListQuery<T::Category>) -> Result<Page<T::Record>, DomainError> {
        let select = Self::filtered(query);

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let rows = select
            .order_by_asc(T::id_column())
            .offset(query.page.skip)
            .limit(query.page.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!(total, returned = rows.len(), "Fetched page");

        let items = rows
            .into_iter()
            .map(T::to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page { items, total })
    }

    async fn get(&self, id: RecordId) -> Result<Option<T::Record>, DomainError> {
        let found = T::Entity::find()
            .filter(Self::by_id(id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(T::to_record).transpose()
    }

    async fn create(&self, new: T::New) -> Result<T::Record, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = T::new_row(new, Utc::now())
            .insert(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        T::to_record(model)
    }

    async fn update(
        &self,
        id: RecordId,
        patch: T::Patch,
    ) -> Result<Option<T::Record>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(current) = T::Entity::find()
            .filter(Self::by_id(id))
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            // dropping the transaction rolls it back
            return Ok(None);
        };

        let model = T::patched_row(current, patch, Utc::now())
            .update(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        T::to_record(model).map(Some)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, DomainError> {
        let result = T::Entity::delete_many()
            .filter(Self::by_id(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_keeps_case_and_escapes_wildcards() {
        assert_eq!(contains_pattern("Main"), "%Main%");
        assert_eq!(contains_pattern("\u{c9}lan"), "%\u{c9}lan%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
