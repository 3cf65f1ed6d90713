//! The resource access pattern shared by every registry.
//!
//! A registry is described once by implementing [`Resource`]; listing,
//! lookup, creation, partial update and deletion are then provided generically
//! by [`super::service::ResourceService`] over a
//! [`super::repo::ResourceRepository`].

use std::fmt;

use chrono::NaiveDate;

use super::validation::{ValidationErrors, Validator, ViolationCode};

/// Storage-assigned record identity.
pub type RecordId = i32;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 500;

/// A fixed set of values used as a record's status or condition.
pub trait Categorical: Copy + fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Every value, in declaration order.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == raw)
    }
}

/// Type-level description of one registry.
pub trait Resource: Send + Sync + 'static {
    /// Name used in not-found messages, e.g. `"Bridge with id 7 not found"`.
    const KIND: &'static str;

    /// Stored record, including identity and timestamps.
    type Record: Clone + fmt::Debug + Send + Sync + 'static;
    /// Unvalidated creation input.
    type Draft: Send + 'static;
    /// Creation input with every required field present and within bounds.
    type New: Clone + fmt::Debug + Send + Sync + 'static;
    /// Unvalidated partial-update input.
    type Changes: Default + Send + 'static;
    /// Partial update that passed validation.
    type Patch: Clone + fmt::Debug + Default + Send + Sync + 'static;
    /// The field used for exact-match filtering.
    type Category: Categorical;

    fn id(record: &Self::Record) -> RecordId;

    /// # Errors
    /// Returns every violated rule when the draft is incomplete or out of bounds.
    fn validate_new(draft: Self::Draft) -> Result<Self::New, ValidationErrors>;

    /// # Errors
    /// Returns every violated rule of the requested changes.
    fn validate_changes(changes: Self::Changes) -> Result<Self::Patch, ValidationErrors>;
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Check raw `skip`/`limit` query values; missing values take the defaults.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn checked(v: &mut Validator, skip: Option<i64>, limit: Option<i64>) -> Option<Self> {
        let skip = match skip.map(u64::try_from) {
            None => Some(0),
            Some(Ok(skip)) => Some(skip),
            Some(Err(_)) => {
                v.reject(
                    "skip",
                    ViolationCode::OutOfRange,
                    "must be greater than or equal to 0",
                );
                None
            }
        };
        let limit = match limit.map(u64::try_from) {
            None => Some(DEFAULT_LIMIT),
            Some(Ok(limit)) if (1..=MAX_LIMIT).contains(&limit) => Some(limit),
            Some(_) => {
                v.reject(
                    "limit",
                    ViolationCode::OutOfRange,
                    format!("must be between 1 and {MAX_LIMIT}"),
                );
                None
            }
        };
        Some(Self {
            skip: skip?,
            limit: limit?,
        })
    }
}

/// Inclusive calendar-date bounds; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Filters and window for a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<C> {
    pub category: Option<C>,
    pub dates: DateRange,
    pub search: Option<String>,
    pub page: PageRequest,
}

impl<C> Default for ListQuery<C> {
    fn default() -> Self {
        Self {
            category: None,
            dates: DateRange::default(),
            search: None,
            page: PageRequest::default(),
        }
    }
}

impl<C> ListQuery<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: C) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.dates = DateRange { from, to };
        self
    }

    #[must_use]
    pub fn with_page(mut self, skip: u64, limit: u64) -> Self {
        self.page = PageRequest { skip, limit };
        self
    }

    /// The search term, treating an empty string as no search.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

/// One page of records plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_defaults() {
        let mut v = Validator::new();
        let page = PageRequest::checked(&mut v, None, None).unwrap();
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.limit, 100);
        assert!(v.is_clean());
    }

    #[test]
    fn page_request_rejects_out_of_range_values() {
        let mut v = Validator::new();
        assert!(PageRequest::checked(&mut v, Some(-1), Some(0)).is_none());
        let errors = v.into_errors();
        assert!(errors.has("skip", ViolationCode::OutOfRange));
        assert!(errors.has("limit", ViolationCode::OutOfRange));
    }

    #[test]
    fn page_request_accepts_bounds() {
        let mut v = Validator::new();
        let page = PageRequest::checked(&mut v, Some(0), Some(500)).unwrap();
        assert_eq!(page.limit, 500);
        assert!(PageRequest::checked(&mut v, Some(0), Some(501)).is_none());
        assert!(PageRequest::checked(&mut v, Some(3), Some(1)).is_some());
    }

    #[test]
    fn empty_search_is_ignored() {
        let query: ListQuery<()> = ListQuery::new().with_search("");
        assert_eq!(query.search_term(), None);
        let query: ListQuery<()> = ListQuery::new().with_search("main");
        assert_eq!(query.search_term(), Some("main"));
    }
}
