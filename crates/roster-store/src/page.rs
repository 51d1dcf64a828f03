//! Pagination over the store's records.
//!
//! Pages are 1-indexed. A request whose first row lies at or beyond the
//! number of stored records is out of range. That includes page 1 of an
//! empty store.

use roster_types::Employee;
use serde::Serialize;

/// Page used when the caller supplies none, or a non-positive one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller supplies none, or a non-positive one.
pub const DEFAULT_LIMIT: u64 = 50;

/// A validated page request. Both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a request, replacing zero values with the defaults.
    pub const fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Build a request from raw caller input.
    ///
    /// Absent and non-positive values fall back to [`DEFAULT_PAGE`] and
    /// [`DEFAULT_LIMIT`].
    pub fn from_raw(page: Option<i64>, limit: Option<i64>) -> Self {
        let positive = |v: Option<i64>| v.and_then(|v| u64::try_from(v).ok()).unwrap_or(0);
        Self::new(positive(page), positive(limit))
    }

    /// The 1-indexed page number.
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of records on the page.
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Index of the first record on this page within the sorted records.
    ///
    /// Saturates instead of overflowing, which lands far beyond any real
    /// record count.
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Cut this page out of `records`, which must already be sorted by id.
    pub(crate) fn slice(self, records: Vec<Employee>) -> Result<EmployeePage, PageOutOfRange> {
        let total = records.len();
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        if start >= total {
            return Err(PageOutOfRange {
                page: self.page,
                limit: self.limit,
                total,
            });
        }
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);

        let employees = records.into_iter().skip(start).take(take).collect();

        Ok(EmployeePage {
            page: self.page,
            limit: self.limit,
            total,
            employees,
        })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// One page of employees, sorted by id, with the request echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePage {
    /// The 1-indexed page number that was served.
    pub page: u64,
    /// The page size that was applied.
    pub limit: u64,
    /// Number of records in the whole store at the time of the call.
    pub total: usize,
    /// The records on this page, in ascending id order.
    pub employees: Vec<Employee>,
}

/// The requested page lies entirely beyond the stored records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("page {page} (limit {limit}) is beyond the {total} stored records")]
pub struct PageOutOfRange {
    /// The requested page.
    pub page: u64,
    /// The requested page size.
    pub limit: u64,
    /// Number of records in the store.
    pub total: usize,
}
