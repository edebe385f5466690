//! Query parameters and results for `find`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE: u64 = 1;

/// Default number of items per page
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    Asc,
    Desc,
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDir::Asc => write!(f, "ASC"),
            SortDir::Desc => write!(f, "DESC"),
        }
    }
}

/// Returned when a sort direction is neither `ASC` nor `DESC`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid sort direction `{0}`, expected ASC or DESC")]
pub struct ParseSortDirError(String);

impl FromStr for SortDir {
    type Err = ParseSortDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDir::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDir::Desc)
        } else {
            Err(ParseSortDirError(s.to_string()))
        }
    }
}

/// Query parameters for `find`.
///
/// Every field is optional. Missing or zero `page` / `per_page` fall back to
/// [`DEFAULT_PAGE`] / [`DEFAULT_PER_PAGE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindInput {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDir>,
    pub filter: Option<String>,
}

impl FindInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>, sort_dir: SortDir) -> Self {
        self.sort = Some(sort.into());
        self.sort_dir = Some(sort_dir);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Page actually queried (1-indexed)
    pub fn effective_page(&self) -> u64 {
        self.page.filter(|page| *page >= 1).unwrap_or(DEFAULT_PAGE)
    }

    /// Page size actually used
    pub fn effective_per_page(&self) -> u64 {
        self.per_page
            .filter(|per_page| *per_page >= 1)
            .unwrap_or(DEFAULT_PER_PAGE)
    }
}

/// One page of `find` results plus the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindOutput<M> {
    /// Page window
    pub items: Vec<M>,
    pub per_page: u64,
    /// Number of records matching the filter, before pagination
    pub total: u64,
    pub current_page: u64,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDir>,
    pub filter: Option<String>,
}

impl<M> FindOutput<M> {
    /// Number of pages needed to show `total` records
    pub fn total_pages(&self) -> u64 {
        if self.per_page > 0 {
            self.total.div_ceil(self.per_page)
        } else {
            0
        }
    }
}
