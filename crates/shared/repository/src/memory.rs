//! In-memory repository - query engine over an ordered record sequence.
//!
//! Records live in a `Vec` in insertion order, owned by the repository behind
//! a `RwLock`. Every operation runs inside a single lock acquisition, so no
//! caller ever sees a half-applied mutation.
//!
//! `find` is a fixed pipeline:
//! 1. [`apply_filter`](InMemoryRepository::apply_filter) - domain predicate,
//!    skipped when there is no filter text
//! 2. [`apply_sort`](InMemoryRepository::apply_sort) - declared fields only,
//!    skipped otherwise
//! 3. [`apply_paginate`](InMemoryRepository::apply_paginate) - page window,
//!    clamped to the filtered set

use std::borrow::Cow;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::base::{BaseRepository, Model, RecordFilter};
use crate::error::{RepositoryError, RepositoryResult};
use crate::field::SortableFields;
use crate::query::{FindInput, FindOutput, SortDir};

/// Generic in-memory repository.
pub struct InMemoryRepository<M, F> {
    items: RwLock<Vec<M>>,
    filter: F,
    sortable: SortableFields<M>,
}

impl<M, F> InMemoryRepository<M, F>
where
    M: Model,
    F: RecordFilter<M>,
{
    /// Create an empty repository
    pub fn new(filter: F, sortable: SortableFields<M>) -> Self {
        Self::with_items(filter, sortable, Vec::new())
    }

    /// Create a repository holding `items` as-is, in the given order
    pub fn with_items(filter: F, sortable: SortableFields<M>, items: Vec<M>) -> Self {
        Self {
            items: RwLock::new(items),
            filter,
            sortable,
        }
    }

    /// Snapshot of every stored record, in sequence order
    pub async fn items(&self) -> Vec<M> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// First record in sequence order satisfying `predicate`
    pub async fn find_first<P>(&self, predicate: P) -> Option<M>
    where
        P: Fn(&M) -> bool + Send,
    {
        self.items
            .read()
            .await
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    /// Filter stage.
    ///
    /// Without filter text (absent or empty) the input is returned borrowed
    /// and the predicate is never called.
    pub fn apply_filter<'a>(&self, items: &'a [M], filter: Option<&str>) -> Cow<'a, [M]> {
        match filter.filter(|text| !text.is_empty()) {
            None => Cow::Borrowed(items),
            Some(text) => Cow::Owned(
                items
                    .iter()
                    .filter(|item| self.filter.matches(item, text))
                    .cloned()
                    .collect(),
            ),
        }
    }

    /// Sort stage.
    ///
    /// Sorts only when `sort` names a declared sortable field; otherwise the
    /// input comes back untouched. Ascending for `ASC`, descending for
    /// anything else. Borrowed input is copied before sorting.
    pub fn apply_sort<'a>(
        &self,
        items: Cow<'a, [M]>,
        sort: Option<&str>,
        sort_dir: Option<SortDir>,
    ) -> Cow<'a, [M]> {
        let Some(accessor) = sort.and_then(|name| self.sortable.get(name)) else {
            return items;
        };

        let mut sorted = items.into_owned();
        sorted.sort_by(|a, b| {
            let ordering = accessor(a).cmp(&accessor(b));
            match sort_dir {
                Some(SortDir::Asc) => ordering,
                _ => ordering.reverse(),
            }
        });

        Cow::Owned(sorted)
    }

    /// Paginate stage: `[(page - 1) * per_page, page * per_page)` clamped to
    /// `items`. A page past the end is empty.
    pub fn apply_paginate(items: &[M], page: u64, per_page: u64) -> Vec<M> {
        let start = page.saturating_sub(1).saturating_mul(per_page);
        let start = usize::try_from(start)
            .unwrap_or(usize::MAX)
            .min(items.len());
        let end = start
            .saturating_add(usize::try_from(per_page).unwrap_or(usize::MAX))
            .min(items.len());

        items[start..end].to_vec()
    }

    fn position(items: &[M], id: Uuid) -> RepositoryResult<usize> {
        items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(RepositoryError::NotFound(id))
    }
}

#[async_trait]
impl<M, F> BaseRepository<M> for InMemoryRepository<M, F>
where
    M: Model,
    F: RecordFilter<M>,
{
    async fn create(&self, draft: M::Draft) -> M {
        let id = M::draft_id(&draft).unwrap_or_else(Uuid::new_v4);
        let record = M::from_draft(id, draft);

        let mut items = self.items.write().await;
        if items.iter().any(|item| item.id() == id) {
            warn!(%id, "Creating a record with an identifier that is already stored");
        }
        items.push(record.clone());
        debug!(%id, stored = items.len(), "Record created");

        record
    }

    async fn update(&self, id: Uuid, patch: M::Patch) -> RepositoryResult<M> {
        let mut items = self.items.write().await;
        let index = Self::position(&items, id)?;

        let record = &mut items[index];
        record.merge(patch);
        debug!(%id, "Record updated");

        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut items = self.items.write().await;
        let index = Self::position(&items, id)?;

        items.remove(index);
        debug!(%id, stored = items.len(), "Record deleted");

        Ok(true)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<M> {
        let items = self.items.read().await;
        let index = Self::position(&items, id)?;

        Ok(items[index].clone())
    }

    async fn find(&self, input: FindInput) -> FindOutput<M> {
        let page = input.effective_page();
        let per_page = input.effective_per_page();
        let FindInput {
            sort,
            sort_dir,
            filter,
            ..
        } = input;

        let (window, total) = {
            let items = self.items.read().await;
            let filtered = self.apply_filter(items.as_slice(), filter.as_deref());
            let total = filtered.len() as u64;
            let sorted = self.apply_sort(filtered, sort.as_deref(), sort_dir);
            (Self::apply_paginate(&sorted, page, per_page), total)
        };

        debug!(page, per_page, total, returned = window.len(), "Find executed");

        FindOutput {
            items: window,
            per_page,
            total,
            current_page: page,
            sort,
            sort_dir,
            filter,
        }
    }
}
