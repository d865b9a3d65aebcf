//! Generic list+form manager shared by both screens
//!
//! One `Manager<T>` owns an entity's in-memory collection, the pagination
//! cursor, and the notice channel. The Universities and Courses screens each
//! hold an instance and supply their own draft widgets and gateway calls.

use std::future::Future;

use tracing::{error, info};

use crate::api::ApiResult;
use crate::pager::{self, PageCursor};

/// Kind of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notice rendered in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// List+form state for one entity collection.
pub struct Manager<T> {
    /// Singular entity label used in notices, e.g. "University"
    label: &'static str,
    /// Plural entity label used in notices and logs, e.g. "Universities"
    label_plural: &'static str,
    items: Vec<T>,
    pub cursor: PageCursor,
    notice: Option<Notice>,
    busy: bool,
}

impl<T> Manager<T> {
    pub fn new(label: &'static str, label_plural: &'static str) -> Self {
        Self {
            label,
            label_plural,
            items: Vec::new(),
            cursor: PageCursor::default(),
            notice: None,
            busy: false,
        }
    }

    /// Full collection, in backend order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Rows visible under the current cursor.
    pub fn visible(&self) -> &[T] {
        pager::paginate(&self.items, &self.cursor)
    }

    pub fn page_count(&self) -> usize {
        pager::page_count(self.items.len(), self.cursor.page_size)
    }

    pub fn can_go_prev(&self) -> bool {
        pager::can_go_prev(self.cursor.page)
    }

    pub fn can_go_next(&self) -> bool {
        pager::can_go_next(self.items.len(), self.cursor.page_size, self.cursor.page)
    }

    pub fn next_page(&mut self) {
        let len = self.items.len();
        self.cursor.next_page(len);
    }

    pub fn prev_page(&mut self) {
        self.cursor.prev_page();
    }

    pub fn go_to_page(&mut self, page: usize) {
        let len = self.items.len();
        self.cursor.go_to_page(page, len);
    }

    /// Replace the collection and pull the cursor back into range.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.cursor.clamp(self.items.len());
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Fetch the collection and replace local state with the result.
    ///
    /// On failure the previous collection stays visible and only a notice is
    /// raised. Returns whether the collection was replaced.
    pub async fn load<F, Fut>(&mut self, fetch: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<Vec<T>>>,
    {
        match fetch().await {
            Ok(items) => {
                info!("fetched {} {}", items.len(), self.label_plural);
                self.set_items(items);
                true
            }
            Err(e) => {
                error!("error fetching {}: {}", self.label_plural, e);
                self.set_notice(Notice::error(format!(
                    "Failed to fetch {}",
                    self.label_plural
                )));
                false
            }
        }
    }

    /// Create a record from the current draft, then refetch the collection.
    ///
    /// The refetch is an explicit, awaited step: it runs exactly once, only
    /// after the create succeeded. Returns whether the create succeeded, in
    /// which case the owning screen clears its draft widgets.
    pub async fn submit<C, CFut, L, LFut>(&mut self, create: C, refetch: L) -> bool
    where
        C: FnOnce() -> CFut,
        CFut: Future<Output = ApiResult<()>>,
        L: FnOnce() -> LFut,
        LFut: Future<Output = ApiResult<Vec<T>>>,
    {
        if self.busy {
            return false;
        }
        self.busy = true;

        let created = match create().await {
            Ok(()) => {
                self.set_notice(Notice::success(format!(
                    "{} added successfully",
                    self.label
                )));
                true
            }
            Err(e) => {
                error!("error adding {}: {}", self.label, e);
                self.set_notice(Notice::error(format!("Failed to add {}", self.label)));
                false
            }
        };

        if created {
            // A refetch failure keeps the stale collection; the create itself
            // still counts as a success for the draft.
            if let Err(e) = refetch().await.map(|items| self.set_items(items)) {
                error!("error refetching {}: {}", self.label_plural, e);
            }
        }

        self.busy = false;
        created
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use reqwest::StatusCode;

    use super::*;
    use crate::api::ApiError;
    use crate::models::University;

    fn university(id: i64, name: &str) -> University {
        University {
            id,
            name: name.to_string(),
        }
    }

    fn manager() -> Manager<University> {
        Manager::new("University", "Universities")
    }

    #[tokio::test]
    async fn load_replaces_items_and_clamps_cursor() {
        let mut m = manager();
        m.set_items((0..12).map(|i| university(i, "U")).collect());
        m.go_to_page(3);

        let loaded = m
            .load(|| async { Ok(vec![university(1, "MIT")]) })
            .await;
        assert!(loaded);
        assert_eq!(m.items().len(), 1);
        assert_eq!(m.cursor.page, 1);
    }

    #[tokio::test]
    async fn load_failure_keeps_stale_items() {
        let mut m = manager();
        m.set_items(vec![university(1, "MIT")]);

        let loaded = m
            .load(|| async { Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)) })
            .await;
        assert!(!loaded);
        assert_eq!(m.items().len(), 1);
        assert_eq!(m.notice().unwrap().kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn submit_refetches_exactly_once_after_create() {
        let mut m = manager();
        let creates = Cell::new(0u32);
        let fetches = Cell::new(0u32);

        let cleared = m
            .submit(
                || async {
                    creates.set(creates.get() + 1);
                    Ok(())
                },
                || async {
                    fetches.set(fetches.get() + 1);
                    Ok(vec![university(1, "MIT")])
                },
            )
            .await;

        assert!(cleared);
        assert_eq!(creates.get(), 1);
        assert_eq!(fetches.get(), 1);
        assert_eq!(m.items().len(), 1);
        assert_eq!(m.notice().unwrap().kind, NoticeKind::Success);
        assert!(!m.is_busy());
    }

    #[tokio::test]
    async fn failed_create_skips_refetch_and_keeps_items() {
        let mut m = manager();
        m.set_items(vec![university(1, "MIT")]);
        let fetches = Cell::new(0u32);

        let cleared = m
            .submit(
                || async { Err(ApiError::Status(StatusCode::BAD_REQUEST)) },
                || async {
                    fetches.set(fetches.get() + 1);
                    Ok(Vec::new())
                },
            )
            .await;

        assert!(!cleared);
        assert_eq!(fetches.get(), 0);
        assert_eq!(m.items().len(), 1);
        assert_eq!(m.notice().unwrap().kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn refetch_failure_keeps_stale_items_but_create_counts() {
        let mut m = manager();
        m.set_items(vec![university(1, "MIT")]);

        let cleared = m
            .submit(
                || async { Ok(()) },
                || async { Err(ApiError::Status(StatusCode::BAD_GATEWAY)) },
            )
            .await;

        assert!(cleared);
        assert_eq!(m.items().len(), 1);
        assert_eq!(m.notice().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn pagination_delegates_to_the_pager() {
        let mut m = manager();
        m.set_items((0..12).map(|i| university(i, "U")).collect());

        assert_eq!(m.page_count(), 3);
        assert!(!m.can_go_prev());
        assert!(m.can_go_next());

        m.next_page();
        m.next_page();
        assert_eq!(m.cursor.page, 3);
        assert!(!m.can_go_next());
        assert_eq!(m.visible().len(), 2);

        m.prev_page();
        assert_eq!(m.visible().len(), 5);
    }

    #[test]
    fn shrinking_collection_clamps_the_cursor() {
        let mut m = manager();
        m.set_items((0..12).map(|i| university(i, "U")).collect());
        m.go_to_page(3);

        m.set_items((0..4).map(|i| university(i, "U")).collect());
        assert_eq!(m.cursor.page, 1);
        assert_eq!(m.visible().len(), 4);
    }
}
