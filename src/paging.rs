use std::cell::RefCell;
use std::rc::Rc;

use crate::collection::{PageEvent, PageInfo, PageObserver, PaginatedCollection, Subscription};

/// Human-readable range message for one loaded page.
///
/// The singular template is chosen whenever the page ends at or before the
/// first item, which makes an empty collection read "Showing 0 out of 0
/// total". That phrasing is intentional and pinned by tests.
pub fn page_summary(page: PageInfo) -> String {
    let end = page.start + page.length;
    let first_index = (page.start + 1).min(end);
    if end <= 1 {
        format!("Showing {} out of {} total", first_index, page.total_count)
    } else {
        format!(
            "Showing {}-{} out of {} total",
            first_index, end, page.total_count
        )
    }
}

/// Status line kept in sync with a collection's pagination metadata. The
/// message is recomputed synchronously on every Added/Removed/Reset event,
/// with no batching.
pub struct PagingHeader {
    sr_info: String,
    message: RefCell<String>,
}

impl PagingHeader {
    pub fn new(sr_info: impl Into<String>) -> Self {
        Self {
            sr_info: sr_info.into(),
            message: RefCell::new(String::new()),
        }
    }

    /// Render once from the collection's current state and subscribe for
    /// future mutations. The caller owns the subscription handle and must
    /// release it when the view goes away.
    pub fn bind<T>(
        self,
        collection: &mut PaginatedCollection<T>,
    ) -> (Rc<PagingHeader>, Subscription) {
        let header = Rc::new(self);
        header.page_changed(PageEvent::Reset, collection.page());
        let subscription = collection.subscribe(header.clone());
        (header, subscription)
    }

    pub fn message(&self) -> String {
        self.message.borrow().clone()
    }

    pub fn render(&self) -> String {
        let message = self.message.borrow();
        if self.sr_info.is_empty() {
            message.clone()
        } else {
            format!("{}\n{}", self.sr_info, message)
        }
    }
}

impl PageObserver for PagingHeader {
    fn page_changed(&self, _event: PageEvent, page: PageInfo) {
        *self.message.borrow_mut() = page_summary(page);
    }
}
