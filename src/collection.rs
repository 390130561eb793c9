use std::rc::{Rc, Weak};

/// Pagination metadata for the currently loaded page. `length` always equals
/// the number of loaded items; `start + length <= total_count` is expected
/// but tolerated when the server reports otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub start: usize,
    pub length: usize,
    pub total_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    Added,
    Removed,
    Reset,
}

/// Notified synchronously, once per mutation, in subscription order.
pub trait PageObserver {
    fn page_changed(&self, event: PageEvent, page: PageInfo);
}

/// Handle returned by [`PaginatedCollection::subscribe`]. Views must release
/// their handles on disposal so repeated view construction does not leak
/// observer slots.
#[derive(Debug)]
pub struct Subscription(u64);

pub struct PaginatedCollection<T> {
    items: Vec<T>,
    start: usize,
    total_count: usize,
    observers: Vec<(u64, Weak<dyn PageObserver>)>,
    next_token: u64,
}

impl<T> PaginatedCollection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            start: 0,
            total_count: 0,
            observers: Vec::new(),
            next_token: 0,
        }
    }

    pub fn page(&self) -> PageInfo {
        PageInfo {
            start: self.start,
            length: self.items.len(),
            total_count: self.total_count,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn subscribe(&mut self, observer: Rc<dyn PageObserver>) -> Subscription {
        let token = self.next_token;
        self.next_token += 1;
        self.observers.push((token, Rc::downgrade(&observer)));
        Subscription(token)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.observers.retain(|(token, _)| *token != subscription.0);
    }

    /// Replace the loaded page wholesale, e.g. after a fetch.
    pub fn reset(&mut self, items: Vec<T>, start: usize, total_count: usize) {
        self.items = items;
        self.start = start;
        self.total_count = total_count;
        self.notify(PageEvent::Reset);
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.notify(PageEvent::Added);
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.notify(PageEvent::Removed);
        Some(item)
    }

    fn notify(&mut self, event: PageEvent) {
        let page = self.page();
        self.observers.retain(|(_, observer)| {
            match observer.upgrade() {
                Some(observer) => {
                    observer.page_changed(event, page);
                    true
                }
                // Observer was dropped without unsubscribing; prune it.
                None => false,
            }
        });
    }
}

impl<T> Default for PaginatedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        seen: RefCell<Vec<(PageEvent, PageInfo)>>,
    }

    impl Recorder {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                seen: RefCell::new(Vec::new()),
            })
        }
    }

    impl PageObserver for Recorder {
        fn page_changed(&self, event: PageEvent, page: PageInfo) {
            self.seen.borrow_mut().push((event, page));
        }
    }

    #[test]
    fn reset_fires_one_event_with_fresh_metadata() {
        let mut collection = PaginatedCollection::new();
        let recorder = Recorder::new();
        let _sub = collection.subscribe(recorder.clone());

        collection.reset(vec!["a", "b", "c"], 5, 12);

        let seen = recorder.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, PageEvent::Reset);
        assert_eq!(
            seen[0].1,
            PageInfo {
                start: 5,
                length: 3,
                total_count: 12
            }
        );
    }

    #[test]
    fn push_and_remove_fire_added_and_removed() {
        let mut collection = PaginatedCollection::new();
        let recorder = Recorder::new();
        let _sub = collection.subscribe(recorder.clone());

        collection.push("a");
        collection.push("b");
        assert_eq!(collection.remove_at(0), Some("a"));
        assert_eq!(collection.remove_at(7), None);

        let events: Vec<PageEvent> = recorder.seen.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            events,
            vec![PageEvent::Added, PageEvent::Added, PageEvent::Removed]
        );
    }

    #[test]
    fn unsubscribed_observer_stops_receiving_events() {
        let mut collection = PaginatedCollection::new();
        let recorder = Recorder::new();
        let sub = collection.subscribe(recorder.clone());

        collection.push(1);
        collection.unsubscribe(sub);
        collection.push(2);

        assert_eq!(recorder.seen.borrow().len(), 1);
    }

    #[test]
    fn dropped_observer_is_pruned() {
        let mut collection = PaginatedCollection::new();
        let recorder = Recorder::new();
        let _sub = collection.subscribe(recorder.clone());
        drop(recorder);

        collection.push(1);
        assert!(collection.observers.is_empty());
    }
}
