//! Reading shelves grouped by each book's latest reading event.

use booksta_gateway::CollectionSource;
use booksta_model::{BookWithReadingStatus, ReadingEventType};

use crate::list::{ListState, LoadOutcome};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shelves {
    pub started: Vec<BookWithReadingStatus>,
    pub restarted: Vec<BookWithReadingStatus>,
    pub finished: Vec<BookWithReadingStatus>,
    pub abandoned: Vec<BookWithReadingStatus>,
}

impl Shelves {
    /// Books without an event are left off every shelf.
    pub fn group(books: &[BookWithReadingStatus]) -> Self {
        let mut shelves = Self::default();
        for book in books {
            let shelf = match book.event_type() {
                Some(ReadingEventType::StartedReading) => &mut shelves.started,
                Some(ReadingEventType::RestartedReading) => &mut shelves.restarted,
                Some(ReadingEventType::FinishedReading) => &mut shelves.finished,
                Some(ReadingEventType::AbandonedReading) => &mut shelves.abandoned,
                None => continue,
            };
            shelf.push(book.clone());
        }
        shelves
    }

    pub fn is_empty(&self) -> bool {
        self.started.is_empty()
            && self.restarted.is_empty()
            && self.finished.is_empty()
            && self.abandoned.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ReadingView {
    list: ListState<BookWithReadingStatus>,
    shelves: Shelves,
    finished_expanded: bool,
    abandoned_expanded: bool,
}

impl Default for ReadingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingView {
    pub fn new() -> Self {
        Self {
            list: ListState::new("books"),
            shelves: Shelves::default(),
            finished_expanded: false,
            abandoned_expanded: false,
        }
    }

    pub fn list(&self) -> &ListState<BookWithReadingStatus> {
        &self.list
    }

    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: CollectionSource<BookWithReadingStatus> + ?Sized,
    {
        let outcome = self.list.load(source).await;
        if outcome == LoadOutcome::Applied {
            self.shelves = Shelves::group(self.list.items());
        }
        outcome
    }

    pub fn shelves(&self) -> &Shelves {
        &self.shelves
    }

    /// Started books first, then restarted ones.
    pub fn currently_reading(&self) -> Vec<&BookWithReadingStatus> {
        self.shelves
            .started
            .iter()
            .chain(&self.shelves.restarted)
            .collect()
    }

    pub fn has_no_books(&self) -> bool {
        self.shelves.is_empty()
    }

    pub fn finished_expanded(&self) -> bool {
        self.finished_expanded
    }

    pub fn abandoned_expanded(&self) -> bool {
        self.abandoned_expanded
    }

    pub fn toggle_finished_expanded(&mut self) {
        self.finished_expanded = !self.finished_expanded;
    }

    pub fn toggle_abandoned_expanded(&mut self) {
        self.abandoned_expanded = !self.abandoned_expanded;
    }
}
