//! In-memory gateway and fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use booksta_gateway::{
    CollectionSource, DetailSource, GatewayError, InventoryGateway, RelationshipGateway,
    RelationshipKind, RelationshipTarget, ReportGateway, Result,
};
use booksta_model::{
    Author, AuthorId, Book, BookWithReadingStatus, InventoryDraft, InventoryItem, Isbn,
    MarketplaceListing, ReadingEvent, ReadingEventType, Report, ReportId, ReportResolution,
    ReportStatus, SellerId, SellerListing, Subject, SubjectId, User, UserId,
};

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Network,
    Status(u16),
}

impl Failure {
    fn error(self) -> GatewayError {
        match self {
            Self::Network => GatewayError::Network("connection reset".into()),
            Self::Status(status) => GatewayError::from_status(status, "rejected"),
        }
    }
}

#[derive(Default)]
pub struct FakeGateway {
    pub listings: Mutex<Vec<MarketplaceListing>>,
    pub sellers: Mutex<HashMap<Isbn, Vec<SellerListing>>>,
    pub books: Mutex<Vec<Book>>,
    pub inventory: Mutex<Vec<InventoryItem>>,
    pub reports: Mutex<Vec<Report>>,
    pub shelves: Mutex<Vec<BookWithReadingStatus>>,
    pub following: Mutex<HashSet<RelationshipTarget>>,
    pub resolutions: Mutex<Vec<(ReportId, ReportResolution)>>,
    pub calls: Mutex<Vec<String>>,
    fail: Mutex<Option<Failure>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every following call fails until [`FakeGateway::recover`].
    pub fn fail_with(&self, failure: Failure) {
        *self.fail.lock().unwrap() = Some(failure);
    }

    pub fn recover(&self) {
        *self.fail.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, name: &str) -> usize {
        self.calls().iter().filter(|call| call.as_str() == name).count()
    }

    fn call(&self, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(name.to_string());
        match *self.fail.lock().unwrap() {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CollectionSource<MarketplaceListing> for FakeGateway {
    async fn fetch_collection(&self) -> Result<Vec<MarketplaceListing>> {
        self.call("listings")?;
        Ok(self.listings.lock().unwrap().clone())
    }
}

#[async_trait]
impl DetailSource<Isbn, Vec<SellerListing>> for FakeGateway {
    async fn fetch_detail(&self, isbn: &Isbn) -> Result<Vec<SellerListing>> {
        self.call("sellers")?;
        Ok(self
            .sellers
            .lock()
            .unwrap()
            .get(isbn)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CollectionSource<Book> for FakeGateway {
    async fn fetch_collection(&self) -> Result<Vec<Book>> {
        self.call("books")?;
        Ok(self.books.lock().unwrap().clone())
    }
}

#[async_trait]
impl CollectionSource<InventoryItem> for FakeGateway {
    async fn fetch_collection(&self) -> Result<Vec<InventoryItem>> {
        self.call("inventory")?;
        // The API returns bare ISBNs; books are joined client-side.
        Ok(self
            .inventory
            .lock()
            .unwrap()
            .iter()
            .map(|item| InventoryItem {
                book: None,
                ..item.clone()
            })
            .collect())
    }
}

#[async_trait]
impl CollectionSource<Report> for FakeGateway {
    async fn fetch_collection(&self) -> Result<Vec<Report>> {
        self.call("reports")?;
        Ok(self.reports.lock().unwrap().clone())
    }
}

#[async_trait]
impl CollectionSource<BookWithReadingStatus> for FakeGateway {
    async fn fetch_collection(&self) -> Result<Vec<BookWithReadingStatus>> {
        self.call("shelves")?;
        Ok(self.shelves.lock().unwrap().clone())
    }
}

#[async_trait]
impl RelationshipGateway for FakeGateway {
    async fn mutate_relationship(
        &self,
        kind: RelationshipKind,
        target: &RelationshipTarget,
    ) -> Result<()> {
        let name = match kind {
            RelationshipKind::Follow => "follow",
            RelationshipKind::Unfollow => "unfollow",
        };
        self.call(name)?;
        let mut following = self.following.lock().unwrap();
        match kind {
            RelationshipKind::Follow => following.insert(target.clone()),
            RelationshipKind::Unfollow => following.remove(target),
        };
        Ok(())
    }

    async fn query_relationship_status(&self, target: &RelationshipTarget) -> Result<bool> {
        self.call("status")?;
        Ok(self.following.lock().unwrap().contains(target))
    }
}

#[async_trait]
impl InventoryGateway for FakeGateway {
    async fn create_item(&self, draft: &InventoryDraft) -> Result<InventoryItem> {
        self.call("create")?;
        let mut inventory = self.inventory.lock().unwrap();
        if inventory.iter().any(|item| item.book_isbn == draft.book_isbn) {
            return Err(GatewayError::from_status(409, "duplicate"));
        }
        let item = InventoryItem {
            book_isbn: draft.book_isbn.clone(),
            book: None,
            quantity: draft.quantity,
            price_per_unit: draft.price_per_unit,
        };
        inventory.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, draft: &InventoryDraft) -> Result<InventoryItem> {
        self.call("update")?;
        let mut inventory = self.inventory.lock().unwrap();
        let item = inventory
            .iter_mut()
            .find(|item| item.book_isbn == draft.book_isbn)
            .ok_or_else(|| GatewayError::from_status(404, "missing"))?;
        item.quantity = draft.quantity;
        item.price_per_unit = draft.price_per_unit;
        Ok(item.clone())
    }

    async fn delete_item(&self, isbn: &Isbn) -> Result<()> {
        self.call("delete")?;
        self.inventory
            .lock()
            .unwrap()
            .retain(|item| &item.book_isbn != isbn);
        Ok(())
    }
}

#[async_trait]
impl ReportGateway for FakeGateway {
    async fn dismiss_report(&self, id: ReportId) -> Result<()> {
        self.call("dismiss")?;
        self.set_status(id, ReportStatus::Dismissed);
        Ok(())
    }

    async fn resolve_report(&self, id: ReportId, resolution: &ReportResolution) -> Result<()> {
        self.call("resolve")?;
        self.resolutions
            .lock()
            .unwrap()
            .push((id, resolution.clone()));
        self.set_status(id, ReportStatus::Resolved);
        Ok(())
    }
}

impl FakeGateway {
    fn set_status(&self, id: ReportId, status: ReportStatus) {
        if let Some(report) = self
            .reports
            .lock()
            .unwrap()
            .iter_mut()
            .find(|report| report.id == id)
        {
            report.report_status = status;
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn isbn(value: &str) -> Isbn {
    Isbn::new(value).unwrap()
}

pub fn author(id: i64, first: &str, last: &str) -> Author {
    Author {
        id: AuthorId(id),
        first_name: first.into(),
        last_name: last.into(),
        image_url: None,
    }
}

pub fn book(isbn_value: &str, title: &str, authors: Vec<Author>) -> Book {
    Book {
        isbn: isbn(isbn_value),
        title: title.into(),
        publishing_year: Some(1965),
        description: Some("A long enough description.".into()),
        pages: Some(400),
        authors,
        subjects: vec![Subject {
            id: SubjectId(1),
            name: "Science Fiction".into(),
        }],
        image_url: None,
    }
}

pub fn listing(
    isbn_value: &str,
    title: &str,
    price: Option<f64>,
    sellers: u32,
) -> MarketplaceListing {
    MarketplaceListing {
        isbn: isbn(isbn_value),
        title: title.into(),
        description: None,
        publishing_year: None,
        pages: None,
        image_url: None,
        authors: vec![author(1, "Frank", "Herbert")],
        lowest_price: price,
        seller_count: sellers,
        total_quantity_available: sellers,
        in_stock: sellers > 0,
    }
}

pub fn seller(id: i64, price: f64) -> SellerListing {
    SellerListing {
        seller_id: SellerId(id),
        seller_first_name: "Sam".into(),
        seller_last_name: format!("Seller{id}"),
        seller_picture: None,
        quantity: 2,
        price_per_unit: price,
    }
}

pub fn stock(isbn_value: &str, quantity: u32, price: f64) -> InventoryItem {
    InventoryItem {
        book_isbn: isbn(isbn_value),
        book: None,
        quantity,
        price_per_unit: price,
    }
}

pub fn reporter() -> User {
    User {
        id: UserId(7),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: Some("ada@example.com".into()),
        roles: Vec::new(),
    }
}

pub fn book_report(id: i64, reported: Book) -> Report {
    Report {
        id: ReportId(id),
        subject: "Wrong details".into(),
        message_report: "The page count is wrong.".into(),
        report_status: ReportStatus::Pending,
        user: reporter(),
        book: Some(reported),
        author: None,
        created_at: None,
    }
}

pub fn shelf_entry(book: Book, event: Option<ReadingEventType>) -> BookWithReadingStatus {
    BookWithReadingStatus {
        book,
        latest_reading_event: event.map(|event_type| ReadingEvent {
            id: None,
            event_type,
            occurred_at: None,
        }),
    }
}
