//! A seller's stock, joined with the catalog.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use booksta_gateway::{CollectionSource, GatewayError, InventoryGateway};
use booksta_model::{Book, InventoryDraft, InventoryItem, Isbn};

use crate::error::ViewError;
use crate::list::{ListState, LoadOutcome, MutationOutcome};
use crate::projection::{compare_title, matches_search, project};
use crate::toast::{Toast, ToastQueue};
use crate::validation::{InventoryForm, InventoryMode};

const DUPLICATE_ITEM: &str = "This book is already in your inventory";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventorySort {
    #[default]
    Title,
    /// Highest price first.
    Price,
    /// Largest stock first.
    Quantity,
    /// As returned by the API.
    Recent,
}

impl InventorySort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::Recent => "recent",
        }
    }

    fn compare(self, a: &InventoryItem, b: &InventoryItem) -> std::cmp::Ordering {
        match self {
            Self::Title => compare_title(a.title(), b.title()),
            Self::Price => b.price_per_unit.total_cmp(&a.price_per_unit),
            Self::Quantity => b.quantity.cmp(&a.quantity),
            Self::Recent => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for InventorySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "price" => Ok(Self::Price),
            "quantity" => Ok(Self::Quantity),
            "recent" => Ok(Self::Recent),
            other => Err(format!(
                "unknown sort {other:?}, expected title, price, quantity or recent"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InventoryView {
    items: ListState<InventoryItem>,
    catalog: ListState<Book>,
    search: String,
    sort: InventorySort,
    toasts: ToastQueue,
}

impl Default for InventoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryView {
    pub fn new() -> Self {
        Self {
            items: ListState::new("inventory"),
            catalog: ListState::new("books"),
            search: String::new(),
            sort: InventorySort::default(),
            toasts: ToastQueue::default(),
        }
    }

    pub fn items(&self) -> &ListState<InventoryItem> {
        &self.items
    }

    pub fn catalog(&self) -> &ListState<Book> {
        &self.catalog
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_sort(&mut self, sort: InventorySort) {
        self.sort = sort;
    }

    pub fn unmount(&self) {
        self.items.unmount();
        self.catalog.unmount();
    }

    /// Fetches stock and catalog together, then fills in missing books.
    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: CollectionSource<InventoryItem> + CollectionSource<Book> + ?Sized,
    {
        let items_token = self.items.begin_load();
        let catalog_token = self.catalog.begin_load();
        let items = CollectionSource::<InventoryItem>::fetch_collection(source).await;
        let books = CollectionSource::<Book>::fetch_collection(source).await;
        self.catalog.finish_load(catalog_token, books);
        let outcome = self.items.finish_load(items_token, items);
        if outcome == LoadOutcome::Applied {
            self.join_books();
        }
        outcome
    }

    fn join_books(&mut self) {
        let catalog = self.catalog.items();
        for item in self.items.items_mut().iter_mut() {
            if item.book.is_none() {
                item.book = catalog
                    .iter()
                    .find(|book| book.isbn == item.book_isbn)
                    .cloned();
            }
        }
    }

    pub fn visible(&self) -> Vec<&InventoryItem> {
        let sort = self.sort;
        project(
            self.items.items(),
            |item| {
                let author = item.book.as_ref().map(Book::author_line).unwrap_or_default();
                matches_search(
                    &self.search,
                    [item.title(), author.as_str(), item.book_isbn.as_str()],
                )
            },
            |a, b| sort.compare(a, b),
        )
    }

    /// Catalog books not already stocked.
    pub fn available_books(&self) -> Vec<&Book> {
        let stocked: HashSet<&Isbn> = self.items.items().iter().map(|i| &i.book_isbn).collect();
        self.catalog
            .items()
            .iter()
            .filter(|book| !stocked.contains(&book.isbn))
            .collect()
    }

    pub fn total_value(&self) -> f64 {
        self.items.items().iter().map(InventoryItem::total_value).sum()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a stock line, then refetches on success.
    pub async fn add<G>(&mut self, form: &InventoryForm, gateway: &G) -> MutationOutcome
    where
        G: InventoryGateway + CollectionSource<InventoryItem> + CollectionSource<Book> + ?Sized,
    {
        let draft = match form.validate(InventoryMode::Add) {
            Ok(draft) => draft,
            Err(errors) => return MutationOutcome::Invalid(errors),
        };
        match gateway.create_item(&draft).await {
            Ok(_) => {
                self.toasts.push(Toast::success("Book added to inventory"));
                self.load(gateway).await;
                MutationOutcome::Done
            }
            Err(err) => self.mutation_failed("add book to inventory", &err),
        }
    }

    /// Updates a stock line and patches it in place.
    pub async fn update<G>(&mut self, form: &InventoryForm, gateway: &G) -> MutationOutcome
    where
        G: InventoryGateway + ?Sized,
    {
        let draft = match form.validate(InventoryMode::Edit) {
            Ok(draft) => draft,
            Err(errors) => return MutationOutcome::Invalid(errors),
        };
        match gateway.update_item(&draft).await {
            Ok(_) => {
                self.patch(&draft);
                self.toasts.push(Toast::success("Inventory updated"));
                MutationOutcome::Done
            }
            Err(err) => self.mutation_failed("update inventory", &err),
        }
    }

    pub async fn remove<G>(&mut self, isbn: &Isbn, gateway: &G) -> MutationOutcome
    where
        G: InventoryGateway + ?Sized,
    {
        match gateway.delete_item(isbn).await {
            Ok(()) => {
                if self.items.liveness().is_alive() {
                    self.items.items_mut().retain(|item| &item.book_isbn != isbn);
                }
                self.toasts.push(Toast::success("Book removed from inventory"));
                MutationOutcome::Done
            }
            Err(err) => self.mutation_failed("remove book from inventory", &err),
        }
    }

    fn patch(&mut self, draft: &InventoryDraft) {
        if !self.items.liveness().is_alive() {
            return;
        }
        if let Some(item) = self
            .items
            .items_mut()
            .iter_mut()
            .find(|item| item.book_isbn == draft.book_isbn)
        {
            item.quantity = draft.quantity;
            item.price_per_unit = draft.price_per_unit;
        }
    }

    fn mutation_failed(&mut self, operation: &str, err: &GatewayError) -> MutationOutcome {
        tracing::error!(error = %err, "failed to {operation}");
        let message = if err.is_conflict() {
            DUPLICATE_ITEM.to_string()
        } else {
            format!("Failed to {operation}. Please try again.")
        };
        self.toasts.push(Toast::error(message));
        MutationOutcome::Failed(ViewError::mutation(operation, err))
    }
}
