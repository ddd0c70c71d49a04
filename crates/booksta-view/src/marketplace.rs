//! Marketplace browsing: aggregated listings and a per-book seller panel.

use std::fmt;
use std::str::FromStr;

use booksta_gateway::{CollectionSource, DetailSource, GatewayError};
use booksta_model::{Isbn, MarketplaceListing, SellerListing};

use crate::lifecycle::{RequestToken, Sequencer};
use crate::list::{ListState, LoadOutcome};
use crate::projection::{SortDirection, compare_price, compare_title, matches_search, project};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketplaceSort {
    #[default]
    Title,
    PriceLow,
    PriceHigh,
    Sellers,
}

impl MarketplaceSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Sellers => "sellers",
        }
    }

    fn compare(self, a: &MarketplaceListing, b: &MarketplaceListing) -> std::cmp::Ordering {
        match self {
            Self::Title => compare_title(&a.title, &b.title),
            Self::PriceLow => {
                compare_price(a.lowest_price, b.lowest_price, SortDirection::Ascending)
            }
            Self::PriceHigh => {
                compare_price(a.lowest_price, b.lowest_price, SortDirection::Descending)
            }
            Self::Sellers => b.seller_count.cmp(&a.seller_count),
        }
    }
}

impl fmt::Display for MarketplaceSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketplaceSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "sellers" => Ok(Self::Sellers),
            other => Err(format!(
                "unknown sort {other:?}, expected title, price-low, price-high or sellers"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketplaceQuery {
    pub search: String,
    pub sort: MarketplaceSort,
    pub in_stock_only: bool,
}

impl MarketplaceQuery {
    fn matches(&self, listing: &MarketplaceListing) -> bool {
        let author = listing.author_line();
        matches_search(
            &self.search,
            [listing.title.as_str(), author.as_str(), listing.isbn.as_str()],
        ) && (!self.in_stock_only || listing.in_stock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketplaceStats {
    pub total_books: usize,
    pub books_in_stock: usize,
    /// Sum of seller counts over all books.
    pub total_listings: u64,
}

/// The open book detail and its sellers.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetail {
    pub isbn: Isbn,
    pub sellers: Vec<SellerListing>,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub struct MarketplaceView {
    list: ListState<MarketplaceListing>,
    query: MarketplaceQuery,
    detail: Option<BookDetail>,
    detail_sequencer: Sequencer,
}

impl Default for MarketplaceView {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketplaceView {
    pub fn new() -> Self {
        Self {
            list: ListState::new("marketplace data"),
            query: MarketplaceQuery::default(),
            detail: None,
            detail_sequencer: Sequencer::default(),
        }
    }

    pub fn list(&self) -> &ListState<MarketplaceListing> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<MarketplaceListing> {
        &mut self.list
    }

    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: CollectionSource<MarketplaceListing> + ?Sized,
    {
        self.list.load(source).await
    }

    pub fn query(&self) -> &MarketplaceQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_sort(&mut self, sort: MarketplaceSort) {
        self.query.sort = sort;
    }

    pub fn set_in_stock_only(&mut self, in_stock_only: bool) {
        self.query.in_stock_only = in_stock_only;
    }

    pub fn has_filters(&self) -> bool {
        !self.query.search.is_empty()
            || self.query.sort != MarketplaceSort::Title
            || self.query.in_stock_only
    }

    pub fn clear_filters(&mut self) {
        self.query = MarketplaceQuery::default();
    }

    pub fn visible(&self) -> Vec<&MarketplaceListing> {
        let sort = self.query.sort;
        project(
            self.list.items(),
            |listing| self.query.matches(listing),
            |a, b| sort.compare(a, b),
        )
    }

    pub fn stats(&self) -> MarketplaceStats {
        let items = self.list.items();
        MarketplaceStats {
            total_books: items.len(),
            books_in_stock: items.iter().filter(|listing| listing.in_stock).count(),
            total_listings: items
                .iter()
                .map(|listing| u64::from(listing.seller_count))
                .sum(),
        }
    }

    // =========================================================================
    // Book detail
    // =========================================================================

    pub fn detail(&self) -> Option<&BookDetail> {
        self.detail.as_ref()
    }

    /// The listing behind the open detail, if it is still in the collection.
    pub fn selected_listing(&self) -> Option<&MarketplaceListing> {
        let isbn = &self.detail.as_ref()?.isbn;
        self.list.items().iter().find(|listing| &listing.isbn == isbn)
    }

    pub fn select_book(&mut self, isbn: Isbn) -> RequestToken {
        self.detail = Some(BookDetail {
            isbn,
            sellers: Vec::new(),
            loading: true,
        });
        self.detail_sequencer.issue()
    }

    /// A failed seller fetch leaves the panel open with no sellers.
    pub fn finish_sellers(
        &mut self,
        token: RequestToken,
        result: Result<Vec<SellerListing>, GatewayError>,
    ) -> LoadOutcome {
        if !self.list.liveness().is_alive() {
            return LoadOutcome::Unmounted;
        }
        if !self.detail_sequencer.is_current(token) {
            tracing::debug!(?token, "discarding stale seller response");
            return LoadOutcome::Stale;
        }
        let Some(detail) = self.detail.as_mut() else {
            return LoadOutcome::Stale;
        };
        detail.loading = false;
        match result {
            Ok(sellers) => {
                detail.sellers = sellers;
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::error!(isbn = %detail.isbn, error = %err, "failed to load sellers");
                detail.sellers.clear();
                LoadOutcome::Failed
            }
        }
    }

    pub async fn load_sellers<S>(&mut self, isbn: Isbn, source: &S) -> LoadOutcome
    where
        S: DetailSource<Isbn, Vec<SellerListing>> + ?Sized,
    {
        let token = self.select_book(isbn.clone());
        let result = source.fetch_detail(&isbn).await;
        self.finish_sellers(token, result)
    }

    pub fn close_book_detail(&mut self) {
        self.detail = None;
        self.detail_sequencer.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(isbn: &str, title: &str, price: Option<f64>, sellers: u32) -> MarketplaceListing {
        MarketplaceListing {
            isbn: Isbn::new(isbn).unwrap(),
            title: title.into(),
            description: None,
            publishing_year: None,
            pages: None,
            image_url: None,
            authors: Vec::new(),
            lowest_price: price,
            seller_count: sellers,
            total_quantity_available: sellers,
            in_stock: sellers > 0,
        }
    }

    fn loaded(items: Vec<MarketplaceListing>) -> MarketplaceView {
        let mut view = MarketplaceView::new();
        let token = view.list_mut().begin_load();
        view.list_mut().finish_load(token, Ok(items));
        view
    }

    #[test]
    fn price_low_puts_missing_last() {
        let mut view = loaded(vec![listing("A", "A", None, 0), listing("B", "B", Some(5.0), 1)]);
        view.set_sort(MarketplaceSort::PriceLow);
        let titles: Vec<&str> = view.visible().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
        assert!(view.has_filters());
    }

    #[test]
    fn stats_cover_all_books() {
        let mut view = loaded(vec![
            listing("1", "Dune", Some(9.0), 2),
            listing("2", "Emma", None, 0),
            listing("3", "Ulysses", Some(4.0), 3),
        ]);
        view.set_in_stock_only(true);
        assert_eq!(view.visible().len(), 2);
        assert_eq!(
            view.stats(),
            MarketplaceStats {
                total_books: 3,
                books_in_stock: 2,
                total_listings: 5,
            }
        );
        view.clear_filters();
        assert!(!view.has_filters());
    }

    #[test]
    fn closing_detail_discards_late_sellers() {
        let mut view = loaded(vec![listing("1", "Dune", Some(9.0), 2)]);
        let token = view.select_book(Isbn::new("1").unwrap());
        assert_eq!(view.selected_listing().map(|l| l.title.as_str()), Some("Dune"));
        view.close_book_detail();
        assert_eq!(view.finish_sellers(token, Ok(Vec::new())), LoadOutcome::Stale);
        assert!(view.detail().is_none());
    }

    #[test]
    fn sort_names_parse() {
        for sort in [
            MarketplaceSort::Title,
            MarketplaceSort::PriceLow,
            MarketplaceSort::PriceHigh,
            MarketplaceSort::Sellers,
        ] {
            assert_eq!(sort.as_str().parse::<MarketplaceSort>(), Ok(sort));
        }
        assert!("cheapest".parse::<MarketplaceSort>().is_err());
    }
}
