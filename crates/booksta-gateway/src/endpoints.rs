//! API paths, relative to the configured base URL.

use booksta_model::{Isbn, ReportId};

use crate::source::RelationshipTarget;

pub const MARKETPLACE_BOOKS: &str = "marketplace/books";
pub const BOOKS: &str = "books";
pub const INVENTORY: &str = "inventory";
pub const REPORTS: &str = "reports";
pub const READING_SHELVES: &str = "me/reading-progress/books";
pub const FAVORITES: &str = "users/favorites";

pub fn marketplace_sellers(isbn: &Isbn) -> String {
    format!("{MARKETPLACE_BOOKS}/{isbn}/sellers")
}

pub fn inventory_item(isbn: &Isbn) -> String {
    format!("{INVENTORY}/{isbn}")
}

pub fn dismiss_report(id: ReportId) -> String {
    format!("{REPORTS}/books/{id}/dismiss")
}

pub fn resolve_report(id: ReportId) -> String {
    format!("{REPORTS}/books/{id}/resolve")
}

/// Path used to follow, unfollow, and (except favorites) query a target.
pub fn relationship(target: &RelationshipTarget) -> String {
    match target {
        RelationshipTarget::Author(id) => format!("users/follow/author/{id}"),
        RelationshipTarget::Series(id) => format!("users/follow/series/{id}"),
        RelationshipTarget::Favorite(isbn) => format!("{FAVORITES}/{isbn}"),
    }
}
