use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::ids::Isbn;

/// A seller's stock line for one book.
///
/// The API may return only the ISBN; `book` is then joined from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub book_isbn: Isbn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<Book>,
    pub quantity: u32,
    pub price_per_unit: f64,
}

impl InventoryItem {
    pub fn title(&self) -> &str {
        self.book.as_ref().map_or("", |book| book.title.as_str())
    }

    pub fn total_value(&self) -> f64 {
        f64::from(self.quantity) * self.price_per_unit
    }
}

/// Request body for creating or updating a stock line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDraft {
    pub book_isbn: Isbn,
    pub quantity: u32,
    pub price_per_unit: f64,
}
