use serde::{Deserialize, Serialize};

use crate::book::{Author, author_line};
use crate::ids::{Isbn, SellerId};

/// One book as aggregated across every seller offering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListing {
    pub isbn: Isbn,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub publishing_year: Option<i32>,
    #[serde(default)]
    pub pages: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Absent when no seller has a price on file.
    #[serde(default)]
    pub lowest_price: Option<f64>,
    #[serde(default)]
    pub seller_count: u32,
    #[serde(default)]
    pub total_quantity_available: u32,
    #[serde(default)]
    pub in_stock: bool,
}

impl MarketplaceListing {
    pub fn author_line(&self) -> String {
        author_line(&self.authors)
    }
}

/// A single seller's offer for a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerListing {
    pub seller_id: SellerId,
    #[serde(default)]
    pub seller_first_name: String,
    #[serde(default)]
    pub seller_last_name: String,
    #[serde(default)]
    pub seller_picture: Option<String>,
    pub quantity: u32,
    pub price_per_unit: f64,
}

impl SellerListing {
    pub fn seller_name(&self) -> String {
        format!("{} {}", self.seller_first_name, self.seller_last_name)
            .trim()
            .to_string()
    }
}
