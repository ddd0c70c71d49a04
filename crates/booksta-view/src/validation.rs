//! Form validation. Runs before any gateway call; nothing is sent while a
//! form has errors.

use booksta_model::{InventoryDraft, Isbn};
use chrono::Datelike;

pub const WARNING_MIN_CHARS: usize = 20;
pub const WARNING_MAX_CHARS: usize = 1000;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const MAX_PAGES: i64 = 20_000;
pub const EARLIEST_YEAR: i32 = 1000;
pub const NAME_MAX_CHARS: usize = 100;

/// Per-field messages in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(Vec<(String, String)>);

impl FieldErrors {
    /// Records the first message for `field`; later ones are ignored.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push((field.to_string(), message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

// ============================================================================
// Inventory
// ============================================================================

/// Raw text of the add / edit stock form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryForm {
    pub isbn: String,
    pub quantity: String,
    pub price: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryMode {
    /// Listing a new book requires at least one copy.
    Add,
    Edit,
}

impl InventoryForm {
    pub fn new(
        isbn: impl Into<String>,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }

    fn parsed_quantity(&self) -> Option<i64> {
        self.quantity.trim().parse().ok()
    }

    fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
    }

    /// Quantity times price, when both parse.
    pub fn total_value(&self) -> Option<f64> {
        Some(self.parsed_quantity()? as f64 * self.parsed_price()?)
    }

    pub fn validate(&self, mode: InventoryMode) -> Result<InventoryDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let isbn = Isbn::new(self.isbn.as_str()).ok();
        if isbn.is_none() {
            errors.insert("isbn", "ISBN is required");
        }

        let quantity = if self.quantity.trim().is_empty() {
            errors.insert("quantity", "Quantity is required");
            None
        } else {
            match (self.parsed_quantity(), mode) {
                (None, _) => {
                    errors.insert("quantity", "Quantity must be a whole number");
                    None
                }
                (Some(qty), InventoryMode::Add) if qty < 1 => {
                    errors.insert("quantity", "Quantity must be at least 1");
                    None
                }
                (Some(qty), InventoryMode::Edit) if qty < 0 => {
                    errors.insert("quantity", "Quantity must be 0 or greater");
                    None
                }
                (Some(qty), _) => match u32::try_from(qty) {
                    Ok(qty) => Some(qty),
                    Err(_) => {
                        errors.insert("quantity", "Quantity is too large");
                        None
                    }
                },
            }
        };

        let price = if self.price.trim().is_empty() {
            errors.insert("price", "Price is required");
            None
        } else {
            match self.parsed_price() {
                Some(price) if price >= 0.0 => Some(price),
                _ => {
                    errors.insert("price", "Price must be a positive number");
                    None
                }
            }
        };

        match (isbn, quantity, price) {
            (Some(book_isbn), Some(quantity), Some(price_per_unit)) if errors.is_empty() => {
                Ok(InventoryDraft {
                    book_isbn,
                    quantity,
                    price_per_unit,
                })
            }
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Moderation forms
// ============================================================================

/// The warning sent to an author; returns the trimmed message.
pub fn validate_warning(message: &str) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    let trimmed = message.trim();
    let len = char_len(trimmed);
    if trimmed.is_empty() {
        errors.insert("warningMessage", "Warning message is required");
    } else if len < WARNING_MIN_CHARS {
        errors.insert(
            "warningMessage",
            format!("Warning message must be at least {WARNING_MIN_CHARS} characters"),
        );
    } else if len > WARNING_MAX_CHARS {
        errors.insert(
            "warningMessage",
            format!("Warning message must be at most {WARNING_MAX_CHARS} characters"),
        );
    }
    errors.into_result(|| trimmed.to_string())
}

/// Checks a book correction against `current_year` (the upper year bound is
/// the year after).
pub fn validate_book_draft(
    draft: &booksta_model::BookDraft,
    current_year: i32,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let isbn = draft.isbn.trim();
    if isbn.is_empty() {
        errors.insert("isbn", "ISBN is required");
    } else if isbn.len() != 13 || !isbn.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert("isbn", "ISBN must be exactly 13 digits");
    }

    if draft.title.trim().is_empty() {
        errors.insert("title", "Title is required");
    }

    match draft.publishing_year {
        None => errors.insert("publishingYear", "Publishing year is required"),
        Some(year) if year < EARLIEST_YEAR => errors.insert(
            "publishingYear",
            format!("Year must be {EARLIEST_YEAR} or later"),
        ),
        Some(year) if year > current_year + 1 => errors.insert(
            "publishingYear",
            format!("Year cannot be after {}", current_year + 1),
        ),
        Some(_) => {}
    }

    match draft.pages {
        None => errors.insert("pages", "Number of pages is required"),
        Some(pages) if pages < 1 => errors.insert("pages", "Pages must be at least 1"),
        Some(pages) if pages > MAX_PAGES => {
            errors.insert("pages", format!("Pages cannot exceed {MAX_PAGES}"));
        }
        Some(_) => {}
    }

    let description = char_len(draft.description.trim());
    if description == 0 {
        errors.insert("description", "Description is required");
    } else if description < DESCRIPTION_MIN_CHARS {
        errors.insert(
            "description",
            format!("Description must be at least {DESCRIPTION_MIN_CHARS} characters"),
        );
    } else if description > DESCRIPTION_MAX_CHARS {
        errors.insert(
            "description",
            format!("Description must be at most {DESCRIPTION_MAX_CHARS} characters"),
        );
    }

    if draft.authors.is_empty() {
        errors.insert("authors", "At least one author is required");
    }
    if draft.genres.is_empty() {
        errors.insert("genres", "At least one genre is required");
    }

    errors.into_result(|| ())
}

/// [`validate_book_draft`] against today's year.
pub fn validate_book_draft_now(draft: &booksta_model::BookDraft) -> Result<(), FieldErrors> {
    validate_book_draft(draft, chrono::Utc::now().year())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorDraft {
    pub first_name: String,
    pub last_name: String,
}

pub fn validate_author_draft(draft: &AuthorDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    for (field, label, value) in [
        ("firstName", "First name", &draft.first_name),
        ("lastName", "Last name", &draft.last_name),
    ] {
        let value = value.trim();
        if value.is_empty() {
            errors.insert(field, format!("{label} is required"));
        } else if char_len(value) > NAME_MAX_CHARS {
            errors.insert(
                field,
                format!("{label} must be at most {NAME_MAX_CHARS} characters"),
            );
        }
    }
    errors.into_result(|| ())
}
