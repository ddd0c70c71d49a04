//! Table and summary rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use booksta_gateway::RelationshipTarget;
use booksta_model::{
    Book, BookWithReadingStatus, InventoryItem, MarketplaceListing, Report, SellerListing,
};
use booksta_view::reports::{Badge, BadgeTone, category_badge, status_badge};
use booksta_view::{
    FieldErrors, FollowFlag, MarketplaceStats, ReportStats, Shelves, Toast, ToastType,
};

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("${price:.2}"),
        None => "-".to_string(),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|label| header_cell(label)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    table
}

fn badge_cell(badge: Badge) -> Cell {
    let color = match badge.tone {
        BadgeTone::Warning => Color::Yellow,
        BadgeTone::Success => Color::Green,
        BadgeTone::Neutral => Color::DarkGrey,
        BadgeTone::Info => Color::Blue,
        BadgeTone::Accent => Color::Magenta,
    };
    Cell::new(badge.label).fg(color)
}

/// Keeps a table cell to one readable line.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

// ============================================================================
// Marketplace
// ============================================================================

pub fn marketplace_table(listings: &[&MarketplaceListing]) -> Table {
    let mut table = new_table(&["ISBN", "Title", "Author", "From", "Sellers", "Available"]);
    for listing in listings {
        let price = if listing.lowest_price.is_some() {
            Cell::new(format_price(listing.lowest_price))
        } else {
            dim_cell("-")
        };
        let available = if listing.in_stock {
            Cell::new(listing.total_quantity_available)
        } else {
            Cell::new("Out of stock").fg(Color::Red)
        };
        table.add_row(vec![
            dim_cell(&listing.isbn),
            Cell::new(&listing.title).add_attribute(Attribute::Bold),
            Cell::new(listing.author_line()),
            price,
            Cell::new(listing.seller_count),
            available,
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    table
}

pub fn marketplace_summary(stats: &MarketplaceStats, shown: usize) -> String {
    format!(
        "{} books, {} in stock, {} listings (showing {shown})",
        stats.total_books, stats.books_in_stock, stats.total_listings
    )
}

pub fn sellers_table(sellers: &[SellerListing]) -> Table {
    let mut table = new_table(&["Seller", "Quantity", "Price"]);
    for seller in sellers {
        table.add_row(vec![
            Cell::new(seller.seller_name()),
            Cell::new(seller.quantity),
            Cell::new(format_price(Some(seller.price_per_unit))),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

// ============================================================================
// Catalog
// ============================================================================

pub fn catalog_table(books: &[&Book]) -> Table {
    let mut table = new_table(&["ISBN", "Title", "Author", "Year", "Pages", "Genres"]);
    for book in books {
        let genres = book
            .subjects
            .iter()
            .map(|subject| subject.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            dim_cell(&book.isbn),
            Cell::new(&book.title).add_attribute(Attribute::Bold),
            Cell::new(book.author_line()),
            optional_cell(book.publishing_year),
            optional_cell(book.pages),
            Cell::new(genres),
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    table
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

pub fn catalog_summary(shown: usize, total: usize, active_filters: usize) -> String {
    match active_filters {
        0 => format!("{shown} of {total} books"),
        1 => format!("{shown} of {total} books (1 filter active)"),
        n => format!("{shown} of {total} books ({n} filters active)"),
    }
}

// ============================================================================
// Inventory
// ============================================================================

pub fn inventory_table(items: &[&InventoryItem]) -> Table {
    let mut table = new_table(&["ISBN", "Title", "Quantity", "Price", "Value"]);
    for item in items {
        let quantity = if item.quantity == 0 {
            Cell::new(0).fg(Color::Red)
        } else {
            Cell::new(item.quantity)
        };
        table.add_row(vec![
            dim_cell(&item.book_isbn),
            Cell::new(item.title()).add_attribute(Attribute::Bold),
            quantity,
            Cell::new(format_price(Some(item.price_per_unit))),
            Cell::new(format_price(Some(item.total_value()))),
        ]);
    }
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    table
}

pub fn inventory_summary(lines: usize, total_value: f64) -> String {
    let noun = if lines == 1 { "book" } else { "books" };
    format!("{lines} {noun} in stock, total value {}", format_price(Some(total_value)))
}

// ============================================================================
// Reports
// ============================================================================

pub fn reports_table(reports: &[&Report]) -> Table {
    let mut table = new_table(&["ID", "Type", "Status", "Subject", "About", "Reporter"]);
    for report in reports {
        let about = match (&report.book, &report.author) {
            (Some(book), _) => book.title.clone(),
            (None, Some(author)) => author.full_name(),
            (None, None) => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(report.id),
            badge_cell(category_badge(report.category())),
            badge_cell(status_badge(report.report_status)),
            Cell::new(truncate(&report.subject, 40)),
            Cell::new(about),
            Cell::new(report.user.full_name()),
        ]);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    table
}

pub fn report_summary(stats: &ReportStats) -> String {
    format!(
        "{} reports ({} book, {} author): {} pending, {} resolved, {} dismissed",
        stats.total,
        stats.book_reports,
        stats.author_reports,
        stats.pending,
        stats.resolved,
        stats.dismissed
    )
}

// ============================================================================
// Reading
// ============================================================================

pub fn shelves_table(shelves: &Shelves) -> Table {
    let mut table = new_table(&["Shelf", "Title", "Author"]);
    let groups: [(&str, &[BookWithReadingStatus]); 4] = [
        ("Reading", &shelves.started),
        ("Re-reading", &shelves.restarted),
        ("Finished", &shelves.finished),
        ("Abandoned", &shelves.abandoned),
    ];
    for (shelf, entries) in groups {
        for entry in entries {
            table.add_row(vec![
                Cell::new(shelf),
                Cell::new(&entry.book.title).add_attribute(Attribute::Bold),
                Cell::new(entry.book.author_line()),
            ]);
        }
    }
    table
}

pub fn shelves_summary(shelves: &Shelves) -> String {
    if shelves.is_empty() {
        return "No books on your shelves yet".to_string();
    }
    format!(
        "{} reading, {} finished, {} abandoned",
        shelves.started.len() + shelves.restarted.len(),
        shelves.finished.len(),
        shelves.abandoned.len()
    )
}

// ============================================================================
// Feedback
// ============================================================================

pub fn toast_line(toast: &Toast) -> String {
    let tag = match toast.toast_type {
        ToastType::Success => "ok",
        ToastType::Info => "info",
        ToastType::Warning => "warning",
        ToastType::Error => "error",
    };
    format!("[{tag}] {}", toast.message)
}

pub fn field_error_lines(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn follow_line(target: &RelationshipTarget, flag: FollowFlag) -> String {
    let state = match (target, flag) {
        (RelationshipTarget::Favorite(_), FollowFlag::Following) => "in favorites",
        (RelationshipTarget::Favorite(_), _) => "not in favorites",
        (_, FollowFlag::Following) => "following",
        (_, _) => "not following",
    };
    format!("{target}: {state}")
}
