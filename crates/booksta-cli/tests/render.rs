use booksta_cli::render::{
    catalog_summary, field_error_lines, follow_line, format_price, inventory_summary,
    marketplace_summary, marketplace_table, report_summary, shelves_summary, toast_line,
};
use booksta_gateway::RelationshipTarget;
use booksta_model::{AuthorId, Isbn, MarketplaceListing};
use booksta_view::{
    FieldErrors, FollowFlag, InventoryForm, InventoryMode, MarketplaceStats, ReportStats, Shelves,
    Toast,
};

fn listing(title: &str, price: Option<f64>, sellers: u32) -> MarketplaceListing {
    MarketplaceListing {
        isbn: Isbn::new("9780441013593").unwrap(),
        title: title.into(),
        description: None,
        publishing_year: None,
        pages: None,
        image_url: None,
        authors: Vec::new(),
        lowest_price: price,
        seller_count: sellers,
        total_quantity_available: sellers * 2,
        in_stock: sellers > 0,
    }
}

#[test]
fn prices_use_two_decimals() {
    assert_eq!(format_price(Some(9.5)), "$9.50");
    assert_eq!(format_price(None), "-");
}

#[test]
fn summaries_read_naturally() {
    let stats = MarketplaceStats {
        total_books: 3,
        books_in_stock: 2,
        total_listings: 5,
    };
    insta::assert_snapshot!(marketplace_summary(&stats, 1), @"3 books, 2 in stock, 5 listings (showing 1)");
    insta::assert_snapshot!(catalog_summary(2, 10, 3), @"2 of 10 books (3 filters active)");
    insta::assert_snapshot!(catalog_summary(10, 10, 0), @"10 of 10 books");
    insta::assert_snapshot!(inventory_summary(1, 12.0), @"1 book in stock, total value $12.00");
    insta::assert_snapshot!(shelves_summary(&Shelves::default()), @"No books on your shelves yet");
}

#[test]
fn report_summary_counts_every_bucket() {
    let stats = ReportStats {
        total: 5,
        book_reports: 3,
        author_reports: 2,
        pending: 2,
        resolved: 2,
        dismissed: 1,
    };
    insta::assert_snapshot!(
        report_summary(&stats),
        @"5 reports (3 book, 2 author): 2 pending, 2 resolved, 1 dismissed"
    );
}

#[test]
fn feedback_lines() {
    insta::assert_snapshot!(toast_line(&Toast::success("Inventory updated")), @"[ok] Inventory updated");
    insta::assert_snapshot!(
        follow_line(&RelationshipTarget::Author(AuthorId(4)), FollowFlag::Following),
        @"author 4: following"
    );
    insta::assert_snapshot!(
        follow_line(
            &RelationshipTarget::Favorite(Isbn::new("9780441013593").unwrap()),
            FollowFlag::NotFollowing
        ),
        @"favorite 9780441013593: not in favorites"
    );
}

#[test]
fn field_errors_list_one_per_line() {
    let errors: FieldErrors = InventoryForm::new("", "0", "")
        .validate(InventoryMode::Add)
        .unwrap_err();
    assert_eq!(
        field_error_lines(&errors),
        "  isbn: ISBN is required\n  quantity: Quantity must be at least 1\n  price: Price is required"
    );
}

#[test]
fn marketplace_table_marks_out_of_stock() {
    let dune = listing("Dune", Some(9.5), 2);
    let messiah = listing("Dune Messiah", None, 0);
    let rendered = marketplace_table(&[&dune, &messiah]).to_string();
    assert!(rendered.contains("Dune Messiah"));
    assert!(rendered.contains("$9.50"));
    assert!(rendered.contains("Out of stock"));
    assert!(rendered.contains("Unknown Author"));
}
