mod common;

use booksta_model::{BookDraft, ReadingEventType, ReportId, ReportResolution, ReportStatus};
use booksta_view::{
    AuthorDraft, CatalogView, InventoryForm, InventorySort, InventoryView, LoadOutcome,
    MarketplaceView, MutationOutcome, ReadingView, ReportsView, ToastType,
};

use common::{
    FakeGateway, Failure, author, book, book_report, isbn, listing, seller, shelf_entry, stock,
};

fn marketplace_gateway() -> FakeGateway {
    let gateway = FakeGateway::new();
    *gateway.listings.lock().unwrap() = vec![
        listing("9780441013593", "Dune", Some(9.5), 2),
        listing("9780441172719", "Dune Messiah", None, 0),
        listing("9780553293357", "Foundation", Some(4.0), 1),
    ];
    gateway
}

// ============================================================================
// Marketplace
// ============================================================================

#[tokio::test]
async fn marketplace_search_matches_title_substring() {
    let gateway = marketplace_gateway();
    let mut view = MarketplaceView::new();
    assert_eq!(view.load(&gateway).await, LoadOutcome::Applied);

    view.set_search("messiah");
    let titles: Vec<&str> = view.visible().iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune Messiah"]);

    view.set_search("9780553");
    assert_eq!(view.visible().len(), 1);
    view.set_search("herbert");
    assert_eq!(view.visible().len(), 3);
}

#[tokio::test]
async fn marketplace_failure_keeps_previous_listings() {
    let gateway = marketplace_gateway();
    let mut view = MarketplaceView::new();
    view.load(&gateway).await;

    gateway.fail_with(Failure::Network);
    assert_eq!(view.load(&gateway).await, LoadOutcome::Failed);
    assert_eq!(view.list().total_count(), 3);
    assert!(view.list().error_message().is_some());

    gateway.recover();
    view.load(&gateway).await;
    assert!(view.list().error().is_none());
}

#[tokio::test]
async fn seller_panel_loads_and_degrades_to_empty() {
    let gateway = marketplace_gateway();
    gateway
        .sellers
        .lock()
        .unwrap()
        .insert(isbn("9780441013593"), vec![seller(1, 9.5), seller(2, 11.0)]);
    let mut view = MarketplaceView::new();
    view.load(&gateway).await;

    view.load_sellers(isbn("9780441013593"), &gateway).await;
    let detail = view.detail().expect("detail open");
    assert_eq!(detail.sellers.len(), 2);
    assert!(!detail.loading);

    gateway.fail_with(Failure::Status(500));
    assert_eq!(
        view.load_sellers(isbn("9780441013593"), &gateway).await,
        LoadOutcome::Failed
    );
    assert!(view.detail().expect("detail open").sellers.is_empty());

    view.close_book_detail();
    assert!(view.detail().is_none());
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn catalog_search_dune_matches_only_dune() {
    let gateway = FakeGateway::new();
    *gateway.books.lock().unwrap() = vec![
        book("9780553293357", "Foundation", vec![author(2, "Isaac", "Asimov")]),
        book("9780441013593", "Dune", vec![author(1, "Frank", "Herbert")]),
    ];
    let mut view = CatalogView::new();
    view.load(&gateway).await;

    view.filters_mut().set_search("dune");
    let titles: Vec<&str> = view.visible().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune"]);
}

// ============================================================================
// Inventory
// ============================================================================

fn inventory_gateway() -> FakeGateway {
    let gateway = FakeGateway::new();
    *gateway.books.lock().unwrap() = vec![
        book("9780441013593", "Dune", vec![author(1, "Frank", "Herbert")]),
        book("9780553293357", "Foundation", vec![author(2, "Isaac", "Asimov")]),
        book("9780345391803", "The Hitchhiker's Guide", vec![author(3, "Douglas", "Adams")]),
    ];
    *gateway.inventory.lock().unwrap() = vec![
        stock("9780553293357", 1, 12.0),
        stock("9780441013593", 5, 8.0),
    ];
    gateway
}

#[tokio::test]
async fn inventory_joins_catalog_books() {
    let gateway = inventory_gateway();
    let mut view = InventoryView::new();
    view.load(&gateway).await;

    let titles: Vec<&str> = view.visible().iter().map(|item| item.title()).collect();
    assert_eq!(titles, vec!["Dune", "Foundation"]);

    view.set_sort(InventorySort::Price);
    let titles: Vec<&str> = view.visible().iter().map(|item| item.title()).collect();
    assert_eq!(titles, vec!["Foundation", "Dune"]);

    view.set_sort(InventorySort::Recent);
    view.set_search("asimov");
    let titles: Vec<&str> = view.visible().iter().map(|item| item.title()).collect();
    assert_eq!(titles, vec!["Foundation"]);

    let available: Vec<&str> = view.available_books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(available, vec!["The Hitchhiker's Guide"]);
    assert!((view.total_value() - 52.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn inventory_duplicate_add_reports_conflict() {
    let gateway = inventory_gateway();
    let mut view = InventoryView::new();
    view.load(&gateway).await;

    let form = InventoryForm::new("9780441013593", "2", "7.00");
    let outcome = view.add(&form, &gateway).await;
    assert!(matches!(outcome, MutationOutcome::Failed(_)));
    let toast = view.toasts_mut().latest().cloned().expect("toast");
    assert_eq!(toast.toast_type, ToastType::Error);
    assert_eq!(toast.message, "This book is already in your inventory");
}

#[tokio::test]
async fn inventory_invalid_form_sends_nothing() {
    let gateway = inventory_gateway();
    let mut view = InventoryView::new();

    let form = InventoryForm::new("9780345391803", "-3", "free");
    let outcome = view.add(&form, &gateway).await;
    let MutationOutcome::Invalid(errors) = outcome else {
        panic!("expected validation errors, got {outcome:?}");
    };
    assert!(errors.get("quantity").is_some());
    assert!(errors.get("price").is_some());
    assert_eq!(gateway.calls_to("create"), 0);
    assert!(view.toasts_mut().is_empty());
}

#[tokio::test]
async fn inventory_add_refetches_then_update_and_remove_patch_locally() {
    let gateway = inventory_gateway();
    let mut view = InventoryView::new();
    view.load(&gateway).await;

    let added = view
        .add(&InventoryForm::new("9780345391803", "3", "5.5"), &gateway)
        .await;
    assert!(added.is_done());
    assert_eq!(view.items().total_count(), 3);
    assert_eq!(gateway.calls_to("inventory"), 2);
    assert!(view.available_books().is_empty());

    let updated = view
        .update(&InventoryForm::new("9780441013593", "0", "6"), &gateway)
        .await;
    assert!(updated.is_done());
    let dune = view
        .items()
        .items()
        .iter()
        .find(|item| item.book_isbn == isbn("9780441013593"))
        .expect("dune stocked");
    assert_eq!(dune.quantity, 0);
    assert!((dune.price_per_unit - 6.0).abs() < f64::EPSILON);

    assert!(view.remove(&isbn("9780553293357"), &gateway).await.is_done());
    assert_eq!(view.items().total_count(), 2);
    assert_eq!(gateway.calls_to("inventory"), 2);

    let toasts = view.toasts_mut().take();
    assert_eq!(toasts.len(), 3);
    assert!(toasts.iter().all(|t| t.toast_type == ToastType::Success));
}

// ============================================================================
// Reading shelves
// ============================================================================

#[tokio::test]
async fn reading_shelves_group_latest_events() {
    let gateway = FakeGateway::new();
    *gateway.shelves.lock().unwrap() = vec![
        shelf_entry(book("1", "Restarted", vec![]), Some(ReadingEventType::RestartedReading)),
        shelf_entry(book("2", "Started", vec![]), Some(ReadingEventType::StartedReading)),
        shelf_entry(book("3", "Done", vec![]), Some(ReadingEventType::FinishedReading)),
        shelf_entry(book("4", "Owned", vec![]), None),
    ];
    let mut view = ReadingView::new();
    view.load(&gateway).await;

    let reading: Vec<&str> = view
        .currently_reading()
        .iter()
        .map(|entry| entry.book.title.as_str())
        .collect();
    assert_eq!(reading, vec!["Started", "Restarted"]);
    assert_eq!(view.shelves().finished.len(), 1);
    assert!(!view.has_no_books());
}

// ============================================================================
// Reports
// ============================================================================

fn reports_gateway() -> FakeGateway {
    let gateway = FakeGateway::new();
    *gateway.reports.lock().unwrap() = vec![
        book_report(1, book("9780441013593", "Dune", vec![author(1, "Frank", "Herbert")])),
        book_report(2, book("9780553293357", "Foundation", vec![author(2, "Isaac", "Asimov")])),
    ];
    gateway
}

#[tokio::test]
async fn dismiss_reloads_and_toasts() {
    let gateway = reports_gateway();
    let mut view = ReportsView::new();
    view.load(&gateway).await;

    assert!(view.dismiss(ReportId(1), &gateway).await.is_done());
    assert_eq!(gateway.calls_to("reports"), 2);
    assert_eq!(view.stats().dismissed, 1);
    assert_eq!(
        view.toasts_mut().latest().map(|t| t.message.clone()),
        Some("Report dismissed successfully!".to_string())
    );
}

#[tokio::test]
async fn resolve_failure_toasts_without_reload() {
    let gateway = reports_gateway();
    let mut view = ReportsView::new();
    view.load(&gateway).await;

    gateway.fail_with(Failure::Status(500));
    let outcome = view.resolve(ReportId(2), &gateway).await;
    assert!(matches!(outcome, MutationOutcome::Failed(_)));
    assert_eq!(gateway.calls_to("reports"), 1);
    assert_eq!(view.stats().pending, 2);
    let toast = view.toasts_mut().latest().cloned().expect("toast");
    assert_eq!(toast.message, "Failed to mark report as resolved. Please try again.");
}

#[tokio::test]
async fn resolve_sends_empty_action() {
    let gateway = reports_gateway();
    let mut view = ReportsView::new();
    view.load(&gateway).await;

    assert!(view.resolve(ReportId(2), &gateway).await.is_done());
    assert_eq!(
        gateway.resolutions.lock().unwrap()[0],
        (ReportId(2), ReportResolution::MarkResolved)
    );
    assert_eq!(view.stats().resolved, 1);
    view.query_mut().status = Some(ReportStatus::Pending);
    assert_eq!(view.visible().len(), 1);
}

#[tokio::test]
async fn edit_book_sends_only_changed_fields() {
    let gateway = reports_gateway();
    let mut view = ReportsView::new();
    view.load(&gateway).await;

    let reported = view.list().items()[0].book.clone().expect("book report");
    let mut draft = BookDraft::from_book(&reported);
    draft.pages = Some(412);

    assert!(view.edit_book(ReportId(1), &draft, 2025, &gateway).await.is_done());
    let resolutions = gateway.resolutions.lock().unwrap();
    let ReportResolution::EditBook(edit) = &resolutions[0].1 else {
        panic!("expected an edit");
    };
    assert_eq!(edit.pages, Some(412));
    assert!(edit.title.is_none());
    assert!(edit.authors.is_none());
    assert!(edit.subjects.is_none());
}

#[tokio::test]
async fn warn_author_validates_before_sending() {
    let gateway = reports_gateway();
    let mut view = ReportsView::new();
    view.load(&gateway).await;

    let outcome = view.warn_author(ReportId(1), "too short", &gateway).await;
    assert!(matches!(outcome, MutationOutcome::Invalid(_)));
    assert_eq!(gateway.calls_to("resolve"), 0);

    let outcome = view
        .warn_author(ReportId(1), "Please correct the page count of this book.", &gateway)
        .await;
    assert!(outcome.is_done());
    assert_eq!(
        gateway.resolutions.lock().unwrap()[0].1,
        ReportResolution::WarnAuthor {
            isbn: Some(isbn("9780441013593"))
        }
    );
    let messages: Vec<String> = view.toasts_mut().take().into_iter().map(|t| t.message).collect();
    assert_eq!(messages, vec!["Warning sent to ada@example.com".to_string()]);
}

#[tokio::test]
async fn edit_author_validates_then_toasts_without_sending() {
    let gateway = reports_gateway();
    let mut author_report = book_report(3, book("9780441478125", "Left Hand", vec![]));
    author_report.book = None;
    author_report.author = Some(author(3, "Ursula", "Le Guin"));
    gateway.reports.lock().unwrap().push(author_report);
    let mut view = ReportsView::new();
    view.load(&gateway).await;

    let blank = AuthorDraft {
        first_name: "Ursula".into(),
        last_name: "  ".into(),
    };
    let MutationOutcome::Invalid(errors) = view.edit_author(ReportId(3), &blank, &gateway).await
    else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.get("lastName"), Some("Last name is required"));

    let draft = AuthorDraft {
        first_name: "Ursula K.".into(),
        last_name: "Le Guin".into(),
    };
    let MutationOutcome::Invalid(errors) = view.edit_author(ReportId(1), &draft, &gateway).await
    else {
        panic!("book report has no author");
    };
    assert!(errors.get("author").is_some());

    assert!(view.edit_author(ReportId(3), &draft, &gateway).await.is_done());
    assert_eq!(gateway.calls_to("resolve"), 0);
    assert_eq!(gateway.calls_to("reports"), 2);
    assert_eq!(
        view.toasts_mut().latest().map(|t| t.message.clone()),
        Some("Author content updated successfully!".to_string())
    );
}

#[tokio::test]
async fn forbidden_action_reloads_and_warns() {
    let gateway = reports_gateway();
    let mut view = ReportsView::new();
    view.load(&gateway).await;

    gateway.fail_with(Failure::Status(403));
    let outcome = view
        .warn_author(ReportId(1), "Please correct the page count of this book.", &gateway)
        .await;
    assert!(matches!(outcome, MutationOutcome::Failed(_)));
    assert_eq!(gateway.calls_to("reports"), 2);
    assert_eq!(
        view.toasts_mut().latest().map(|t| t.toast_type),
        Some(ToastType::Warning)
    );
}
