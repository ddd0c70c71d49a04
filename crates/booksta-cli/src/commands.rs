//! Command handlers: drive a view-model against the API and print the result.

use anyhow::{Context, Result, anyhow, bail};
use booksta_gateway::{GatewayConfig, HttpGateway, RelationshipTarget};
use booksta_model::{AuthorId, Isbn, ReportCategory, ReportId, ReportStatus, SeriesId, UserId};
use booksta_view::catalog::{
    AUTHOR_IDS, PAGES_MAX, PAGES_MIN, SUBJECT_IDS, TITLE, YEAR_MAX, YEAR_MIN,
};
use booksta_view::{
    AuthorDraft, CatalogView, FilterValue, FollowToggle, Identity, IdentityProvider,
    InventoryForm, InventorySort, InventoryView, ListState, LoadOutcome, MarketplaceSort,
    MarketplaceView, MutationOutcome, ReadingView, ReportsView, SettleOutcome, StaticIdentity,
    Toast, ToggleResult, ViewError,
};
use tracing::info;

use booksta_cli::render::{
    catalog_summary, catalog_table, field_error_lines, follow_line, inventory_summary,
    inventory_table, marketplace_summary, marketplace_table, report_summary, reports_table,
    sellers_table, shelves_summary, shelves_table, toast_line,
};

use crate::cli::{
    CatalogArgs, Cli, FollowArgs, FollowKindArg, InventoryCommand, InventorySortArg,
    MarketplaceArgs, MarketplaceSortArg, ReportCategoryArg, ReportStatusArg, ReportsCommand,
    StockArgs,
};

/// Loads the config, applies flag overrides and builds the HTTP gateway.
pub fn connect(cli: &Cli) -> Result<HttpGateway> {
    let mut config =
        GatewayConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(token) = &cli.token {
        config.access_token = Some(token.clone());
    }
    info!(base_url = %config.base_url, signed_in = config.access_token.is_some(), "connecting");
    HttpGateway::new(config).context("failed to create API client")
}

/// The API resolves the user from the bearer token, so only presence matters.
fn identity(gateway: &HttpGateway) -> StaticIdentity {
    if gateway.config().access_token.is_some() {
        StaticIdentity::signed_in(UserId(0))
    } else {
        StaticIdentity::anonymous()
    }
}

fn ensure_loaded<E>(outcome: LoadOutcome, list: &ListState<E>) -> Result<()> {
    match (outcome, list.error()) {
        (LoadOutcome::Failed, Some(err)) => Err(err.clone().into()),
        (LoadOutcome::Failed, None) => bail!("failed to load data"),
        _ => Ok(()),
    }
}

fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        println!("{}", toast_line(toast));
    }
}

fn finish_mutation(outcome: MutationOutcome, toasts: &[Toast]) -> Result<()> {
    print_toasts(toasts);
    if let MutationOutcome::Invalid(errors) = &outcome {
        eprintln!("{}", field_error_lines(errors));
    }
    Ok(outcome.into_result()?)
}

fn parse_isbn(value: &str) -> Result<Isbn> {
    Isbn::new(value).with_context(|| format!("invalid ISBN {value:?}"))
}

// ============================================================================
// Browse
// ============================================================================

pub async fn run_marketplace(gateway: &HttpGateway, args: &MarketplaceArgs) -> Result<()> {
    let mut view = MarketplaceView::new();
    let outcome = view.load(gateway).await;
    ensure_loaded(outcome, view.list())?;

    if let Some(search) = &args.search {
        view.set_search(search.as_str());
    }
    view.set_sort(match args.sort {
        MarketplaceSortArg::Title => MarketplaceSort::Title,
        MarketplaceSortArg::PriceLow => MarketplaceSort::PriceLow,
        MarketplaceSortArg::PriceHigh => MarketplaceSort::PriceHigh,
        MarketplaceSortArg::Sellers => MarketplaceSort::Sellers,
    });
    view.set_in_stock_only(args.in_stock);

    let visible = view.visible();
    println!("{}", marketplace_table(&visible));
    println!("{}", marketplace_summary(&view.stats(), visible.len()));
    Ok(())
}

pub async fn run_sellers(gateway: &HttpGateway, isbn: &str) -> Result<()> {
    let isbn = parse_isbn(isbn)?;
    let mut view = MarketplaceView::new();
    if view.load_sellers(isbn.clone(), gateway).await == LoadOutcome::Failed {
        bail!("failed to load sellers for {isbn}");
    }
    let sellers = view.detail().map(|detail| detail.sellers.as_slice()).unwrap_or_default();
    if sellers.is_empty() {
        println!("No sellers for {isbn}");
        return Ok(());
    }
    println!("{}", sellers_table(sellers));
    Ok(())
}

pub async fn run_catalog(gateway: &HttpGateway, args: &CatalogArgs) -> Result<()> {
    let mut view = CatalogView::new();
    let outcome = view.load(gateway).await;
    ensure_loaded(outcome, view.list())?;

    view.apply_filters([
        (TITLE, FilterValue::Text(args.title.clone().unwrap_or_default())),
        (YEAR_MIN, FilterValue::Number(args.year_min)),
        (YEAR_MAX, FilterValue::Number(args.year_max)),
        (PAGES_MIN, FilterValue::Number(args.pages_min)),
        (PAGES_MAX, FilterValue::Number(args.pages_max)),
        (AUTHOR_IDS, FilterValue::Ids(args.authors.clone())),
        (SUBJECT_IDS, FilterValue::Ids(args.subjects.clone())),
    ])?;
    if let Some(search) = &args.search {
        view.filters_mut().set_search(search.as_str());
    }

    let visible = view.visible();
    println!("{}", catalog_table(&visible));
    println!(
        "{}",
        catalog_summary(
            visible.len(),
            view.list().total_count(),
            view.filters().active_filter_count()
        )
    );
    Ok(())
}

pub async fn run_reading(gateway: &HttpGateway) -> Result<()> {
    let mut view = ReadingView::new();
    let outcome = view.load(gateway).await;
    ensure_loaded(outcome, view.list())?;
    if !view.has_no_books() {
        println!("{}", shelves_table(view.shelves()));
    }
    println!("{}", shelves_summary(view.shelves()));
    Ok(())
}

// ============================================================================
// Inventory
// ============================================================================

fn stock_form(args: &StockArgs) -> InventoryForm {
    InventoryForm::new(args.isbn.as_str(), args.quantity.as_str(), args.price.as_str())
}

pub async fn run_inventory(gateway: &HttpGateway, command: &InventoryCommand) -> Result<()> {
    let mut view = InventoryView::new();
    match command {
        InventoryCommand::List { search, sort } => {
            let outcome = view.load(gateway).await;
            ensure_loaded(outcome, view.items())?;
            if let Some(search) = search {
                view.set_search(search.as_str());
            }
            view.set_sort(match sort {
                InventorySortArg::Title => InventorySort::Title,
                InventorySortArg::Price => InventorySort::Price,
                InventorySortArg::Quantity => InventorySort::Quantity,
                InventorySortArg::Recent => InventorySort::Recent,
            });
            let visible = view.visible();
            println!("{}", inventory_table(&visible));
            println!(
                "{}",
                inventory_summary(view.items().total_count(), view.total_value())
            );
            Ok(())
        }
        InventoryCommand::Add(args) => {
            let outcome = view.add(&stock_form(args), gateway).await;
            finish_mutation(outcome, &view.toasts_mut().take())
        }
        InventoryCommand::Update(args) => {
            let outcome = view.update(&stock_form(args), gateway).await;
            finish_mutation(outcome, &view.toasts_mut().take())
        }
        InventoryCommand::Remove { isbn } => {
            let isbn = parse_isbn(isbn)?;
            let outcome = view.remove(&isbn, gateway).await;
            finish_mutation(outcome, &view.toasts_mut().take())
        }
    }
}

// ============================================================================
// Moderation
// ============================================================================

pub async fn run_reports(gateway: &HttpGateway, command: &ReportsCommand) -> Result<()> {
    let mut view = ReportsView::new();
    match command {
        ReportsCommand::List {
            category,
            status,
            search,
        } => {
            let outcome = view.load(gateway).await;
            ensure_loaded(outcome, view.list())?;
            let query = view.query_mut();
            query.category = category.map(|category| match category {
                ReportCategoryArg::Book => ReportCategory::Book,
                ReportCategoryArg::Author => ReportCategory::Author,
            });
            query.status = status.map(|status| match status {
                ReportStatusArg::Pending => ReportStatus::Pending,
                ReportStatusArg::Resolved => ReportStatus::Resolved,
                ReportStatusArg::Dismissed => ReportStatus::Dismissed,
            });
            query.search = search.clone().unwrap_or_default();
            println!("{}", reports_table(&view.visible()));
            println!("{}", report_summary(&view.stats()));
            Ok(())
        }
        ReportsCommand::Dismiss { id } => {
            let outcome = view.dismiss(ReportId(*id), gateway).await;
            finish_mutation(outcome, &view.toasts_mut().take())
        }
        ReportsCommand::Resolve { id } => {
            let outcome = view.resolve(ReportId(*id), gateway).await;
            finish_mutation(outcome, &view.toasts_mut().take())
        }
        ReportsCommand::Warn { id, message } => {
            // The reporter and reported book come from the loaded list.
            let outcome = view.load(gateway).await;
            ensure_loaded(outcome, view.list())?;
            let outcome = view.warn_author(ReportId(*id), message, gateway).await;
            finish_mutation(outcome, &view.toasts_mut().take())
        }
        ReportsCommand::EditAuthor {
            id,
            first_name,
            last_name,
        } => {
            let outcome = view.load(gateway).await;
            ensure_loaded(outcome, view.list())?;
            let draft = AuthorDraft {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
            };
            let outcome = view.edit_author(ReportId(*id), &draft, gateway).await;
            finish_mutation(outcome, &view.toasts_mut().take())
        }
    }
}

// ============================================================================
// Relationships
// ============================================================================

fn follow_target(args: &FollowArgs) -> Result<RelationshipTarget> {
    let numeric = || {
        args.target
            .trim()
            .parse::<i64>()
            .with_context(|| format!("expected a numeric id, got {:?}", args.target))
    };
    Ok(match args.kind {
        FollowKindArg::Author => RelationshipTarget::Author(AuthorId(numeric()?)),
        FollowKindArg::Series => RelationshipTarget::Series(SeriesId(numeric()?)),
        FollowKindArg::Favorite => RelationshipTarget::Favorite(parse_isbn(&args.target)?),
    })
}

pub async fn run_follow(gateway: &HttpGateway, args: &FollowArgs) -> Result<()> {
    let target = follow_target(args)?;
    let identity: Option<Identity> = identity(gateway).current();
    let mut toggle = FollowToggle::new(target, None);
    toggle.mount_with(identity.as_ref(), gateway).await;
    if args.status_only {
        println!("{}", follow_line(toggle.target(), toggle.flag()));
        return Ok(());
    }

    match toggle.toggle(identity.as_ref(), gateway).await {
        ToggleResult::RedirectToLogin => {
            eprintln!("set BOOKSTA_ACCESS_TOKEN or pass --token");
            Err(ViewError::NotAuthenticated.into())
        }
        ToggleResult::Busy => Err(anyhow!("another update is still in flight")),
        ToggleResult::Settled(SettleOutcome::RolledBack) => {
            print_toasts(&toggle.toasts_mut().take());
            bail!("{} was left unchanged", toggle.target())
        }
        ToggleResult::Settled(_) => {
            println!("{}", follow_line(toggle.target(), toggle.flag()));
            Ok(())
        }
    }
}
