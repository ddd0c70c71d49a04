//! CLI argument definitions for the Booksta client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "booksta",
    version,
    about = "Booksta client - browse the marketplace, manage stock and moderate reports",
    long_about = "Command-line client for the Booksta book-tracking and marketplace API.\n\n\
                  Reads connection settings from the platform config directory,\n\
                  BOOKSTA_API_BASE_URL / BOOKSTA_ACCESS_TOKEN, or the flags below."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Config file to read instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and environment).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer access token (overrides config and environment).
    #[arg(long = "token", value_name = "TOKEN", global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List marketplace books with their lowest price.
    Marketplace(MarketplaceArgs),

    /// Show the sellers offering one book.
    Sellers {
        #[arg(value_name = "ISBN")]
        isbn: String,
    },

    /// Browse the catalog with filters.
    Catalog(CatalogArgs),

    /// Manage your seller inventory.
    #[command(subcommand)]
    Inventory(InventoryCommand),

    /// Review and act on moderation reports.
    #[command(subcommand)]
    Reports(ReportsCommand),

    /// Show your reading shelves.
    Reading,

    /// Follow or unfollow an author or series, or toggle a favorite.
    Follow(FollowArgs),
}

#[derive(Args)]
pub struct MarketplaceArgs {
    /// Match title, author or ISBN.
    #[arg(long = "search", short = 's')]
    pub search: Option<String>,

    #[arg(long = "sort", value_enum, default_value = "title")]
    pub sort: MarketplaceSortArg,

    /// Only books with at least one copy for sale.
    #[arg(long = "in-stock")]
    pub in_stock: bool,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Match title or author.
    #[arg(long = "search", short = 's')]
    pub search: Option<String>,

    #[arg(long = "title")]
    pub title: Option<String>,

    #[arg(long = "year-min")]
    pub year_min: Option<i64>,

    #[arg(long = "year-max")]
    pub year_max: Option<i64>,

    #[arg(long = "pages-min")]
    pub pages_min: Option<i64>,

    #[arg(long = "pages-max")]
    pub pages_max: Option<i64>,

    /// Author id; repeat to match any of several.
    #[arg(long = "author", value_name = "ID")]
    pub authors: Vec<i64>,

    /// Subject id; repeat to match any of several.
    #[arg(long = "subject", value_name = "ID")]
    pub subjects: Vec<i64>,
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// List stocked books.
    List {
        #[arg(long = "search", short = 's')]
        search: Option<String>,

        #[arg(long = "sort", value_enum, default_value = "title")]
        sort: InventorySortArg,
    },

    /// Stock a new book.
    Add(StockArgs),

    /// Change quantity or price of a stocked book.
    Update(StockArgs),

    /// Remove a book from your inventory.
    Remove {
        #[arg(value_name = "ISBN")]
        isbn: String,
    },
}

#[derive(Args)]
pub struct StockArgs {
    #[arg(value_name = "ISBN")]
    pub isbn: String,

    #[arg(value_name = "QUANTITY")]
    pub quantity: String,

    /// Price per unit.
    #[arg(value_name = "PRICE")]
    pub price: String,
}

#[derive(Subcommand)]
pub enum ReportsCommand {
    /// List reports with summary counts.
    List {
        #[arg(long = "category", value_enum)]
        category: Option<ReportCategoryArg>,

        #[arg(long = "status", value_enum)]
        status: Option<ReportStatusArg>,

        #[arg(long = "search", short = 's')]
        search: Option<String>,
    },

    /// Dismiss a report.
    Dismiss {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Mark a report resolved without further action.
    Resolve {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Warn the author of the reported book.
    Warn {
        #[arg(value_name = "ID")]
        id: i64,

        #[arg(value_name = "MESSAGE")]
        message: String,
    },

    /// Correct the name of a reported author.
    EditAuthor {
        #[arg(value_name = "ID")]
        id: i64,

        #[arg(value_name = "FIRST_NAME")]
        first_name: String,

        #[arg(value_name = "LAST_NAME")]
        last_name: String,
    },
}

#[derive(Args)]
pub struct FollowArgs {
    #[arg(value_enum)]
    pub kind: FollowKindArg,

    /// Author or series id, or an ISBN for favorites.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Print the current status without changing it.
    #[arg(long = "status")]
    pub status_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FollowKindArg {
    Author,
    Series,
    Favorite,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MarketplaceSortArg {
    Title,
    PriceLow,
    PriceHigh,
    Sellers,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InventorySortArg {
    Title,
    Price,
    Quantity,
    Recent,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportCategoryArg {
    Book,
    Author,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportStatusArg {
    Pending,
    Resolved,
    Dismissed,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
