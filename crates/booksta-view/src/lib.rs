//! View-models for the Booksta client.
//!
//! Each screen is a plain state struct: synchronous mutators for user input,
//! a pure projection for rendering, and async operations that talk to the
//! gateway traits. Loads are split into `begin_*` / `finish_*` so a message
//! loop can run the fetch as a task.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod follow;
pub mod identity;
pub mod inventory;
pub mod lifecycle;
pub mod list;
pub mod marketplace;
pub mod projection;
pub mod reading;
pub mod reports;
pub mod toast;
pub mod validation;

pub use catalog::CatalogView;
pub use error::{ErrorCategory, Result, ViewError};
pub use filter::{FilterError, FilterField, FilterOption, FilterState, FilterValue};
pub use follow::{
    FollowFlag, FollowToggle, MountOutcome, SettleOutcome, ToggleOutcome, ToggleResult,
};
pub use identity::{Identity, IdentityProvider, StaticIdentity};
pub use inventory::{InventorySort, InventoryView};
pub use lifecycle::{Liveness, RequestToken, Sequencer};
pub use list::{ListState, LoadOutcome, MutationOutcome};
pub use marketplace::{MarketplaceQuery, MarketplaceSort, MarketplaceStats, MarketplaceView};
pub use reading::{ReadingView, Shelves};
pub use reports::{ReportQuery, ReportStats, ReportsView, filter_reports, report_stats};
pub use toast::{Toast, ToastQueue, ToastType};
pub use validation::{AuthorDraft, FieldErrors, InventoryForm, InventoryMode};
