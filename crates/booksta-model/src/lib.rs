//! Entity records shared by the Booksta gateway and view-models.

pub mod book;
pub mod error;
pub mod ids;
pub mod inventory;
pub mod marketplace;
pub mod moderation;
pub mod reading;
pub mod report;
pub mod user;

pub use book::{Author, Book, Series, Subject};
pub use error::{ModelError, Result};
pub use ids::{AuthorId, Isbn, ReportId, SellerId, SeriesId, SubjectId, UserId};
pub use inventory::{InventoryDraft, InventoryItem};
pub use marketplace::{MarketplaceListing, SellerListing};
pub use moderation::{BookDraft, BookEdit, ReportResolution};
pub use reading::{BookWithReadingStatus, ReadingEvent, ReadingEventType};
pub use report::{Report, ReportCategory, ReportStatus};
pub use user::{Role, User};
