//! The remote contract the view-models depend on.
//!
//! Every method is a suspension point. Implementations must be `Send + Sync`
//! so they can be shared with spawned tasks.

use std::fmt;

use async_trait::async_trait;
use booksta_model::{
    AuthorId, InventoryDraft, InventoryItem, Isbn, ReportId, ReportResolution, SeriesId,
};

use crate::error::Result;

/// Fetches a whole collection of `E`.
#[async_trait]
pub trait CollectionSource<E>: Send + Sync {
    async fn fetch_collection(&self) -> Result<Vec<E>>;
}

/// Fetches the detail `D` addressed by `K`.
#[async_trait]
pub trait DetailSource<K, D>: Send + Sync
where
    K: Sync,
{
    async fn fetch_detail(&self, key: &K) -> Result<D>;
}

/// Something a user can follow or favorite.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipTarget {
    Author(AuthorId),
    Series(SeriesId),
    Favorite(Isbn),
}

impl fmt::Display for RelationshipTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author(id) => write!(f, "author {id}"),
            Self::Series(id) => write!(f, "series {id}"),
            Self::Favorite(isbn) => write!(f, "favorite {isbn}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Follow,
    Unfollow,
}

impl RelationshipKind {
    /// The mutation that moves a flag away from `currently_following`.
    pub fn toggling(currently_following: bool) -> Self {
        if currently_following {
            Self::Unfollow
        } else {
            Self::Follow
        }
    }
}

#[async_trait]
pub trait RelationshipGateway: Send + Sync {
    async fn mutate_relationship(
        &self,
        kind: RelationshipKind,
        target: &RelationshipTarget,
    ) -> Result<()>;

    async fn query_relationship_status(&self, target: &RelationshipTarget) -> Result<bool>;
}

/// Writes against the current seller's inventory.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    async fn create_item(&self, draft: &InventoryDraft) -> Result<InventoryItem>;

    async fn update_item(&self, draft: &InventoryDraft) -> Result<InventoryItem>;

    async fn delete_item(&self, isbn: &Isbn) -> Result<()>;
}

/// Moderation actions on reports.
#[async_trait]
pub trait ReportGateway: Send + Sync {
    async fn dismiss_report(&self, id: ReportId) -> Result<()>;

    async fn resolve_report(&self, id: ReportId, resolution: &ReportResolution) -> Result<()>;
}
