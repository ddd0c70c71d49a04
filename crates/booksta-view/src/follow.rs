//! Optimistic follow / unfollow (and favorite) toggle with rollback.
//!
//! The flag flips before the request is sent. If the request fails the
//! previous value is restored, the parent is notified again and an error
//! toast is queued. Only one toggle may be in flight at a time.

use std::fmt;

use booksta_gateway::{GatewayError, RelationshipGateway, RelationshipKind, RelationshipTarget};

use crate::identity::Identity;
use crate::lifecycle::Liveness;
use crate::toast::{Toast, ToastQueue};

const TOGGLE_FAILED: &str = "Failed to update follow status. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowFlag {
    #[default]
    Unknown,
    Following,
    NotFollowing,
}

impl FollowFlag {
    pub fn from_following(following: bool) -> Self {
        if following {
            Self::Following
        } else {
            Self::NotFollowing
        }
    }

    /// Unknown reads as not following.
    pub fn is_following(self) -> bool {
        self == Self::Following
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Loading...",
            Self::Following => "Following",
            Self::NotFollowing => "Follow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Resolved(FollowFlag),
    /// The caller should query the target's status and pass the result to
    /// [`FollowToggle::apply_status`].
    QueryStatus(RelationshipTarget),
}

/// A toggle that has flipped the flag and awaits the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub target: RelationshipTarget,
    pub kind: RelationshipKind,
    previous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    RedirectToLogin,
    /// A toggle is already in flight.
    Busy,
    Started(PendingToggle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Confirmed,
    RolledBack,
    /// Torn down before the response; nothing was written.
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleResult {
    RedirectToLogin,
    Busy,
    Settled(SettleOutcome),
}

type ChangeListener = Box<dyn FnMut(bool) + Send>;

pub struct FollowToggle {
    target: RelationshipTarget,
    hint: Option<bool>,
    flag: FollowFlag,
    in_flight: bool,
    liveness: Liveness,
    toasts: ToastQueue,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for FollowToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FollowToggle")
            .field("target", &self.target)
            .field("flag", &self.flag)
            .field("in_flight", &self.in_flight)
            .field("alive", &self.liveness.is_alive())
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

impl FollowToggle {
    /// `hint` is the caller's knowledge of the current state, if any.
    pub fn new(target: RelationshipTarget, hint: Option<bool>) -> Self {
        Self {
            target,
            hint,
            flag: FollowFlag::Unknown,
            in_flight: false,
            liveness: Liveness::new(),
            toasts: ToastQueue::default(),
            on_change: None,
        }
    }

    /// Called with the new value whenever the flag flips after mount.
    #[must_use]
    pub fn with_on_change(mut self, listener: impl FnMut(bool) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn target(&self) -> &RelationshipTarget {
        &self.target
    }

    pub fn flag(&self) -> FollowFlag {
        self.flag
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    pub fn unmount(&self) {
        self.liveness.unmount();
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    fn notify(&mut self, following: bool) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(following);
        }
    }

    pub fn mount(&mut self, identity: Option<&Identity>) -> MountOutcome {
        if let Some(hint) = self.hint {
            self.flag = FollowFlag::from_following(hint);
            return MountOutcome::Resolved(self.flag);
        }
        if identity.is_none() {
            self.flag = FollowFlag::NotFollowing;
            return MountOutcome::Resolved(self.flag);
        }
        MountOutcome::QueryStatus(self.target.clone())
    }

    /// A failed query resolves to not following. Ignored while a toggle is
    /// in flight.
    pub fn apply_status(&mut self, result: Result<bool, GatewayError>) {
        if !self.liveness.is_alive() {
            tracing::debug!(relationship = %self.target, "dropping status after unmount");
            return;
        }
        if self.in_flight {
            tracing::debug!(relationship = %self.target, "dropping status during toggle");
            return;
        }
        self.flag = match result {
            Ok(following) => FollowFlag::from_following(following),
            Err(err) => {
                tracing::warn!(relationship = %self.target, error = %err, "status query failed");
                FollowFlag::NotFollowing
            }
        };
    }

    /// Mounts and, when needed, queries the status through `gateway`.
    pub async fn mount_with<G>(&mut self, identity: Option<&Identity>, gateway: &G) -> FollowFlag
    where
        G: RelationshipGateway + ?Sized,
    {
        if let MountOutcome::QueryStatus(target) = self.mount(identity) {
            let result = gateway.query_relationship_status(&target).await;
            self.apply_status(result);
        }
        self.flag
    }

    pub fn begin_toggle(&mut self, identity: Option<&Identity>) -> ToggleOutcome {
        if identity.is_none() {
            return ToggleOutcome::RedirectToLogin;
        }
        // Unknown means the status query has not answered yet.
        if self.in_flight || self.flag == FollowFlag::Unknown {
            return ToggleOutcome::Busy;
        }
        let previous = self.flag.is_following();
        self.flag = FollowFlag::from_following(!previous);
        self.in_flight = true;
        self.notify(!previous);
        ToggleOutcome::Started(PendingToggle {
            target: self.target.clone(),
            kind: RelationshipKind::toggling(previous),
            previous,
        })
    }

    pub fn settle(
        &mut self,
        pending: PendingToggle,
        result: Result<(), GatewayError>,
    ) -> SettleOutcome {
        if !self.liveness.is_alive() {
            tracing::debug!(
                relationship = %pending.target,
                "dropping toggle result after unmount"
            );
            return SettleOutcome::Unmounted;
        }
        self.in_flight = false;
        match result {
            Ok(()) => SettleOutcome::Confirmed,
            Err(err) => {
                tracing::error!(
                    relationship = %pending.target,
                    kind = ?pending.kind,
                    error = %err,
                    "relationship update failed, rolling back"
                );
                self.flag = FollowFlag::from_following(pending.previous);
                self.notify(pending.previous);
                self.toasts.push(Toast::error(TOGGLE_FAILED));
                SettleOutcome::RolledBack
            }
        }
    }

    pub async fn toggle<G>(&mut self, identity: Option<&Identity>, gateway: &G) -> ToggleResult
    where
        G: RelationshipGateway + ?Sized,
    {
        match self.begin_toggle(identity) {
            ToggleOutcome::RedirectToLogin => ToggleResult::RedirectToLogin,
            ToggleOutcome::Busy => ToggleResult::Busy,
            ToggleOutcome::Started(pending) => {
                let result = gateway
                    .mutate_relationship(pending.kind, &pending.target)
                    .await;
                ToggleResult::Settled(self.settle(pending, result))
            }
        }
    }
}
