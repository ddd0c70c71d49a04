//! The signed-in user, injected rather than read from global storage.

use booksta_model::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

impl Identity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

pub trait IdentityProvider {
    fn current(&self) -> Option<Identity>;
}

/// A provider that always answers the same thing.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<Identity>);

impl StaticIdentity {
    pub fn signed_in(user_id: UserId) -> Self {
        Self(Some(Identity::new(user_id)))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Option<Identity> {
        self.0.clone()
    }
}
