//! Raw collection state shared by every list screen.

use booksta_gateway::{CollectionSource, GatewayError};

use crate::error::ViewError;
use crate::lifecycle::{Liveness, RequestToken, Sequencer};
use crate::validation::FieldErrors;

/// What happened to a load response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer request was issued after this one.
    Stale,
    /// The view was torn down before the response arrived.
    Unmounted,
}

/// What a write did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Done,
    /// Rejected locally; nothing was sent.
    Invalid(FieldErrors),
    Failed(ViewError),
}

impl MutationOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Local rejections become [`ViewError::Validation`].
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            Self::Done => Ok(()),
            Self::Invalid(errors) => Err(ViewError::Validation(errors)),
            Self::Failed(err) => Err(err),
        }
    }
}

/// Last successful collection plus loading / error flags.
#[derive(Debug, Clone)]
pub struct ListState<E> {
    what: &'static str,
    items: Vec<E>,
    loading: bool,
    error: Option<ViewError>,
    sequencer: Sequencer,
    liveness: Liveness,
}

impl<E> ListState<E> {
    /// `what` names the collection in error messages.
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            items: Vec::new(),
            loading: false,
            error: None,
            sequencer: Sequencer::default(),
            liveness: Liveness::new(),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<E> {
        &mut self.items
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    pub fn unmount(&self) {
        self.liveness.unmount();
    }

    pub fn begin_load(&mut self) -> RequestToken {
        self.loading = true;
        self.sequencer.issue()
    }

    /// Applies a response if it belongs to the latest request and the view is
    /// still mounted. On failure the previous items are kept.
    pub fn finish_load(
        &mut self,
        token: RequestToken,
        result: Result<Vec<E>, GatewayError>,
    ) -> LoadOutcome {
        if !self.liveness.is_alive() {
            tracing::debug!(what = self.what, "dropping load response after unmount");
            return LoadOutcome::Unmounted;
        }
        if !self.sequencer.is_current(token) {
            tracing::debug!(what = self.what, ?token, "discarding stale load response");
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::error!(what = self.what, error = %err, "load failed");
                self.error = Some(ViewError::load(self.what, &err));
                LoadOutcome::Failed
            }
        }
    }

    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: CollectionSource<E> + ?Sized,
    {
        let token = self.begin_load();
        let result = source.fetch_collection().await;
        self.finish_load(token, result)
    }
}
