//! Report moderation: classification, filtering, badges and admin actions.

use booksta_gateway::{CollectionSource, GatewayError, ReportGateway};
use booksta_model::{
    BookDraft, BookEdit, Report, ReportCategory, ReportId, ReportResolution, ReportStatus,
};

use crate::error::ViewError;
use crate::list::{ListState, LoadOutcome, MutationOutcome};
use crate::projection::matches_search;
use crate::toast::{Toast, ToastQueue};
use crate::validation::{self, AuthorDraft, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Warning,
    Success,
    Neutral,
    Info,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

pub fn status_badge(status: ReportStatus) -> Badge {
    match status {
        ReportStatus::Pending => Badge {
            label: "Pending",
            tone: BadgeTone::Warning,
        },
        ReportStatus::Resolved => Badge {
            label: "Resolved",
            tone: BadgeTone::Success,
        },
        ReportStatus::Dismissed => Badge {
            label: "Dismissed",
            tone: BadgeTone::Neutral,
        },
    }
}

pub fn category_badge(category: ReportCategory) -> Badge {
    match category {
        ReportCategory::Book => Badge {
            label: "BOOK REPORT",
            tone: BadgeTone::Info,
        },
        ReportCategory::Author => Badge {
            label: "AUTHOR REPORT",
            tone: BadgeTone::Accent,
        },
        ReportCategory::Unknown => Badge {
            label: "UNKNOWN REPORT",
            tone: BadgeTone::Neutral,
        },
    }
}

/// Category / status / free-text query. `None` means "ALL".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub category: Option<ReportCategory>,
    pub status: Option<ReportStatus>,
    pub search: String,
}

impl ReportQuery {
    pub fn matches(&self, report: &Report) -> bool {
        let book_title = report.book.as_ref().map(|book| book.title.as_str());
        let author_name = report.author.as_ref().map(booksta_model::Author::full_name);

        self.category.is_none_or(|category| report.category() == category)
            && self.status.is_none_or(|status| report.report_status == status)
            && matches_search(
                &self.search,
                [
                    report.subject.as_str(),
                    report.message_report.as_str(),
                    report.user.first_name.as_str(),
                    report.user.last_name.as_str(),
                ]
                .into_iter()
                .chain(book_title)
                .chain(author_name.as_deref()),
            )
    }
}

/// Reports matching every part of the query, in source order.
pub fn filter_reports<'a>(
    reports: &'a [Report],
    category: Option<ReportCategory>,
    status: Option<ReportStatus>,
    search: &str,
) -> Vec<&'a Report> {
    let query = ReportQuery {
        category,
        status,
        search: search.to_string(),
    };
    reports.iter().filter(|report| query.matches(report)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub book_reports: usize,
    pub author_reports: usize,
    pub pending: usize,
    pub resolved: usize,
    pub dismissed: usize,
}

pub fn report_stats(reports: &[Report]) -> ReportStats {
    reports
        .iter()
        .fold(ReportStats::default(), |mut stats, report| {
            stats.total += 1;
            match report.category() {
                ReportCategory::Book => stats.book_reports += 1,
                ReportCategory::Author => stats.author_reports += 1,
                ReportCategory::Unknown => {}
            }
            match report.report_status {
                ReportStatus::Pending => stats.pending += 1,
                ReportStatus::Resolved => stats.resolved += 1,
                ReportStatus::Dismissed => stats.dismissed += 1,
            }
            stats
        })
}

// ============================================================================
// Moderation screen
// ============================================================================

#[derive(Debug, Clone)]
pub struct ReportsView {
    list: ListState<Report>,
    query: ReportQuery,
    toasts: ToastQueue,
}

impl Default for ReportsView {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportsView {
    pub fn new() -> Self {
        Self {
            list: ListState::new("reports"),
            query: ReportQuery::default(),
            toasts: ToastQueue::default(),
        }
    }

    pub fn list(&self) -> &ListState<Report> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<Report> {
        &mut self.list
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn query_mut(&mut self) -> &mut ReportQuery {
        &mut self.query
    }

    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: CollectionSource<Report> + ?Sized,
    {
        self.list.load(source).await
    }

    pub fn visible(&self) -> Vec<&Report> {
        self.list
            .items()
            .iter()
            .filter(|report| self.query.matches(report))
            .collect()
    }

    pub fn stats(&self) -> ReportStats {
        report_stats(self.list.items())
    }

    fn find(&self, id: ReportId) -> Option<&Report> {
        self.list.items().iter().find(|report| report.id == id)
    }

    pub async fn dismiss<G>(&mut self, id: ReportId, gateway: &G) -> MutationOutcome
    where
        G: ReportGateway + CollectionSource<Report> + ?Sized,
    {
        match gateway.dismiss_report(id).await {
            Ok(()) => {
                self.load(gateway).await;
                self.toasts.push(Toast::success("Report dismissed successfully!"));
                MutationOutcome::Done
            }
            Err(err) => self.failed(
                "dismiss report",
                "Failed to dismiss report. Please try again.",
                &err,
            ),
        }
    }

    /// Marks a report resolved with no follow-up action.
    pub async fn resolve<G>(&mut self, id: ReportId, gateway: &G) -> MutationOutcome
    where
        G: ReportGateway + CollectionSource<Report> + ?Sized,
    {
        match gateway.resolve_report(id, &ReportResolution::MarkResolved).await {
            Ok(()) => {
                self.load(gateway).await;
                self.toasts.push(Toast::success("Report marked as resolved!"));
                MutationOutcome::Done
            }
            Err(err) => self.failed(
                "resolve report",
                "Failed to mark report as resolved. Please try again.",
                &err,
            ),
        }
    }

    /// Warns the author of the reported book once the message passes validation.
    pub async fn warn_author<G>(
        &mut self,
        id: ReportId,
        message: &str,
        gateway: &G,
    ) -> MutationOutcome
    where
        G: ReportGateway + CollectionSource<Report> + ?Sized,
    {
        if let Err(errors) = validation::validate_warning(message) {
            return MutationOutcome::Invalid(errors);
        }
        let report = self.find(id);
        let isbn = report.and_then(|r| r.book.as_ref()).map(|book| book.isbn.clone());
        let success = match report.and_then(|r| r.user.email.as_deref()) {
            Some(email) => format!("Warning sent to {email}"),
            None => "Warning sent".to_string(),
        };
        let resolution = ReportResolution::WarnAuthor { isbn };
        self.submit_action(id, &resolution, success, gateway).await
    }

    /// Sends the changed fields of a corrected book.
    pub async fn edit_book<G>(
        &mut self,
        id: ReportId,
        draft: &BookDraft,
        current_year: i32,
        gateway: &G,
    ) -> MutationOutcome
    where
        G: ReportGateway + CollectionSource<Report> + ?Sized,
    {
        if let Err(errors) = validation::validate_book_draft(draft, current_year) {
            return MutationOutcome::Invalid(errors);
        }
        let Some(original) = self.find(id).and_then(|report| report.book.as_ref()) else {
            let mut errors = FieldErrors::default();
            errors.insert("book", "This report does not reference a book");
            return MutationOutcome::Invalid(errors);
        };
        let edit = match BookEdit::diff(original, draft) {
            Ok(edit) => edit,
            Err(err) => {
                let mut errors = FieldErrors::default();
                errors.insert("isbn", err.to_string());
                return MutationOutcome::Invalid(errors);
            }
        };
        let resolution = ReportResolution::EditBook(edit);
        self.submit_action(
            id,
            &resolution,
            "Book content updated successfully!".to_string(),
            gateway,
        )
        .await
    }

    /// Validates a corrected author. The API has no author edit, so nothing
    /// is sent and the report stays as it is.
    pub async fn edit_author<S>(
        &mut self,
        id: ReportId,
        draft: &AuthorDraft,
        source: &S,
    ) -> MutationOutcome
    where
        S: CollectionSource<Report> + ?Sized,
    {
        if let Err(errors) = validation::validate_author_draft(draft) {
            return MutationOutcome::Invalid(errors);
        }
        if self.find(id).and_then(|report| report.author.as_ref()).is_none() {
            let mut errors = FieldErrors::default();
            errors.insert("author", "This report does not reference an author");
            return MutationOutcome::Invalid(errors);
        }
        self.toasts.push(Toast::success("Author content updated successfully!"));
        self.load(source).await;
        MutationOutcome::Done
    }

    async fn submit_action<G>(
        &mut self,
        id: ReportId,
        resolution: &ReportResolution,
        success: String,
        gateway: &G,
    ) -> MutationOutcome
    where
        G: ReportGateway + CollectionSource<Report> + ?Sized,
    {
        match gateway.resolve_report(id, resolution).await {
            Ok(()) => {
                self.toasts.push(Toast::success(success));
                self.load(gateway).await;
                MutationOutcome::Done
            }
            // The API has been seen applying the change and still answering 403.
            Err(GatewayError::Forbidden) => {
                self.load(gateway).await;
                self.toasts.push(Toast::warning(
                    "Action completed but received permission error. Please check if changes were applied.",
                ));
                MutationOutcome::Failed(ViewError::mutation(
                    "complete action",
                    &GatewayError::Forbidden,
                ))
            }
            Err(err) => self.failed(
                "complete action",
                "Failed to complete action. Please try again.",
                &err,
            ),
        }
    }

    fn failed(&mut self, operation: &str, message: &str, err: &GatewayError) -> MutationOutcome {
        tracing::error!(error = %err, "failed to {operation}");
        self.toasts.push(Toast::error(message));
        MutationOutcome::Failed(ViewError::mutation(operation, err))
    }
}
