//! Book catalog with the filter panel.

use std::collections::BTreeMap;

use booksta_gateway::CollectionSource;
use booksta_model::{AuthorId, Book, SubjectId};

use crate::error::Result;
use crate::filter::{FilterField, FilterOption, FilterState, FilterValue};
use crate::list::{ListState, LoadOutcome};
use crate::projection::{compare_title, in_range, matches_search, project};

pub const TITLE: &str = "title";
pub const YEAR_MIN: &str = "yearMin";
pub const YEAR_MAX: &str = "yearMax";
pub const PAGES_MIN: &str = "pagesMin";
pub const PAGES_MAX: &str = "pagesMax";
pub const AUTHOR_IDS: &str = "authorIds";
pub const SUBJECT_IDS: &str = "subjectIds";

/// The catalog filter panel.
pub fn catalog_fields() -> Vec<FilterField> {
    vec![
        FilterField::Text {
            name: TITLE.into(),
            label: "Title".into(),
            placeholder: "Search by title...".into(),
        },
        FilterField::Range {
            name_min: YEAR_MIN.into(),
            name_max: YEAR_MAX.into(),
            label: "Publication year".into(),
            min: Some(1000),
            max: None,
        },
        FilterField::Range {
            name_min: PAGES_MIN.into(),
            name_max: PAGES_MAX.into(),
            label: "Pages".into(),
            min: Some(1),
            max: None,
        },
        FilterField::MultiSelect {
            name: AUTHOR_IDS.into(),
            label: "Authors".into(),
            options: Vec::new(),
        },
        FilterField::MultiSelect {
            name: SUBJECT_IDS.into(),
            label: "Genres".into(),
            options: Vec::new(),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    list: ListState<Book>,
    filters: FilterState,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self {
            list: ListState::new("books"),
            filters: FilterState::from_fields(catalog_fields()),
        }
    }

    pub fn list(&self) -> &ListState<Book> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<Book> {
        &mut self.list
    }

    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: CollectionSource<Book> + ?Sized,
    {
        self.list.load(source).await
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Sets several draft values and applies them. Nothing changes on error.
    pub fn apply_filters<I, K>(&mut self, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, FilterValue)>,
        K: Into<String>,
    {
        self.filters.update_filters(updates)?;
        self.filters.apply();
        Ok(())
    }

    fn matches(&self, book: &Book) -> bool {
        let filters = &self.filters;
        let author_line = book.author_line();
        let authors = filters.applied_ids(AUTHOR_IDS);
        let subjects = filters.applied_ids(SUBJECT_IDS);

        matches_search(filters.search(), [book.title.as_str(), author_line.as_str()])
            && matches_search(filters.applied_text(TITLE), [book.title.as_str()])
            && in_range(
                book.publishing_year.map(i64::from),
                filters.applied_number(YEAR_MIN),
                filters.applied_number(YEAR_MAX),
            )
            && in_range(
                book.pages,
                filters.applied_number(PAGES_MIN),
                filters.applied_number(PAGES_MAX),
            )
            && (authors.is_empty() || authors.iter().any(|&id| book.has_author(AuthorId(id))))
            && (subjects.is_empty() || subjects.iter().any(|&id| book.has_subject(SubjectId(id))))
    }

    pub fn visible(&self) -> Vec<&Book> {
        project(
            self.list.items(),
            |book| self.matches(book),
            |a, b| compare_title(&a.title, &b.title),
        )
    }

    /// Distinct authors across the loaded books, by name.
    pub fn author_options(&self) -> Vec<FilterOption> {
        let mut seen = BTreeMap::new();
        for author in self.list.items().iter().flat_map(|book| &book.authors) {
            seen.entry(author.id).or_insert_with(|| author.full_name());
        }
        sorted_options(seen.into_iter().map(|(id, name)| (id.get(), name)))
    }

    /// Distinct subjects across the loaded books, by name.
    pub fn subject_options(&self) -> Vec<FilterOption> {
        let mut seen = BTreeMap::new();
        for subject in self.list.items().iter().flat_map(|book| &book.subjects) {
            seen.entry(subject.id).or_insert_with(|| subject.name.clone());
        }
        sorted_options(seen.into_iter().map(|(id, name)| (id.get(), name)))
    }
}

fn sorted_options(entries: impl Iterator<Item = (i64, String)>) -> Vec<FilterOption> {
    let mut options: Vec<FilterOption> = entries
        .map(|(id, label)| FilterOption::new(id.to_string(), label))
        .collect();
    options.sort_by(|a, b| compare_title(&a.label, &b.label));
    options
}
