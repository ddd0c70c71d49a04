//! Payloads an administrator sends when closing a report.

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::error::Result;
use crate::ids::{AuthorId, Isbn, SubjectId};

/// How a report is closed: no follow-up, a warning to the author, or a
/// correction to the reported book.
///
/// Serialized as the `data` part of the resolve request, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ReportResolution {
    #[serde(rename = "")]
    MarkResolved,
    #[serde(rename = "WARN_AUTHOR")]
    WarnAuthor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        isbn: Option<Isbn>,
    },
    #[serde(rename = "EDIT_BOOK")]
    EditBook(BookEdit),
}

/// The edit form's working copy of a book.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookDraft {
    pub isbn: String,
    pub title: String,
    pub publishing_year: Option<i32>,
    pub pages: Option<i64>,
    pub description: String,
    pub authors: Vec<AuthorId>,
    pub genres: Vec<SubjectId>,
}

impl BookDraft {
    pub fn from_book(book: &Book) -> Self {
        Self {
            isbn: book.isbn.to_string(),
            title: book.title.clone(),
            publishing_year: book.publishing_year,
            pages: book.pages,
            description: book.description.clone().unwrap_or_default(),
            authors: book.authors.iter().map(|author| author.id).collect(),
            genres: book.subjects.iter().map(|subject| subject.id).collect(),
        }
    }
}

/// Changed fields of a book correction. `None` means unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookEdit {
    pub isbn: Isbn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishing_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(
        rename = "bookTitle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<AuthorId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<SubjectId>>,
}

impl BookEdit {
    /// Compares the draft against the reported book and keeps only what changed.
    ///
    /// Author and subject ids are compared as sets.
    pub fn diff(original: &Book, draft: &BookDraft) -> Result<Self> {
        let original_authors: Vec<AuthorId> = original.authors.iter().map(|a| a.id).collect();
        let original_subjects: Vec<SubjectId> = original.subjects.iter().map(|s| s.id).collect();
        let original_description = original.description.as_deref().unwrap_or_default();

        Ok(Self {
            isbn: Isbn::new(draft.isbn.as_str())?,
            publishing_year: draft
                .publishing_year
                .filter(|_| draft.publishing_year != original.publishing_year),
            pages: draft.pages.filter(|_| draft.pages != original.pages),
            title: (draft.title != original.title).then(|| draft.title.clone()),
            description: (draft.description != original_description)
                .then(|| draft.description.clone()),
            authors: (!same_set(&original_authors, &draft.authors))
                .then(|| draft.authors.clone()),
            subjects: (!same_set(&original_subjects, &draft.genres))
                .then(|| draft.genres.clone()),
        })
    }

    pub fn has_changes(&self) -> bool {
        self.publishing_year.is_some()
            || self.pages.is_some()
            || self.title.is_some()
            || self.description.is_some()
            || self.authors.is_some()
            || self.subjects.is_some()
    }
}

fn same_set<T: Ord + Copy>(left: &[T], right: &[T]) -> bool {
    let mut left = left.to_vec();
    let mut right = right.to_vec();
    left.sort_unstable();
    left.dedup();
    right.sort_unstable();
    right.dedup();
    left == right
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{Author, Subject};

    fn dune() -> Book {
        Book {
            isbn: Isbn::new("9780441013593").unwrap(),
            title: "Dune".into(),
            publishing_year: Some(1965),
            description: Some("Desert planet politics.".into()),
            pages: Some(412),
            authors: vec![
                Author {
                    id: AuthorId(1),
                    first_name: "Frank".into(),
                    last_name: "Herbert".into(),
                    image_url: None,
                },
                Author {
                    id: AuthorId(2),
                    first_name: "Brian".into(),
                    last_name: "Herbert".into(),
                    image_url: None,
                },
            ],
            subjects: vec![Subject {
                id: SubjectId(9),
                name: "Science Fiction".into(),
            }],
            image_url: None,
        }
    }

    #[test]
    fn unchanged_draft_has_no_changes() {
        let book = dune();
        let mut draft = BookDraft::from_book(&book);
        draft.authors.reverse();
        let edit = BookEdit::diff(&book, &draft).unwrap();
        assert!(!edit.has_changes());
        assert_eq!(
            serde_json::to_value(ReportResolution::EditBook(edit)).unwrap(),
            serde_json::json!({"action": "EDIT_BOOK", "isbn": "9780441013593"})
        );
    }

    #[test]
    fn diff_keeps_only_changed_fields() {
        let book = dune();
        let mut draft = BookDraft::from_book(&book);
        draft.title = "Dune Messiah".into();
        draft.pages = Some(256);
        let edit = BookEdit::diff(&book, &draft).unwrap();
        assert_eq!(edit.title.as_deref(), Some("Dune Messiah"));
        assert_eq!(edit.pages, Some(256));
        assert_eq!(edit.publishing_year, None);
        assert_eq!(edit.authors, None);

        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["bookTitle"], "Dune Messiah");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn resolution_tags() {
        let resolved = serde_json::to_value(ReportResolution::MarkResolved).unwrap();
        assert_eq!(resolved, serde_json::json!({"action": ""}));

        let warn = ReportResolution::WarnAuthor {
            isbn: Some(Isbn::new("9780441013593").unwrap()),
        };
        assert_eq!(
            serde_json::to_value(warn).unwrap(),
            serde_json::json!({"action": "WARN_AUTHOR", "isbn": "9780441013593"})
        );
    }
}
