//! Catalog records: books, their authors and subjects, and series.

use serde::{Deserialize, Serialize};

use crate::ids::{AuthorId, Isbn, SeriesId, SubjectId};

const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Author {
    /// "First Last", trimmed so a missing half does not leave a stray space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Genre tag attached to a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    #[serde(default)]
    pub publishing_year: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pages: Option<i64>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Book {
    /// Author names joined with ", ", or "Unknown Author" when there are none.
    pub fn author_line(&self) -> String {
        author_line(&self.authors)
    }

    pub fn has_author(&self, id: AuthorId) -> bool {
        self.authors.iter().any(|author| author.id == id)
    }

    pub fn has_subject(&self, id: SubjectId) -> bool {
        self.subjects.iter().any(|subject| subject.id == id)
    }
}

pub(crate) fn author_line(authors: &[Author]) -> String {
    if authors.is_empty() {
        return UNKNOWN_AUTHOR.to_string();
    }
    authors
        .iter()
        .map(Author::full_name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
}
