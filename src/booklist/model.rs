use crate::error::{BookError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl Book {
    pub fn from_draft(id: u64, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
        }
    }
}

/// A book that has not been assigned an id yet. This is the create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

/// Raw form input, as typed by the user.
///
/// Every field is required. The year is the only field that gets coerced,
/// everything else is taken verbatim (trimmed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl BookForm {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
        }
    }

    /// Prefills a form from an existing record.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.to_string(),
        }
    }

    pub fn into_draft(self) -> Result<BookDraft> {
        let title = required("title", &self.title)?;
        let author = required("author", &self.author)?;
        let year_raw = required("year", &self.year)?;
        let year = year_raw.parse::<i32>().map_err(|_| {
            BookError::InvalidInput(format!("year must be a whole number, got \"{}\"", year_raw))
        })?;

        Ok(BookDraft {
            title,
            author,
            year,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}
