//! # Command Layer
//!
//! One module per operation. Every command follows the same shape:
//!
//! 1. Call the store.
//! 2. If the store accepted the change, dispatch the matching
//!    [`Action`](crate::shelf::Action) to the shelf.
//! 3. If it did not, log the failure and return the error. The shelf is left
//!    exactly as it was; nothing is rolled back because nothing was applied.
//!
//! Commands never print. They return a [`CmdResult`] that the caller renders.

use crate::model::Book;
use crate::view::Page;

pub mod add;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod refresh;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub page: Option<Page>,
    pub export: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_export(mut self, export: String) -> Self {
        self.export = Some(export);
        self
    }
}

/// Formats a book for one-line messages: `#3 "Emma" by Jane Austen (1815)`.
pub(crate) fn describe(book: &Book) -> String {
    format!(
        "#{} \"{}\" by {} ({})",
        book.id, book.title, book.author, book.year
    )
}
