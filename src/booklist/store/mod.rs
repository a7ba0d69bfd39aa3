//! # Storage Layer
//!
//! Books live somewhere else: either behind a remote HTTP API or in a local
//! JSON document. The [`BookStore`] trait is the only thing the rest of the
//! library knows about that "somewhere else".
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: Remote REST API (`/books`, `/books/{id}`).
//!   The server assigns ids.
//!   Failures surface as [`crate::error::BookError::Http`] or `Status`.
//!
//! - [`fs::FileStore`]: Local key-value style storage.
//!   - Whole list stored in one `books.json` document
//!   - Ids assigned from a persisted counter, never reused
//!   - Atomic writes (tmp file + rename)
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Contract
//!
//! Stores do not keep the list sorted or deduplicated for the caller; that is
//! the job of [`crate::shelf::Shelf`]. They must, however, reject updates and
//! deletes of ids they do not know with [`crate::error::BookError::BookNotFound`].

use crate::error::Result;
use crate::model::{Book, BookDraft};

pub mod fs;
pub mod http;
pub mod memory;

/// Abstract interface for book persistence.
pub trait BookStore {
    /// Fetch every book the store knows about, in no particular order.
    fn list_books(&self) -> Result<Vec<Book>>;

    /// Persist a new book and return it with its assigned id.
    fn create_book(&mut self, draft: &BookDraft) -> Result<Book>;

    /// Replace the stored book that has `book.id`.
    fn update_book(&mut self, book: &Book) -> Result<()>;

    /// Remove the book with this id.
    fn delete_book(&mut self, id: u64) -> Result<()>;

    /// Short human-readable description of where books are kept.
    fn describe(&self) -> String;
}

impl<S: BookStore + ?Sized> BookStore for Box<S> {
    fn list_books(&self) -> Result<Vec<Book>> {
        (**self).list_books()
    }

    fn create_book(&mut self, draft: &BookDraft) -> Result<Book> {
        (**self).create_book(draft)
    }

    fn update_book(&mut self, book: &Book) -> Result<()> {
        (**self).update_book(book)
    }

    fn delete_book(&mut self, id: u64) -> Result<()> {
        (**self).delete_book(id)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
