use super::BookStore;
use crate::error::{BookError, Result};
use crate::model::{Book, BookDraft};
use std::cell::Cell;
use std::collections::BTreeMap;

/// In-memory storage for testing.
///
/// `Cell` is enough for the failure switch since the crate is single-threaded,
/// and it lets tests flip it through a shared reference.
#[derive(Default)]
pub struct InMemoryStore {
    books: BTreeMap<u64, Book>,
    next_id: u64,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Seeds the store as if these books had been created earlier.
    pub fn with_books(books: Vec<Book>) -> Self {
        let mut store = Self::new();
        for book in books {
            store.next_id = store.next_id.max(book.id + 1);
            store.books.insert(book.id, book);
        }
        store
    }

    /// Make every mutating call fail with a store error.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make `list_books` fail with a store error.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(BookError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl BookStore for InMemoryStore {
    fn list_books(&self) -> Result<Vec<Book>> {
        if self.simulate_read_error.get() {
            return Err(BookError::Store("Simulated read error".to_string()));
        }
        Ok(self.books.values().cloned().collect())
    }

    fn create_book(&mut self, draft: &BookDraft) -> Result<Book> {
        self.check_writable()?;
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let book = Book::from_draft(id, draft.clone());
        self.books.insert(id, book.clone());
        Ok(book)
    }

    fn update_book(&mut self, book: &Book) -> Result<()> {
        self.check_writable()?;
        match self.books.get_mut(&book.id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(())
            }
            None => Err(BookError::BookNotFound(book.id)),
        }
    }

    fn delete_book(&mut self, id: u64) -> Result<()> {
        self.check_writable()?;
        self.books
            .remove(&id)
            .map(|_| ())
            .ok_or(BookError::BookNotFound(id))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
