//! # Shelf: the in-memory book list
//!
//! The shelf is the single source of truth for what the session currently
//! knows about. It only ever changes through [`Action`]s, which are dispatched
//! by the command layer *after* the store has accepted the corresponding
//! change.
//!
//! ## Invariants
//!
//! After every action:
//! - ids are unique
//! - books are ordered by id, ascending
//!
//! Display ordering by other fields is a view concern and lives in
//! [`crate::view`].

use crate::model::Book;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Insert a book. A book with the same id is replaced.
    Add(Book),
    /// Remove the book with this id. Unknown ids are ignored.
    Delete(u64),
    /// Replace the book with the same id. Unknown ids are ignored.
    Update(Book),
    /// Replace the whole list. Later duplicates win.
    SetAll(Vec<Book>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shelf {
    books: Vec<Book>,
}

impl Shelf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        let mut shelf = Self::new();
        shelf.dispatch(Action::SetAll(books));
        shelf
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Add(book) => match self.position(book.id) {
                Ok(i) => self.books[i] = book,
                Err(i) => self.books.insert(i, book),
            },
            Action::Delete(id) => {
                if let Ok(i) = self.position(id) {
                    self.books.remove(i);
                }
            }
            Action::Update(book) => {
                if let Ok(i) = self.position(book.id) {
                    self.books[i] = book;
                }
            }
            Action::SetAll(books) => {
                let unique: BTreeMap<u64, Book> = books.into_iter().map(|b| (b.id, b)).collect();
                self.books = unique.into_values().collect();
            }
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: u64) -> Option<&Book> {
        self.position(id).ok().map(|i| &self.books[i])
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, id: u64) -> std::result::Result<usize, usize> {
        self.books.binary_search_by_key(&id, |b| b.id)
    }
}
