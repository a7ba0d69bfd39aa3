//! # API Facade
//!
//! [`BookApi`] is a session: one store, one shelf, one view state. It lives as
//! long as the UI does (a single CLI invocation, or a whole `shell` session)
//! and is the single entry point for every operation.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns session state** (the [`Shelf`] and the [`ViewState`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O of its own and never formats output.
//!
//! ## Generic Over BookStore
//!
//! `BookApi<S: BookStore>` is generic over the storage backend:
//! - Production: `BookApi<Box<dyn BookStore>>` (chosen at runtime)
//! - Testing: `BookApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{Book, BookDraft, BookForm};
use crate::shelf::Shelf;
use crate::store::BookStore;
use crate::view::{Page, SortKey, ViewState};

pub use commands::update::BookPatch;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

pub struct BookApi<S: BookStore> {
    store: S,
    shelf: Shelf,
    view: ViewState,
}

impl<S: BookStore> BookApi<S> {
    pub fn new(store: S, per_page: usize) -> Self {
        Self {
            store,
            shelf: Shelf::new(),
            view: ViewState::with_per_page(per_page),
        }
    }

    /// Builds a session and loads the initial list.
    pub fn open(store: S, per_page: usize) -> Result<Self> {
        let mut api = Self::new(store, per_page);
        api.refresh()?;
        Ok(api)
    }

    pub fn refresh(&mut self) -> Result<CmdResult> {
        commands::refresh::run(&self.store, &mut self.shelf)
    }

    pub fn add_book(&mut self, form: BookForm) -> Result<CmdResult> {
        commands::add::run(&mut self.store, &mut self.shelf, form)
    }

    pub fn delete_book(&mut self, id: u64) -> Result<CmdResult> {
        self.delete_books(&[id])
    }

    /// Deletes in order and stops at the first failure.
    pub fn delete_books(&mut self, ids: &[u64]) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &mut self.shelf, ids)
    }

    pub fn edit_form(&self, id: u64) -> Result<BookForm> {
        commands::update::edit_form(&self.shelf, id)
    }

    pub fn update_book(&mut self, id: u64, form: BookForm) -> Result<CmdResult> {
        commands::update::run(&mut self.store, &mut self.shelf, id, form)
    }

    /// Prefills from the current record, overlays the patch, then updates.
    pub fn patch_book(&mut self, id: u64, patch: BookPatch) -> Result<CmdResult> {
        let form = patch.apply_to(self.edit_form(id)?);
        self.update_book(id, form)
    }

    pub fn get_book(&self, id: u64) -> Result<CmdResult> {
        commands::get::book(&self.shelf, id)
    }

    pub fn export_books(&self) -> Result<CmdResult> {
        commands::export::run(&self.shelf)
    }

    pub fn import_books(&mut self, drafts: Vec<BookDraft>) -> Result<CmdResult> {
        commands::import::run(&mut self.store, &mut self.shelf, drafts)
    }

    pub fn current_page(&self) -> CmdResult {
        commands::get::page(&self.shelf, &self.view)
    }

    pub fn page(&self) -> Page {
        self.view.apply(self.shelf.books())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.set_search(term);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.view.set_sort(sort);
    }

    pub fn next_page(&mut self) -> bool {
        self.view.next_page(self.shelf.books())
    }

    pub fn prev_page(&mut self) -> bool {
        self.view.prev_page(self.shelf.books())
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.view.go_to(page, self.shelf.books())
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn books(&self) -> &[Book] {
        self.shelf.books()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
