use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::shelf::{Action, Shelf};
use crate::store::BookStore;

/// Replaces the shelf with whatever the store currently holds.
pub fn run<S: BookStore>(store: &S, shelf: &mut Shelf) -> Result<CmdResult> {
    let books = store.list_books().inspect_err(|e| {
        log::error!("Error fetching books from {}: {}", store.describe(), e);
    })?;

    log::debug!("fetched {} books from {}", books.len(), store.describe());
    shelf.dispatch(Action::SetAll(books));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Loaded {} books", shelf.len())));
    Ok(result)
}
