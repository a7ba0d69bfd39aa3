use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::shelf::{Action, Shelf};
use crate::store::BookStore;

/// Deletes each id in turn. Stops at the first failure; earlier deletes stay done.
pub fn run<S: BookStore>(store: &mut S, shelf: &mut Shelf, ids: &[u64]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        store.delete_book(id).inspect_err(|e| {
            log::error!("Error deleting book {}: {}", id, e);
        })?;

        let message = match shelf.get(id).cloned() {
            Some(book) => {
                let message = format!("Book deleted: {}", describe(&book));
                result.affected_books.push(book);
                message
            }
            None => format!("Book deleted: #{}", id),
        };
        shelf.dispatch(Action::Delete(id));
        result.add_message(CmdMessage::success(message));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookError;
    use crate::model::{Book, BookDraft};
    use crate::store::memory::InMemoryStore;

    fn seeded() -> (InMemoryStore, Shelf) {
        let books: Vec<Book> = (1..=3)
            .map(|id| Book::from_draft(id, BookDraft::new(format!("B{}", id), "A", 2000)))
            .collect();
        (
            InMemoryStore::with_books(books.clone()),
            Shelf::with_books(books),
        )
    }

    #[test]
    fn removes_from_store_and_shelf() {
        let (mut store, mut shelf) = seeded();
        let result = run(&mut store, &mut shelf, &[2]).unwrap();
        assert_eq!(result.affected_books[0].id, 2);
        assert!(shelf.get(2).is_none());
        assert_eq!(store.list_books().unwrap().len(), 2);
    }

    #[test]
    fn unknown_id_is_an_error_and_shelf_is_kept() {
        let (mut store, mut shelf) = seeded();
        let err = run(&mut store, &mut shelf, &[7]).unwrap_err();
        assert!(matches!(err, BookError::BookNotFound(7)));
        assert_eq!(shelf.len(), 3);
    }

    #[test]
    fn stops_at_first_failure() {
        let (mut store, mut shelf) = seeded();
        assert!(run(&mut store, &mut shelf, &[1, 9, 3]).is_err());
        let ids: Vec<u64> = shelf.books().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
