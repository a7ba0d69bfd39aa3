use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::{BookError, Result};
use crate::model::{Book, BookForm};
use crate::shelf::{Action, Shelf};
use crate::store::BookStore;

/// Partial edit: fields left as `None` keep the current value.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }

    /// Overlays the patch on a prefilled form.
    pub fn apply_to(self, mut form: BookForm) -> BookForm {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(author) = self.author {
            form.author = author;
        }
        if let Some(year) = self.year {
            form.year = year;
        }
        form
    }
}

/// The form an edit starts from: the record as the shelf currently has it.
pub fn edit_form(shelf: &Shelf, id: u64) -> Result<BookForm> {
    shelf
        .get(id)
        .map(BookForm::from_book)
        .ok_or(BookError::BookNotFound(id))
}

pub fn run<S: BookStore>(
    store: &mut S,
    shelf: &mut Shelf,
    id: u64,
    form: BookForm,
) -> Result<CmdResult> {
    if shelf.get(id).is_none() {
        return Err(BookError::BookNotFound(id));
    }
    let draft = form.into_draft()?;
    let book = Book::from_draft(id, draft);

    store.update_book(&book).inspect_err(|e| {
        log::error!("Error updating book {}: {}", id, e);
    })?;
    shelf.dispatch(Action::Update(book.clone()));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book updated: {}",
        describe(&book)
    )));
    Ok(result.with_affected_books(vec![book]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookDraft;
    use crate::store::memory::InMemoryStore;

    fn seeded() -> (InMemoryStore, Shelf) {
        let books = vec![
            Book::from_draft(1, BookDraft::new("Emma", "Austen", 1815)),
            Book::from_draft(2, BookDraft::new("Dune", "Herbert", 1965)),
        ];
        (
            InMemoryStore::with_books(books.clone()),
            Shelf::with_books(books),
        )
    }

    #[test]
    fn edit_form_is_prefilled() {
        let (_, shelf) = seeded();
        let form = edit_form(&shelf, 2).unwrap();
        assert_eq!(form, BookForm::new("Dune", "Herbert", "1965"));
    }

    #[test]
    fn patch_keeps_untouched_fields() {
        let (mut store, mut shelf) = seeded();
        let patch = BookPatch {
            year: Some("1966".into()),
            ..Default::default()
        };
        let form = patch.apply_to(edit_form(&shelf, 2).unwrap());
        run(&mut store, &mut shelf, 2, form).unwrap();

        let updated = shelf.get(2).unwrap();
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.year, 1966);
        assert_eq!(store.list_books().unwrap()[1].year, 1966);
    }

    #[test]
    fn unknown_id_is_rejected_before_store_call() {
        let (mut store, mut shelf) = seeded();
        store.set_simulate_write_error(true);
        let err = run(&mut store, &mut shelf, 5, BookForm::new("T", "A", "1")).unwrap_err();
        assert!(matches!(err, BookError::BookNotFound(5)));
    }

    #[test]
    fn store_failure_keeps_old_record() {
        let (mut store, mut shelf) = seeded();
        store.set_simulate_write_error(true);
        let form = BookForm::new("Emma!", "Austen", "1815");
        assert!(run(&mut store, &mut shelf, 1, form).is_err());
        assert_eq!(shelf.get(1).unwrap().title, "Emma");
    }
}
