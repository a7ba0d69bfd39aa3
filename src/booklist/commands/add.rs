use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookForm;
use crate::shelf::{Action, Shelf};
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &mut S, shelf: &mut Shelf, form: BookForm) -> Result<CmdResult> {
    let draft = form.into_draft()?;

    let book = store.create_book(&draft).inspect_err(|e| {
        log::error!("Error adding book \"{}\": {}", draft.title, e);
    })?;
    shelf.dispatch(Action::Add(book.clone()));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Book added: {}", describe(&book))));
    Ok(result.with_affected_books(vec![book]))
}
