use crate::commands::{export::ExportDocument, refresh, CmdMessage, CmdResult};
use crate::error::{BookError, Result};
use crate::model::BookDraft;
use crate::shelf::Shelf;
use crate::store::BookStore;
use serde::Deserialize;

/// Accepts either an `export` envelope or a bare JSON array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Envelope(ExportDocument),
    Drafts(Vec<BookDraft>),
}

/// Parses import input into drafts. Ids in the input are ignored: the store
/// assigns fresh ones.
pub fn parse(input: &str) -> Result<Vec<BookDraft>> {
    let payload: ImportPayload = serde_json::from_str(input).map_err(BookError::Serialization)?;
    Ok(match payload {
        ImportPayload::Envelope(doc) => doc
            .books
            .into_iter()
            .map(|b| BookDraft::new(b.title, b.author, b.year))
            .collect(),
        ImportPayload::Drafts(drafts) => drafts,
    })
}

/// Creates every draft through the store, then reloads the shelf.
///
/// A failure part-way leaves the earlier books created; the reload still runs
/// so the shelf reflects what the store actually holds.
pub fn run<S: BookStore>(
    store: &mut S,
    shelf: &mut Shelf,
    drafts: Vec<BookDraft>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut failure = None;

    for draft in &drafts {
        match store.create_book(draft) {
            Ok(book) => result.affected_books.push(book),
            Err(e) => {
                log::error!("Error importing book \"{}\": {}", draft.title, e);
                failure = Some(e);
                break;
            }
        }
    }

    let reloaded = refresh::run(&*store, shelf);

    if let Some(e) = failure {
        return Err(e);
    }
    reloaded?;

    result.add_message(CmdMessage::success(format!(
        "Imported {} books",
        result.affected_books.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::export;
    use crate::model::Book;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn parses_bare_array() {
        let drafts = parse(r#"[{"title":"A","author":"X","year":1}]"#).unwrap();
        assert_eq!(drafts, vec![BookDraft::new("A", "X", 1)]);
    }

    #[test]
    fn parses_export_envelope() {
        let shelf = Shelf::with_books(vec![Book::from_draft(9, BookDraft::new("A", "X", 1))]);
        let json = export::run(&shelf).unwrap().export.unwrap();
        let drafts = parse(&json).unwrap();
        assert_eq!(drafts, vec![BookDraft::new("A", "X", 1)]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse("{}"), Err(BookError::Serialization(_))));
    }

    #[test]
    fn creates_books_with_fresh_ids() {
        let mut store =
            InMemoryStore::with_books(vec![Book::from_draft(1, BookDraft::new("Old", "O", 1))]);
        let mut shelf = Shelf::new();
        let drafts = vec![BookDraft::new("A", "X", 1), BookDraft::new("B", "Y", 2)];
        let result = run(&mut store, &mut shelf, drafts).unwrap();

        let new_ids: Vec<u64> = result.affected_books.iter().map(|b| b.id).collect();
        assert_eq!(new_ids, vec![2, 3]);
        assert_eq!(shelf.len(), 3);
    }

    #[test]
    fn create_failure_wins_over_reload_failure() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        store.set_simulate_read_error(true);
        let mut shelf = Shelf::new();
        let err = run(&mut store, &mut shelf, vec![BookDraft::new("A", "X", 1)]).unwrap_err();
        assert!(matches!(err, BookError::Store(msg) if msg == "Simulated write error"));
    }
}
