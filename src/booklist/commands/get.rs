use crate::commands::CmdResult;
use crate::error::{BookError, Result};
use crate::shelf::Shelf;
use crate::view::{Page, ViewState};

/// The current page as the user has configured it.
pub fn page(shelf: &Shelf, view: &ViewState) -> CmdResult {
    CmdResult::default().with_page(view.apply(shelf.books()))
}

/// A single book by id, wrapped as a one-item page for uniform rendering.
pub fn book(shelf: &Shelf, id: u64) -> Result<CmdResult> {
    let book = shelf.get(id).cloned().ok_or(BookError::BookNotFound(id))?;
    let page = Page {
        items: vec![book.clone()],
        page: 1,
        per_page: 1,
        total_pages: 1,
        total_matches: 1,
    };
    Ok(CmdResult::default()
        .with_affected_books(vec![book])
        .with_page(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, BookDraft};
    use crate::view::SortKey;

    fn shelf() -> Shelf {
        Shelf::with_books(
            (1..=12)
                .map(|id| {
                    Book::from_draft(id, BookDraft::new(format!("Book {}", id), "A", 1990 + id as i32))
                })
                .collect(),
        )
    }

    #[test]
    fn page_uses_view_state() {
        let shelf = shelf();
        let mut view = ViewState::default();
        view.set_sort(SortKey::Year);
        view.go_to(3, shelf.books());

        let result = page(&shelf, &view);
        let page = result.page.unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        let ids: Vec<u64> = page.items.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn book_by_id() {
        let shelf = shelf();
        let result = book(&shelf, 4).unwrap();
        assert_eq!(result.affected_books[0].title, "Book 4");
        assert!(matches!(book(&shelf, 40), Err(BookError::BookNotFound(40))));
    }
}
