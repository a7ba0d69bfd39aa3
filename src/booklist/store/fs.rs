use super::BookStore;
use crate::error::{BookError, Result};
use crate::model::{Book, BookDraft};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DATA_FILENAME: &str = "books.json";

/// On-disk shape of `books.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ShelfDocument {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    books: Vec<Book>,
}

impl ShelfDocument {
    fn allocate_id(&mut self) -> Result<u64> {
        let exhausted = || BookError::Store("id space exhausted".into());
        let highest = self.books.iter().map(|b| b.id).max().unwrap_or(0);
        let id = self
            .next_id
            .max(highest.checked_add(1).ok_or_else(exhausted)?)
            .max(1);
        self.next_id = id.checked_add(1).ok_or_else(exhausted)?;
        Ok(id)
    }
}

/// Local storage: the whole list lives in one JSON document.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(BookError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<ShelfDocument> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(ShelfDocument::default());
        }
        let content = fs::read_to_string(&data_file).map_err(BookError::Io)?;
        if content.trim().is_empty() {
            return Ok(ShelfDocument::default());
        }
        let doc: ShelfDocument =
            serde_json::from_str(&content).map_err(BookError::Serialization)?;
        Ok(doc)
    }

    fn save(&self, doc: &ShelfDocument) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(doc).map_err(BookError::Serialization)?;

        // Atomic write
        let tmp_file = self
            .root
            .join(format!(".books-{}.tmp", std::process::id()));
        fs::write(&tmp_file, content).map_err(BookError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.data_file()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(BookError::Io(e));
        }
        Ok(())
    }
}

impl BookStore for FileStore {
    fn list_books(&self) -> Result<Vec<Book>> {
        Ok(self.load()?.books)
    }

    fn create_book(&mut self, draft: &BookDraft) -> Result<Book> {
        let mut doc = self.load()?;
        let book = Book::from_draft(doc.allocate_id()?, draft.clone());
        doc.books.push(book.clone());
        self.save(&doc)?;
        log::debug!("stored book {} in {}", book.id, self.data_file().display());
        Ok(book)
    }

    fn update_book(&mut self, book: &Book) -> Result<()> {
        let mut doc = self.load()?;
        let slot = doc
            .books
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or(BookError::BookNotFound(book.id))?;
        *slot = book.clone();
        self.save(&doc)
    }

    fn delete_book(&mut self, id: u64) -> Result<()> {
        let mut doc = self.load()?;
        let before = doc.books.len();
        doc.books.retain(|b| b.id != id);
        if doc.books.len() == before {
            return Err(BookError::BookNotFound(id));
        }
        self.save(&doc)
    }

    fn describe(&self) -> String {
        format!("local:{}", self.data_file().display())
    }
}
