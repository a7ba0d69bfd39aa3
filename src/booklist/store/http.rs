use super::BookStore;
use crate::error::{BookError, Result};
use crate::model::{Book, BookDraft};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://booksapi-0z3z.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("booklist/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client
pub fn create_client(timeout_secs: u64) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Remote storage: a REST API serving `/books`.
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self::with_client(create_client(timeout_secs)?, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/books", self.base_url)
    }

    fn book_url(&self, id: u64) -> String {
        format!("{}/books/{}", self.base_url, id)
    }
}

/// Turns a non-success response into an error, keeping the body for diagnostics.
fn check(response: Response, id: Option<u64>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(BookError::BookNotFound(id));
    }
    let body = response.text().unwrap_or_default();
    Err(BookError::Status {
        status: status.as_u16(),
        body,
    })
}

impl BookStore for HttpStore {
    fn list_books(&self) -> Result<Vec<Book>> {
        let url = self.collection_url();
        log::debug!("GET {}", url);
        let response = check(self.client.get(&url).send()?, None)?;
        Ok(response.json()?)
    }

    fn create_book(&mut self, draft: &BookDraft) -> Result<Book> {
        let url = self.collection_url();
        log::debug!("POST {}", url);
        let response = check(self.client.post(&url).json(draft).send()?, None)?;
        Ok(response.json()?)
    }

    fn update_book(&mut self, book: &Book) -> Result<()> {
        let url = self.book_url(book.id);
        log::debug!("PUT {}", url);
        check(self.client.put(&url).json(book).send()?, Some(book.id))?;
        Ok(())
    }

    fn delete_book(&mut self, id: u64) -> Result<()> {
        let url = self.book_url(id);
        log::debug!("DELETE {}", url);
        check(self.client.delete(&url).send()?, Some(id))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
