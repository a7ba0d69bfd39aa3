//! `HttpStore` against a scripted local server.

use booklist::api::BookApi;
use booklist::error::BookError;
use booklist::model::{Book, BookDraft, BookForm};
use booklist::store::http::HttpStore;
use booklist::store::BookStore;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

#[derive(Debug)]
struct Recorded {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serves one canned `(status, body)` per incoming request, in order, and
/// reports what it received.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Recorded>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let path = parts.next().unwrap_or_default().to_string();

            let mut content_length = 0;
            let mut headers = Vec::new();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            tx.send(Recorded {
                method,
                path,
                headers,
                body: String::from_utf8(request_body).unwrap(),
            })
            .unwrap();

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
        }
    });

    (format!("http://{}", addr), rx)
}

#[test]
fn lists_books() {
    let (url, rx) = serve(vec![(
        200,
        r#"[{"id":2,"title":"Dune","author":"Herbert","year":1965},{"id":1,"title":"Emma","author":"Austen","year":1815}]"#,
    )]);
    let store = HttpStore::new(&url, 5).unwrap();

    let books = store.list_books().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Dune");

    let req = rx.recv().unwrap();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/books");
}

#[test]
fn create_posts_draft_and_returns_server_book() {
    let (url, rx) = serve(vec![(
        201,
        r#"{"id":17,"title":"Dune","author":"Herbert","year":1965}"#,
    )]);
    let mut store = HttpStore::new(&url, 5).unwrap();

    let book = store
        .create_book(&BookDraft::new("Dune", "Herbert", 1965))
        .unwrap();
    assert_eq!(book.id, 17);

    let req = rx.recv().unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/books");
    let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"title": "Dune", "author": "Herbert", "year": 1965})
    );
}

#[test]
fn update_puts_full_book() {
    let (url, rx) = serve(vec![(200, "{}")]);
    let mut store = HttpStore::new(&url, 5).unwrap();

    let book = Book::from_draft(4, BookDraft::new("Emma", "Austen", 1816));
    store.update_book(&book).unwrap();

    let req = rx.recv().unwrap();
    assert_eq!(req.method, "PUT");
    assert_eq!(req.path, "/books/4");
    let sent: Book = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent, book);
}

#[test]
fn delete_of_missing_book_is_not_found() {
    let (url, rx) = serve(vec![(404, r#"{"error":"missing"}"#)]);
    let mut store = HttpStore::new(&url, 5).unwrap();

    assert!(matches!(
        store.delete_book(8),
        Err(BookError::BookNotFound(8))
    ));
    let req = rx.recv().unwrap();
    assert_eq!(req.method, "DELETE");
    assert_eq!(req.path, "/books/8");
}

#[test]
fn update_of_missing_book_is_not_found() {
    let (url, rx) = serve(vec![(404, r#"{"error":"missing"}"#)]);
    let mut store = HttpStore::new(&url, 5).unwrap();

    let ghost = Book::from_draft(8, BookDraft::new("Emma", "Austen", 1815));
    assert!(matches!(
        store.update_book(&ghost),
        Err(BookError::BookNotFound(8))
    ));
    let req = rx.recv().unwrap();
    assert_eq!(req.method, "PUT");
    assert_eq!(req.path, "/books/8");
}

#[test]
fn failed_writes_report_status() {
    let (url, _rx) = serve(vec![(409, "conflict"), (503, "unavailable")]);
    let mut store = HttpStore::new(&url, 5).unwrap();

    let book = Book::from_draft(3, BookDraft::new("Emma", "Austen", 1815));
    assert!(matches!(
        store.update_book(&book),
        Err(BookError::Status { status: 409, ref body }) if body == "conflict"
    ));
    assert!(matches!(
        store.delete_book(3),
        Err(BookError::Status { status: 503, ref body }) if body == "unavailable"
    ));
}

#[test]
fn sends_user_agent() {
    let (url, rx) = serve(vec![(200, "[]")]);
    let store = HttpStore::new(&url, 5).unwrap();
    store.list_books().unwrap();

    let req = rx.recv().unwrap();
    let agent = req.header("user-agent").unwrap_or_default();
    assert_eq!(agent, concat!("booklist/", env!("CARGO_PKG_VERSION")));
}

#[test]
fn server_error_keeps_body() {
    let (url, _rx) = serve(vec![(500, "boom")]);
    let store = HttpStore::new(&url, 5).unwrap();

    match store.list_books() {
        Err(BookError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn session_applies_server_result_locally() {
    let (url, _rx) = serve(vec![
        (200, "[]"),
        (201, r#"{"id":5,"title":"Dune","author":"Herbert","year":1965}"#),
        (500, "down"),
    ]);
    let store = HttpStore::new(&url, 5).unwrap();
    let mut api = BookApi::open(store, 5).unwrap();

    api.add_book(BookForm::new("Dune", "Herbert", "1965"))
        .unwrap();
    assert_eq!(api.books()[0].id, 5);

    // Failed delete leaves the local list alone.
    assert!(api.delete_books(&[5]).is_err());
    assert_eq!(api.books().len(), 1);
}
