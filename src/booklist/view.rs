//! # Derived View
//!
//! What the user sees is never the shelf itself but a page derived from it:
//!
//! ```text
//! shelf ──filter (title contains term)──▶ sort (SortKey) ──▶ slice (page, per_page)
//! ```
//!
//! Every step is a pure function over a slice of books, so the whole pipeline
//! can be tested without a store. [`ViewState`] carries the user's choices
//! (search term, sort key, current page) between renders.

use crate::model::Book;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// By id, ascending.
    #[default]
    Default,
    /// By author, A to Z.
    Author,
    /// By title, A to Z.
    Title,
    /// By year of publication, newest first.
    Year,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Default,
            SortKey::Author,
            SortKey::Title,
            SortKey::Year,
        ]
    }

    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Default => a.id.cmp(&b.id),
            SortKey::Author => compare_text(&a.author, &b.author),
            SortKey::Title => compare_text(&a.title, &b.title),
            SortKey::Year => b.year.cmp(&a.year),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Default => "default",
            SortKey::Author => "author",
            SortKey::Title => "title",
            SortKey::Year => "year",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == "id" {
            return Ok(SortKey::Default);
        }
        SortKey::all()
            .iter()
            .copied()
            .find(|key| key.to_string() == name)
            .ok_or_else(|| {
                let names: Vec<String> = SortKey::all().iter().map(|k| k.to_string()).collect();
                format!(
                    "Unknown sort key '{}' (expected one of: {})",
                    name,
                    names.join(", ")
                )
            })
    }
}

// Case-insensitive first so "apple" and "Banana" sort the way a reader expects.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn filter_by_title<'a>(books: &'a [Book], term: &str) -> Vec<&'a Book> {
    let term = term.to_lowercase();
    books
        .iter()
        .filter(|b| term.is_empty() || b.title.to_lowercase().contains(&term))
        .collect()
}

/// Stable sort: books that compare equal keep their incoming order.
pub fn sort_books(books: &mut [&Book], key: SortKey) {
    books.sort_by(|a, b| key.compare(a, b));
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1))
}

/// Clamps a 1-based page number into the valid range for `len` items.
pub fn clamp_page(page: usize, len: usize, per_page: usize) -> usize {
    page.clamp(1, total_pages(len, per_page).max(1))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Book>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl Page {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn paginate(books: &[&Book], page: usize, per_page: usize) -> Page {
    let per_page = per_page.max(1);
    let page = clamp_page(page, books.len(), per_page);
    let start = (page - 1) * per_page;
    let items = books
        .iter()
        .skip(start)
        .take(per_page)
        .map(|b| (*b).clone())
        .collect();

    Page {
        items,
        page,
        per_page,
        total_pages: total_pages(books.len(), per_page),
        total_matches: books.len(),
    }
}

/// User-selected view parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub sort: SortKey,
    pub page: usize,
    pub per_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortKey::Default,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    pub fn with_per_page(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            ..Self::default()
        }
    }

    /// Runs the full pipeline over `books`.
    pub fn apply(&self, books: &[Book]) -> Page {
        let mut matched = filter_by_title(books, &self.search);
        sort_books(&mut matched, self.sort);
        paginate(&matched, self.page, self.per_page)
    }

    /// Number of books the current search matches.
    pub fn match_count(&self, books: &[Book]) -> usize {
        filter_by_title(books, &self.search).len()
    }

    /// A new search starts back on the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Advances one page. Returns false when already on the last page.
    pub fn next_page(&mut self, books: &[Book]) -> bool {
        let pages = total_pages(self.match_count(books), self.per_page);
        let current = clamp_page(self.page, self.match_count(books), self.per_page);
        if current < pages {
            self.page = current + 1;
            true
        } else {
            self.page = current;
            false
        }
    }

    /// Goes back one page. Returns false when already on the first page.
    pub fn prev_page(&mut self, books: &[Book]) -> bool {
        let current = clamp_page(self.page, self.match_count(books), self.per_page);
        if current > 1 {
            self.page = current - 1;
            true
        } else {
            self.page = current;
            false
        }
    }

    pub fn go_to(&mut self, page: usize, books: &[Book]) -> usize {
        self.page = clamp_page(page, self.match_count(books), self.per_page);
        self.page
    }
}
