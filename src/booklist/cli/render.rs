use booklist::api::{CmdMessage, MessageLevel};
use booklist::model::Book;
use booklist::view::{Page, SortKey, ViewState};
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 38;
const AUTHOR_WIDTH: usize = 26;
const YEAR_WIDTH: usize = 6;
const GAP: &str = "  ";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let line = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", line)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

/// Renders a page as a table plus a one-line pager footer.
pub fn render_page(page: &Page, view: Option<&ViewState>) -> String {
    let mut out = String::new();

    if page.is_empty() {
        out.push_str(&format!("{}\n", "No books found.".dimmed()));
        if let Some(footer) = view.and_then(view_hint) {
            out.push_str(&format!("{}\n", footer.dimmed()));
        }
        return out;
    }

    let id_width = page
        .items
        .iter()
        .map(|b| b.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let header = format!(
        "{:>id_w$}{GAP}{}{GAP}{}{GAP}{:>year_w$}",
        "ID",
        pad_to_width("Title", TITLE_WIDTH),
        pad_to_width("Author", AUTHOR_WIDTH),
        "Year",
        id_w = id_width,
        year_w = YEAR_WIDTH,
    );
    out.push_str(&format!("{}\n", header.bold()));

    for book in &page.items {
        out.push_str(&render_row(book, id_width));
        out.push('\n');
    }

    out.push_str(&format!("{}\n", render_footer(page, view).dimmed()));
    out
}

fn render_row(book: &Book, id_width: usize) -> String {
    format!(
        "{}{GAP}{}{GAP}{}{GAP}{:>year_w$}",
        format!("{:>id_w$}", book.id, id_w = id_width).yellow(),
        pad_to_width(&truncate_to_width(&book.title, TITLE_WIDTH), TITLE_WIDTH),
        pad_to_width(&truncate_to_width(&book.author, AUTHOR_WIDTH), AUTHOR_WIDTH),
        book.year,
        year_w = YEAR_WIDTH,
    )
}

pub fn render_footer(page: &Page, view: Option<&ViewState>) -> String {
    let noun = if page.total_matches == 1 {
        "book"
    } else {
        "books"
    };
    let mut footer = format!(
        "Page {} of {} · {} {}",
        page.page,
        page.total_pages.max(1),
        page.total_matches,
        noun
    );
    if let Some(hint) = view.and_then(view_hint) {
        footer.push_str(&format!(" · {}", hint));
    }
    footer
}

fn view_hint(view: &ViewState) -> Option<String> {
    let mut parts = Vec::new();
    if !view.search.is_empty() {
        parts.push(format!("search \"{}\"", view.search));
    }
    if view.sort != SortKey::Default {
        parts.push(format!("sorted by {}", view.sort));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Full detail for a single book.
pub fn render_book(book: &Book) -> String {
    format!(
        "{} {}\n{}\n  Author: {}\n  Year:   {}\n",
        format!("#{}", book.id).yellow(),
        book.title.bold(),
        "--------------------------------".dimmed(),
        book.author,
        book.year
    )
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
