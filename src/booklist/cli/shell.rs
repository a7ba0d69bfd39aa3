//! Interactive session.
//!
//! One [`BookApi`] lives for the whole session, so the list is fetched once
//! and then kept current by applying each successful change locally. The
//! page is redrawn after every command that can change what it shows.

use super::render::{render_book, render_messages, render_page};
use booklist::api::{BookApi, BookPatch, CmdMessage};
use booklist::error::{BookError, Result};
use booklist::model::BookForm;
use booklist::store::BookStore;
use booklist::view::SortKey;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_help_subcommand = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Show the current page
    #[command(alias = "ls")]
    List,
    /// Add a book: add <title> <author> <year>
    #[command(alias = "a")]
    Add {
        title: String,
        author: String,
        #[arg(allow_hyphen_values = true)]
        year: String,
    },
    /// Show the form for a book, prefilled
    #[command(alias = "e")]
    Edit { id: u64 },
    /// Change fields of a book
    Update {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        year: Option<String>,
    },
    /// Delete books by id
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },
    /// Filter by title; no term clears the search
    #[command(alias = "s")]
    Search { term: Vec<String> },
    /// Sort by default, author, title or year
    Sort { key: String },
    /// Next page
    #[command(alias = "n")]
    Next,
    /// Previous page
    #[command(alias = "p")]
    Prev,
    /// Jump to a page
    Page { number: usize },
    /// Reload from the store
    Refresh,
    /// Show one book
    Show { id: u64 },
    /// List commands
    Help,
    /// Leave the shell
    #[command(alias = "exit", alias = "q")]
    Quit,
}

enum Outcome {
    Continue,
    Quit,
}

const HELP: &str = "\
Commands:
  list                          show the current page
  add <title> <author> <year>   add a book
  edit <id>                     show a book's current values
  update <id> [--title T] [--author A] [--year Y]
  delete <id>...                delete books
  search [term]                 filter by title (no term clears)
  sort <default|author|title|year>
  next | prev | page <n>        move between pages
  refresh                       reload from the store
  show <id>                     show one book
  quit                          leave
";

pub fn run<S: BookStore>(api: BookApi<S>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(api, stdin.lock(), stdout.lock())
}

pub fn run_with<S: BookStore, R: BufRead, W: Write>(
    mut api: BookApi<S>,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "Connected to {}. Type 'help' for commands.", api.store().describe())?;
    write!(out, "{}", render_page(&api.page(), Some(api.view())))?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;
        let words = match split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                write!(out, "{}", render_messages(&[CmdMessage::error(e)]))?;
                prompt(&mut out)?;
                continue;
            }
        };
        if words.is_empty() {
            prompt(&mut out)?;
            continue;
        }

        match ShellLine::try_parse_from(&words) {
            Ok(parsed) => match execute(&mut api, parsed.command, &mut out) {
                Ok(Outcome::Quit) => return Ok(()),
                Ok(Outcome::Continue) => {}
                Err(BookError::Io(e)) => return Err(BookError::Io(e)),
                Err(e) => {
                    write!(out, "{}", render_messages(&[CmdMessage::error(e.to_string())]))?;
                }
            },
            Err(e) => {
                let first = e.to_string();
                let first = first.lines().next().unwrap_or_default();
                write!(out, "{}", render_messages(&[CmdMessage::error(first)]))?;
            }
        }
        prompt(&mut out)?;
    }

    writeln!(out)?;
    Ok(())
}

fn execute<S: BookStore, W: Write>(
    api: &mut BookApi<S>,
    command: ShellCommand,
    out: &mut W,
) -> Result<Outcome> {
    match command {
        ShellCommand::Quit => return Ok(Outcome::Quit),
        ShellCommand::Help => {
            write!(out, "{}", HELP)?;
            return Ok(Outcome::Continue);
        }
        ShellCommand::List => {}
        ShellCommand::Add {
            title,
            author,
            year,
        } => {
            let result = api.add_book(BookForm::new(title, author, year))?;
            write!(out, "{}", render_messages(&result.messages))?;
        }
        ShellCommand::Edit { id } => {
            let form = api.edit_form(id)?;
            writeln!(
                out,
                "Editing #{}: title=\"{}\" author=\"{}\" year={}",
                id, form.title, form.author, form.year
            )?;
            writeln!(out, "Use: update {} --title ... --author ... --year ...", id)?;
            return Ok(Outcome::Continue);
        }
        ShellCommand::Update {
            id,
            title,
            author,
            year,
        } => {
            let patch = BookPatch {
                title,
                author,
                year,
            };
            if patch.is_empty() {
                return Err(BookError::InvalidInput(
                    "nothing to update (use --title, --author or --year)".into(),
                ));
            }
            let result = api.patch_book(id, patch)?;
            write!(out, "{}", render_messages(&result.messages))?;
        }
        ShellCommand::Delete { ids } => {
            let result = api.delete_books(&ids)?;
            write!(out, "{}", render_messages(&result.messages))?;
        }
        ShellCommand::Search { term } => api.set_search(term.join(" ")),
        ShellCommand::Sort { key } => {
            let key: SortKey = key.parse().map_err(BookError::InvalidInput)?;
            api.set_sort(key);
        }
        ShellCommand::Next => {
            if !api.next_page() {
                write!(out, "{}", render_messages(&[CmdMessage::warning("Already on the last page")]))?;
            }
        }
        ShellCommand::Prev => {
            if !api.prev_page() {
                write!(out, "{}", render_messages(&[CmdMessage::warning("Already on the first page")]))?;
            }
        }
        ShellCommand::Page { number } => {
            api.go_to_page(number);
        }
        ShellCommand::Refresh => {
            let result = api.refresh()?;
            write!(out, "{}", render_messages(&result.messages))?;
        }
        ShellCommand::Show { id } => {
            let result = api.get_book(id)?;
            for book in &result.affected_books {
                write!(out, "{}", render_book(book))?;
            }
            return Ok(Outcome::Continue);
        }
    }

    write!(out, "{}", render_page(&api.page(), Some(api.view())))?;
    Ok(Outcome::Continue)
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Splits a line into words. Single or double quotes group words; a
/// backslash escapes the next character.
fn split_words(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklist::model::{Book, BookDraft};
    use booklist::store::memory::InMemoryStore;

    fn session(lines: &str) -> String {
        let books = vec![
            Book::from_draft(1, BookDraft::new("Emma", "Austen", 1815)),
            Book::from_draft(2, BookDraft::new("Dune", "Herbert", 1965)),
        ];
        let api = BookApi::open(InMemoryStore::with_books(books), 5).unwrap();
        let mut out = Vec::new();
        run_with(api, lines.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn split_words_handles_quotes() {
        assert_eq!(
            split_words(r#"add "The Rust Book" 'Steve K' 2018"#).unwrap(),
            vec!["add", "The Rust Book", "Steve K", "2018"]
        );
        assert_eq!(split_words("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_words(r#"search "" x"#).unwrap(), vec!["search", "", "x"]);
        assert!(split_words("add \"open").is_err());
    }

    #[test]
    fn split_words_handles_escapes() {
        assert_eq!(
            split_words(r#"add O\'Brien"#).unwrap(),
            vec!["add", "O'Brien"]
        );
    }

    #[test]
    fn shell_add_then_list() {
        let output = session("add \"Beloved\" Morrison 1987\nquit\n");
        assert!(output.contains("Book added"));
        assert!(output.contains("Beloved"));
        assert!(output.contains("3 books"));
    }

    #[test]
    fn shell_reports_errors_and_continues() {
        let output = session("delete 42\nshow 1\nquit\n");
        assert!(output.contains("Book not found: 42"));
        assert!(output.contains("Austen"));
    }

    #[test]
    fn shell_search_and_sort() {
        let output = session("sort year\nsearch dun\nquit\n");
        assert!(output.contains("sorted by year"));
        assert!(output.contains("search \"dun\""));
        assert!(output.contains("1 book"));
    }

    #[test]
    fn shell_unknown_command() {
        let output = session("frobnicate\nquit\n");
        assert!(output.contains("error"));
    }

    #[test]
    fn shell_ends_on_eof() {
        let output = session("next\n");
        assert!(output.contains("Already on the last page"));
    }

    #[test]
    fn shell_edit_shows_prefilled_form() {
        let output = session("edit 2\nupdate 2 --year 1966\nquit\n");
        assert!(output.contains("title=\"Dune\""));
        assert!(output.contains("Book updated"));
        assert!(output.contains("1966"));
    }

    #[test]
    fn shell_update_without_fields_is_rejected() {
        let output = session("update 2\nshow 2\nquit\n");
        assert!(output.contains("nothing to update"));
        assert!(!output.contains("Book updated"));
        assert!(output.contains("1965"));
    }
}
