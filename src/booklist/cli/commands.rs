//! # CLI Layer
//!
//! This module is **one possible UI client** for booklist. It is the only
//! place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `handle_*()`: Per-command handlers that call the API and print results
//!
//! Every handler opens a fresh session, so each invocation starts by loading
//! the current list from the store. `shell` keeps one session for its whole
//! lifetime instead.

use super::render::{print_messages, render_book, render_page};
use super::setup::{Cli, Commands, ListArgs};
use super::shell;
use booklist::api::{BookApi, BookPatch};
use booklist::commands::import;
use booklist::error::{BookError, Result};
use booklist::init::{initialize, BooklistContext, DynStore, Overrides};
use booklist::model::BookForm;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = Overrides {
        backend: cli.backend.map(Into::into),
        api_url: cli.api_url.clone(),
        page_size: cli.page_size,
    };
    let ctx = initialize(overrides)?;
    log::debug!(
        "data dir {}, backend {}",
        ctx.data_dir.display(),
        ctx.config.backend
    );

    match cli.command {
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Add {
            title,
            author,
            year,
        }) => handle_add(&ctx, BookForm::new(title, author, year)),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Update {
            id,
            title,
            author,
            year,
        }) => handle_update(
            &ctx,
            id,
            BookPatch {
                title,
                author,
                year,
            },
        ),
        Some(Commands::Delete { ids }) => handle_delete(&ctx, ids),
        Some(Commands::Export { output }) => handle_export(&ctx, output),
        Some(Commands::Import { file }) => handle_import(&ctx, file),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Shell) => shell::run(ctx.open_api()?),
        None => handle_list(&ctx, ListArgs::default()),
    }
}

/// Initialize logging based on verbosity flag. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn open(ctx: &BooklistContext) -> Result<BookApi<DynStore>> {
    ctx.open_api()
}

fn handle_list(ctx: &BooklistContext, args: ListArgs) -> Result<()> {
    let mut api = open(ctx)?;
    if let Some(term) = args.search {
        api.set_search(term);
    }
    if let Some(sort) = args.sort {
        api.set_sort(sort.into());
    }
    api.go_to_page(args.page);

    let result = api.current_page();
    if let Some(page) = &result.page {
        print!("{}", render_page(page, Some(api.view())));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &BooklistContext, form: BookForm) -> Result<()> {
    let mut api = open(ctx)?;
    let result = api.add_book(form)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &BooklistContext, id: u64) -> Result<()> {
    let api = open(ctx)?;
    let result = api.get_book(id)?;
    for book in &result.affected_books {
        print!("{}", render_book(book));
    }
    Ok(())
}

fn handle_update(ctx: &BooklistContext, id: u64, patch: BookPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(BookError::InvalidInput(
            "nothing to update (use --title, --author or --year)".into(),
        ));
    }
    let mut api = open(ctx)?;
    let result = api.patch_book(id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &BooklistContext, ids: Vec<u64>) -> Result<()> {
    let mut api = open(ctx)?;
    let result = api.delete_books(&ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &BooklistContext, output: Option<std::path::PathBuf>) -> Result<()> {
    let api = open(ctx)?;
    let result = api.export_books()?;
    let json = result.export.unwrap_or_default();
    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))?;
            print_messages(&result.messages);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn handle_import(ctx: &BooklistContext, file: std::path::PathBuf) -> Result<()> {
    let input = std::fs::read_to_string(&file)?;
    let drafts = import::parse(&input)?;
    let mut api = open(ctx)?;
    let result = api.import_books(drafts)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &BooklistContext, key: Option<String>, value: Option<String>) -> Result<()> {
    // Read the file itself, not ctx.config, so CLI overrides are never persisted.
    let mut config = booklist::config::BooklistConfig::load(&ctx.data_dir)?;

    match (key, value) {
        (None, _) => {
            for key in booklist::config::KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
        (Some(key), None) => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(BookError::Config(format!("Unknown config key '{}'", key)));
            }
        },
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&ctx.data_dir)?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
