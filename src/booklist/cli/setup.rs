use booklist::config::Backend;
use booklist::view::SortKey;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Http,
    Local,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Http => Backend::Http,
            BackendArg::Local => Backend::Local,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Default,
    Author,
    Title,
    Year,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Default => SortKey::Default,
            SortArg::Author => SortKey::Author,
            SortArg::Title => SortKey::Title,
            SortArg::Year => SortKey::Year,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "booklist", bin_name = "booklist", version)]
#[command(about = "Manage a list of books against a remote API or a local store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Where books are kept (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    /// Base URL of the books API (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Books per page (overrides config)
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Search/sort/page options shared by `list` and the default command.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only books whose title contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List books, one page at a time
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a book
    #[command(alias = "a")]
    Add {
        /// Book title
        title: String,

        /// Author
        author: String,

        /// Year of publication
        #[arg(allow_hyphen_values = true)]
        year: String,
    },

    /// Show one book
    #[command(alias = "v")]
    View {
        /// Book id
        id: u64,
    },

    /// Change fields of a book; omitted fields keep their value
    #[command(alias = "e")]
    Update {
        /// Book id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New author
        #[arg(long)]
        author: Option<String>,

        /// New year of publication
        #[arg(long, allow_hyphen_values = true)]
        year: Option<String>,
    },

    /// Delete one or more books
    #[command(alias = "rm")]
    Delete {
        /// Book ids (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },

    /// Write all books as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Create books from a JSON file (an export or a plain array)
    Import {
        /// File to read
        file: std::path::PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (backend, api-url, page-size, timeout-secs)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive session
    Shell,
}
