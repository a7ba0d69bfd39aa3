//! # Booklist Architecture
//!
//! Booklist manages a list of book records (create, read, update, delete,
//! search, sort, paginate) kept either behind a remote HTTP API or in a local
//! JSON store. The library holds all behavior; the `booklist` binary is a thin
//! terminal client on top of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, interactive shell      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Session: store + shelf + view state                      │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Store call first, shelf action on success                │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Shelf + View (shelf, view)   │ │  Storage Layer (store/)   │
//! │  - Reducer over Vec<Book>     │ │  - BookStore trait        │
//! │  - filter → sort → paginate   │ │  - Http, File, InMemory   │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Update Discipline
//!
//! Local state changes only after the store has accepted a change. A failed
//! store call is logged and returned as an error; the shelf is not touched,
//! so there is never anything to roll back.
//!
//! ## Module Overview
//!
//! - [`api`]: Session facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`shelf`]: The id-ordered, id-unique in-memory list and its actions
//! - [`view`]: Search, sort and pagination
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Book`, `BookDraft`, `BookForm`
//! - [`config`]: Configuration file
//! - [`init`]: Resolves data dir, config and store for a client
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod shelf;
pub mod store;
pub mod view;
