//! Terminal client: argument parsing, rendering and the interactive shell.
//! Not part of the library API.

pub mod commands;
pub mod render;
pub mod setup;
pub mod shell;
