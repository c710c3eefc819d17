//! MediChat is a terminal client for a medical chatbot and health-risk backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the JSON payloads exchanged with the backend.
//! - [`core`] owns runtime state: the HTTP client wrapper, the chat and
//!   health-form flows, notifications, loading state, tabs, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`utils`] holds URL helpers, transcript logging and diagnostics setup.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
