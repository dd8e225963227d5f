//! Terminal host for `library-core`.
//!
//! Executes the core's requests with a blocking ureq agent, renders the
//! session state as text and asks for confirmation before deletes.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod shell;
pub mod transport;

pub use commands::Outcome;
pub use transport::UreqTransport;
