//! library - command-line client for the Books API
//!
//! # Examples
//!
//! ```bash
//! # List all books
//! library list
//!
//! # Add a book
//! library add --title "Dune" --author "Frank Herbert"
//!
//! # Change only the description of book 3
//! library edit 3 --description "Spice, sand and prophecy."
//!
//! # Interactive session against another backend
//! LIBRARY_API_URL=http://127.0.0.1:8080/api library shell
//! ```

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use library_cli::cli::{Cli, Commands};
use library_cli::commands::{self, EditFields};
use library_cli::shell::Shell;
use library_cli::{logging, Outcome, UreqTransport};
use library_core::{BookClient, BookDraft, LibrarySession};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    tracing::debug!(api_url = %cli.api_url, timeout_secs = cli.timeout_secs, "starting");
    let transport = UreqTransport::new(Duration::from_secs(cli.timeout_secs));
    let mut session = LibrarySession::new(BookClient::new(&cli.api_url));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match cli.command {
        Commands::List => commands::list(&mut session, &transport, &mut out)?,
        Commands::Show { id } => commands::show(&session, &transport, id, &mut out)?,
        Commands::Add {
            title,
            author,
            description,
        } => commands::add(
            &mut session,
            &transport,
            BookDraft::new(title, author, description),
            &mut out,
        )?,
        Commands::Edit {
            id,
            title,
            author,
            description,
        } => {
            let fields = EditFields {
                title,
                author,
                description,
            };
            commands::edit(&mut session, &transport, id, fields, &mut out)?
        }
        Commands::Delete { id, yes } => commands::delete(&mut session, &transport, id, yes, &mut input, &mut out)?,
        Commands::Shell => {
            Shell::new(session, &transport, &mut input, &mut out).run()?;
            Outcome::Done
        }
    };
    out.flush()?;
    Ok(outcome)
}
