//! One-shot subcommands. Each drives a fresh `LibrarySession` through a single
//! user action and prints the resulting view.

use std::io::{BufRead, Write};

use anyhow::Context;
use library_core::{ApiError, BookDraft, BookId, LibrarySession, SessionError, Transport, ViewState};

use crate::render;

/// Whether the command achieved what the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed,
}

pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch book. Make sure the backend is running.";

/// Field overrides for `edit`; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct EditFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Load the list and report whether it is ready.
pub fn load(session: &mut LibrarySession, transport: &dyn Transport) -> anyhow::Result<bool> {
    let request = session.mount()?;
    session.run(transport, request);
    Ok(matches!(session.view(), ViewState::Ready(_)))
}

pub fn list(session: &mut LibrarySession, transport: &dyn Transport, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let ready = load(session, transport)?;
    write!(out, "{}", render::view(session.view())).context("failed to write output")?;
    Ok(if ready { Outcome::Done } else { Outcome::Failed })
}

pub fn show(
    session: &LibrarySession,
    transport: &dyn Transport,
    id: BookId,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let client = session.client();
    let result = transport
        .execute(&client.build_get_book(id))
        .map_err(ApiError::from)
        .and_then(|response| client.parse_get_book(response));

    match result {
        Ok(book) => {
            write!(out, "{}", render::book(&book))?;
            Ok(Outcome::Done)
        }
        Err(ApiError::NotFound) => {
            writeln!(out, "Book {id} not found.")?;
            Ok(Outcome::Failed)
        }
        Err(e) => {
            tracing::error!(id, error = %e, "error fetching book");
            writeln!(out, "{LOOKUP_FAILED_MESSAGE}")?;
            Ok(Outcome::Failed)
        }
    }
}

pub fn add(
    session: &mut LibrarySession,
    transport: &dyn Transport,
    draft: BookDraft,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    session.begin_create();
    if let Some(slot) = session.draft_mut() {
        *slot = draft;
    }
    save(session, transport, out)
}

pub fn edit(
    session: &mut LibrarySession,
    transport: &dyn Transport,
    id: BookId,
    fields: EditFields,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    if !load(session, transport)? {
        write!(out, "{}", render::view(session.view()))?;
        return Ok(Outcome::Failed);
    }
    match session.begin_edit_by_id(id) {
        Ok(()) => {}
        Err(SessionError::UnknownBook(_)) => {
            writeln!(out, "Book {id} not found.")?;
            return Ok(Outcome::Failed);
        }
        Err(e) => return Err(e.into()),
    }
    if let Some(draft) = session.draft_mut() {
        if let Some(title) = fields.title {
            draft.title = title;
        }
        if let Some(author) = fields.author {
            draft.author = author;
        }
        if let Some(description) = fields.description {
            draft.description = description;
        }
    }
    save(session, transport, out)
}

/// Submit the open form; print field errors, the failure notice, or the
/// refreshed list.
pub fn save(session: &mut LibrarySession, transport: &dyn Transport, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let request = match session.submit() {
        Ok(request) => request,
        Err(SessionError::Invalid(errors)) => {
            write!(out, "{}", render::errors(&errors))?;
            return Ok(Outcome::Failed);
        }
        Err(e) => return Err(e.into()),
    };
    session.run(transport, request);

    if let Some(notice) = session.take_notice() {
        writeln!(out, "{notice}")?;
        return Ok(Outcome::Failed);
    }
    writeln!(out, "Book saved.")?;
    write!(out, "{}", render::view(session.view()))?;
    Ok(Outcome::Done)
}

pub fn delete(
    session: &mut LibrarySession,
    transport: &dyn Transport,
    id: BookId,
    assume_yes: bool,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let question = session.request_delete(id);
    if !assume_yes && !confirm(input, out, question)? {
        session.dismiss_delete();
        writeln!(out, "Cancelled.")?;
        return Ok(Outcome::Done);
    }

    let request = session.confirm_delete()?;
    session.run(transport, request);

    if let Some(notice) = session.take_notice() {
        writeln!(out, "{notice}")?;
        return Ok(Outcome::Failed);
    }
    writeln!(out, "Book deleted.")?;
    write!(out, "{}", render::view(session.view()))?;
    Ok(Outcome::Done)
}

/// Ask a yes/no question; anything but `y`/`yes` (including EOF) is no.
pub fn confirm(input: &mut dyn BufRead, out: &mut dyn Write, question: &str) -> anyhow::Result<bool> {
    write!(out, "{question} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer).context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
