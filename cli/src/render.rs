//! Plain-text views of the session state.

use chrono::{DateTime, NaiveDateTime};
use library_core::{Book, EditState, ValidationErrors, ViewState};

pub const LOADING: &str = "Loading books...";
pub const EMPTY_TITLE: &str = "No Books Found";
pub const EMPTY_HINT: &str = "Start by adding your first book to the library!";

pub fn view(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => format!("{LOADING}\n"),
        ViewState::Error(message) => format!("Error\n{message}\n"),
        ViewState::Ready(books) if books.is_empty() => format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n"),
        ViewState::Ready(books) => books.iter().map(book).collect::<Vec<_>>().join("\n"),
    }
}

pub fn book(book: &Book) -> String {
    let mut out = format!("#{} {}\n    by {}\n", book.id, book.title, book.author);
    if let Some(description) = book.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("    {description}\n"));
    }
    out.push_str(&format!("    Added: {}\n", added_date(&book.created_at)));
    out
}

/// Calendar date of a server timestamp, or the raw value if it is not one we
/// recognise. The backend may omit the UTC offset.
pub fn added_date(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.date_naive().to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.date().to_string();
    }
    timestamp.to_string()
}

pub fn form_title(edit: &EditState) -> &'static str {
    match edit {
        EditState::Editing { .. } => "Edit Book",
        _ => "Add New Book",
    }
}

pub fn errors(errors: &ValidationErrors) -> String {
    errors
        .messages()
        .map(|(field, message)| format!("  {field}: {message}\n"))
        .collect()
}
