//! Client-side field rules for the book form.
//!
//! # Design
//! `validate` is a pure function of the three draft strings. Every field is
//! checked on every call so all problems are reported together. Rules run on
//! the trimmed value and lengths count Unicode scalar values.
//!
//! Nothing here talks to the network: a draft with errors never becomes a
//! request.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{Book, BookId, CreateBook, UpdateBook};

pub const TITLE_MIN_LEN: usize = 2;
pub const AUTHOR_MIN_LEN: usize = 2;
pub const DESCRIPTION_MIN_LEN: usize = 10;

/// A form field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Author,
    Description,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Author, Field::Description];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Description => "description",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Description => "Description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
}

impl FieldError {
    /// Human-readable message for this error on `field`.
    pub fn message(self, field: Field) -> String {
        match (self, field) {
            (FieldError::Required, field) => format!("{} is required", field.label()),
            (FieldError::TooShort { min }, Field::Description) => {
                format!("Description must be at least {min} characters if provided")
            }
            (FieldError::TooShort { min }, field) => {
                format!("{} must be at least {min} characters", field.label())
            }
        }
    }
}

/// Field-to-error mapping produced by `validate`. Empty means the draft can be
/// submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.message(field))
    }

    /// `(field, message)` pairs in title, author, description order.
    pub fn messages(&self) -> impl Iterator<Item = (Field, String)> + '_ {
        self.0.iter().map(|(field, err)| (*field, err.message(*field)))
    }

    fn insert(&mut self, field: Field, error: Option<FieldError>) {
        if let Some(error) = error {
            self.0.insert(field, error);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in self.messages() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(&message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Editable form values for creating or editing a book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }

    /// Pre-fill the form from an existing record.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> ValidationErrors {
        validate(self)
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Description => &mut self.description,
        };
        *slot = value.into();
    }

    pub fn to_create(&self) -> CreateBook {
        CreateBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }

    pub fn to_update(&self, id: BookId) -> UpdateBook {
        UpdateBook {
            id,
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Check every field of `draft` and collect all failures.
pub fn validate(draft: &BookDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.insert(Field::Title, required(&draft.title, TITLE_MIN_LEN));
    errors.insert(Field::Author, required(&draft.author, AUTHOR_MIN_LEN));
    errors.insert(Field::Description, optional(&draft.description, DESCRIPTION_MIN_LEN));
    errors
}

fn required(value: &str, min: usize) -> Option<FieldError> {
    match value.trim().chars().count() {
        0 => Some(FieldError::Required),
        len if len < min => Some(FieldError::TooShort { min }),
        _ => None,
    }
}

fn optional(value: &str, min: usize) -> Option<FieldError> {
    match value.trim().chars().count() {
        0 => None,
        len if len < min => Some(FieldError::TooShort { min }),
        _ => None,
    }
}
