//! Domain DTOs for the Books API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `Book` is server-owned: `id`, `created_at` and `updated_at` are assigned by
//! the server and only ever read here. Timestamps stay opaque strings because
//! the backend's formatting (with or without an offset) is not ours to decide.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a book.
pub type BookId = i64;

/// A single book returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request payload for creating a new book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Request payload for replacing the editable fields of an existing book.
/// `id` must match the id in the request path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
}
