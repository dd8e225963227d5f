//! In-memory stand-in for the Books REST backend.
//!
//! Serves `/api/Books` with server-assigned integer ids and timestamps:
//! POST answers 201 with the created record, PUT and DELETE answer an empty
//! 204, and a PUT whose body id differs from the path id is a 400.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default)]
pub struct Store {
    books: BTreeMap<i64, Book>,
    last_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let books = Router::new()
        .route("/Books", get(list_books).post(create_book))
        .route("/Books/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(db);
    Router::new().nest("/api", books)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let store = db.read().await;
    Json(store.books.values().cloned().collect())
}

async fn create_book(State(db): State<Db>, Json(input): Json<CreateBook>) -> (StatusCode, Json<Book>) {
    let mut store = db.write().await;
    store.last_id += 1;
    let now = Utc::now();
    let book = Book {
        id: store.last_id,
        title: input.title,
        author: input.author,
        description: input.description,
        created_at: now,
        updated_at: now,
    };
    store.books.insert(book.id, book.clone());
    tracing::info!(id = book.id, "book created");
    (StatusCode::CREATED, Json(book))
}

async fn get_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Book>, StatusCode> {
    let store = db.read().await;
    store.books.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateBook>,
) -> Result<StatusCode, StatusCode> {
    if input.id != id {
        tracing::warn!(path_id = id, body_id = input.id, "update id mismatch");
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let book = store.books.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    book.title = input.title;
    book.author = input.author;
    book.description = input.description;
    book.updated_at = Utc::now();
    tracing::info!(id, "book updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.books.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::info!(id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_camel_case() {
        let now = Utc::now();
        let book = Book {
            id: 1,
            title: "Test".to_string(),
            author: "Author".to_string(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn create_book_defaults_description() {
        let input: CreateBook = serde_json::from_str(r#"{"title":"Dune","author":"Frank Herbert"}"#).unwrap();
        assert_eq!(input.description, "");
    }

    #[test]
    fn create_book_rejects_missing_author() {
        let result: Result<CreateBook, _> = serde_json::from_str(r#"{"title":"Dune"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_book_requires_id() {
        let result: Result<UpdateBook, _> = serde_json::from_str(r#"{"title":"Dune","author":"Frank Herbert"}"#);
        assert!(result.is_err());
    }
}
