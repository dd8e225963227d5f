//! Stateless HTTP request builder and response parser for the Books API.
//!
//! # Design
//! `BookClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status is success; the backend answers PUT and DELETE with an
//! empty 204, so those parsers ignore the body.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, BookId, CreateBook, UpdateBook};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5287/api";

const JSON: &str = "application/json";

/// Synchronous, stateless client for the Books API.
#[derive(Debug, Clone)]
pub struct BookClient {
    base_url: String,
}

impl Default for BookClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl BookClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/Books", self.base_url)
    }

    fn member(&self, id: BookId) -> String {
        format!("{}/Books/{id}", self.base_url)
    }

    pub fn build_list_books(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, self.collection())
    }

    pub fn build_get_book(&self, id: BookId) -> HttpRequest {
        bodiless(HttpMethod::Get, self.member(id))
    }

    pub fn build_create_book(&self, input: &CreateBook) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(with_json_body(HttpMethod::Post, self.collection(), body))
    }

    pub fn build_update_book(&self, id: BookId, input: &UpdateBook) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(with_json_body(HttpMethod::Put, self.member(id), body))
    }

    pub fn build_delete_book(&self, id: BookId) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.member(id))
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn bodiless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: vec![("accept".to_string(), JSON.to_string())],
        body: None,
    }
}

fn with_json_body(method: HttpMethod, path: String, body: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: vec![
            ("accept".to_string(), JSON.to_string()),
            ("content-type".to_string(), JSON.to_string()),
        ],
        body: Some(body),
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
