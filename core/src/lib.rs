//! Synchronous client core for the Books library API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), validates book form input,
//! and orchestrates list/create/edit/delete flows in `LibrarySession`.
//!
//! # Design
//! - `BookClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `LibrarySession` owns the displayed list and re-fetches it after every
//!   successful mutation. Hosts plug in a `Transport` to execute requests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod types;
pub mod validation;

pub use client::{BookClient, DEFAULT_BASE_URL};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use session::{EditState, LibrarySession, Notice, SessionError, ViewState};
pub use types::{Book, BookId, CreateBook, UpdateBook};
pub use validation::{validate, BookDraft, Field, FieldError, ValidationErrors};
