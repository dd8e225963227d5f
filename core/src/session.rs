//! CRUD orchestration for the book list.
//!
//! # Design
//! `LibrarySession` is a sans-IO state machine. Operations that need the
//! server return the `HttpRequest` to execute; the host hands the outcome
//! back through `complete`, which may return one follow-up request (the list
//! refresh after a successful mutation). `run` drives that loop against a
//! `Transport`.
//!
//! The session owns the only copy of the list. It is discarded and rebuilt
//! from `GET /Books` after every successful create, update or delete; records
//! are never patched locally.
//!
//! At most one request is in flight. Raw failure causes go to the log; the
//! user only ever sees the fixed messages below.

use thiserror::Error;

use crate::client::BookClient;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Book, BookId};
use crate::validation::{BookDraft, ValidationErrors};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch books. Make sure the backend is running.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save book. Please try again.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete book. Please try again.";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this book?";

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Ready(Vec<Book>),
    Error(String),
}

impl ViewState {
    pub fn books(&self) -> Option<&[Book]> {
        match self {
            ViewState::Ready(books) => Some(books),
            _ => None,
        }
    }
}

/// Which form, if any, is open. Independent of `ViewState`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    None,
    Creating {
        draft: BookDraft,
        errors: ValidationErrors,
    },
    Editing {
        book: Book,
        draft: BookDraft,
        errors: ValidationErrors,
    },
}

impl EditState {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditState::None)
    }

    pub fn draft(&self) -> Option<&BookDraft> {
        match self {
            EditState::None => None,
            EditState::Creating { draft, .. } | EditState::Editing { draft, .. } => Some(draft),
        }
    }

    /// Errors from the last rejected submit of the open form.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            EditState::None => None,
            EditState::Creating { errors, .. } | EditState::Editing { errors, .. } => Some(errors),
        }
    }
}

/// Transient, non-blocking failure notice for a mutating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SaveFailed,
    DeleteFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::SaveFailed => SAVE_FAILED_MESSAGE,
            Notice::DeleteFailed => DELETE_FAILED_MESSAGE,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Reasons an action could not be started.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("another request is still in flight")]
    Busy,

    #[error("no book form is open")]
    NoOpenForm,

    #[error("{0}")]
    Invalid(ValidationErrors),

    #[error("the book list has not failed to load")]
    NotFailed,

    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("book {0} is not in the current list")]
    UnknownBook(BookId),

    #[error("failed to build request: {0}")]
    Request(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Refresh,
    Create,
    Update(BookId),
    Delete(BookId),
}

/// Owns the displayed list and the open form for one client session.
#[derive(Debug)]
pub struct LibrarySession {
    client: BookClient,
    view: ViewState,
    edit: EditState,
    pending_delete: Option<BookId>,
    notice: Option<Notice>,
    in_flight: Option<Pending>,
}

impl LibrarySession {
    pub fn new(client: BookClient) -> Self {
        Self {
            client,
            view: ViewState::Idle,
            edit: EditState::None,
            pending_delete: None,
            notice: None,
            in_flight: None,
        }
    }

    pub fn client(&self) -> &BookClient {
        &self.client
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub fn pending_delete(&self) -> Option<BookId> {
        self.pending_delete
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The notice raised by the last failed mutation, cleared on read.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Initial load: `Idle -> Loading`.
    pub fn mount(&mut self) -> Result<HttpRequest, SessionError> {
        self.ensure_idle()?;
        Ok(self.start_refresh())
    }

    /// Re-issue the list request after a failed load.
    pub fn retry(&mut self) -> Result<HttpRequest, SessionError> {
        if !matches!(self.view, ViewState::Error(_)) {
            return Err(SessionError::NotFailed);
        }
        self.ensure_idle()?;
        Ok(self.start_refresh())
    }

    pub fn begin_create(&mut self) {
        self.edit = EditState::Creating {
            draft: BookDraft::default(),
            errors: ValidationErrors::default(),
        };
    }

    pub fn begin_edit(&mut self, book: Book) {
        self.edit = EditState::Editing {
            draft: BookDraft::from_book(&book),
            book,
            errors: ValidationErrors::default(),
        };
    }

    /// Open the edit form for a book in the currently displayed list.
    pub fn begin_edit_by_id(&mut self, id: BookId) -> Result<(), SessionError> {
        let book = self
            .view
            .books()
            .and_then(|books| books.iter().find(|b| b.id == id))
            .cloned()
            .ok_or(SessionError::UnknownBook(id))?;
        self.begin_edit(book);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::None;
    }

    /// Mutable access to the open form's values.
    pub fn draft_mut(&mut self) -> Option<&mut BookDraft> {
        match &mut self.edit {
            EditState::None => None,
            EditState::Creating { draft, .. } | EditState::Editing { draft, .. } => Some(draft),
        }
    }

    /// Validate the open form and build the create or update request.
    ///
    /// An edit form always produces an update keyed by the edited record's
    /// id; a create form always produces a create. Validation failures are
    /// kept on the form and nothing is sent.
    pub fn submit(&mut self) -> Result<HttpRequest, SessionError> {
        self.ensure_idle()?;
        let (target, draft, errors) = match &mut self.edit {
            EditState::None => return Err(SessionError::NoOpenForm),
            EditState::Creating { draft, errors } => (None, draft, errors),
            EditState::Editing { book, draft, errors } => (Some(book.id), draft, errors),
        };

        let found = draft.validate();
        if !found.is_empty() {
            tracing::debug!(errors = %found, "book form rejected");
            *errors = found.clone();
            return Err(SessionError::Invalid(found));
        }
        *errors = ValidationErrors::default();

        let (request, pending) = match target {
            Some(id) => (self.client.build_update_book(id, &draft.to_update(id))?, Pending::Update(id)),
            None => (self.client.build_create_book(&draft.to_create())?, Pending::Create),
        };
        self.in_flight = Some(pending);
        Ok(request)
    }

    /// Ask for confirmation before deleting `id`. Returns the prompt to show.
    pub fn request_delete(&mut self, id: BookId) -> &'static str {
        self.pending_delete = Some(id);
        DELETE_CONFIRMATION
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed; build the delete request.
    pub fn confirm_delete(&mut self) -> Result<HttpRequest, SessionError> {
        self.ensure_idle()?;
        let id = self.pending_delete.take().ok_or(SessionError::NoPendingDelete)?;
        self.in_flight = Some(Pending::Delete(id));
        Ok(self.client.build_delete_book(id))
    }

    /// Feed back the outcome of the in-flight request.
    ///
    /// Returns the list refresh to execute next after a successful mutation.
    pub fn complete(&mut self, outcome: Result<HttpResponse, TransportError>) -> Option<HttpRequest> {
        let Some(pending) = self.in_flight.take() else {
            tracing::warn!("response arrived with no request in flight; ignoring");
            return None;
        };
        let response = outcome.map_err(ApiError::from);

        match pending {
            Pending::Refresh => {
                let result = response.and_then(|r| self.client.parse_list_books(r));
                self.finish_refresh(result);
                None
            }
            Pending::Create => {
                // A 2xx create is saved even when the body is not a Book.
                let result = match response.and_then(|r| self.client.parse_create_book(r)) {
                    Ok(book) => {
                        tracing::info!(id = book.id, "created book");
                        Ok(())
                    }
                    Err(ApiError::DeserializationError(e)) => {
                        tracing::warn!(error = %e, "created book but could not read the reply");
                        Ok(())
                    }
                    Err(e) => Err(e),
                };
                self.finish_save(result)
            }
            Pending::Update(id) => {
                let result = response.and_then(|r| self.client.parse_update_book(r)).map(|()| {
                    tracing::info!(id, "updated book");
                });
                self.finish_save(result)
            }
            Pending::Delete(id) => {
                let result = response.and_then(|r| self.client.parse_delete_book(r));
                self.finish_delete(id, result)
            }
        }
    }

    /// Execute `request` and every follow-up it triggers.
    pub fn run<T: Transport + ?Sized>(&mut self, transport: &T, request: HttpRequest) {
        let mut next = Some(request);
        while let Some(request) = next {
            tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
            let outcome = transport.execute(&request);
            next = self.complete(outcome);
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match self.in_flight {
            Some(_) => Err(SessionError::Busy),
            None => Ok(()),
        }
    }

    fn start_refresh(&mut self) -> HttpRequest {
        self.view = ViewState::Loading;
        self.in_flight = Some(Pending::Refresh);
        self.client.build_list_books()
    }

    fn finish_refresh(&mut self, result: Result<Vec<Book>, ApiError>) {
        match result {
            Ok(books) => {
                tracing::debug!(count = books.len(), "book list loaded");
                self.view = ViewState::Ready(books);
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching books");
                self.view = ViewState::Error(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn finish_save(&mut self, result: Result<(), ApiError>) -> Option<HttpRequest> {
        match result {
            Ok(()) => {
                self.edit = EditState::None;
                Some(self.start_refresh())
            }
            Err(e) => {
                tracing::error!(error = %e, "error saving book");
                self.notice = Some(Notice::SaveFailed);
                None
            }
        }
    }

    fn finish_delete(&mut self, id: BookId, result: Result<(), ApiError>) -> Option<HttpRequest> {
        match result {
            Ok(()) => {
                tracing::info!(id, "deleted book");
                Some(self.start_refresh())
            }
            Err(e) => {
                tracing::error!(id, error = %e, "error deleting book");
                self.notice = Some(Notice::DeleteFailed);
                None
            }
        }
    }
}
