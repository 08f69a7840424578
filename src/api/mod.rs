//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use minijinja::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::FormOutcome,
    AppState,
};

/// Path identifier of a catalog document.
///
/// An id that is not a UUID cannot name a stored document, so it is
/// carried as `None` and each handler applies its own absence policy.
pub struct EntityId(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;

        Ok(EntityId(Uuid::parse_str(&raw).ok()))
    }
}

impl EntityId {
    /// The id, or a 404 carrying `missing`
    pub fn require(self, missing: &str) -> AppResult<Uuid> {
        self.0.ok_or_else(|| AppError::NotFound(missing.to_string()))
    }
}

/// Render a page template into an HTML response
pub(crate) fn render(state: &AppState, template: &str, ctx: Value) -> AppResult<Html<String>> {
    Ok(Html(state.templates.render(template, ctx)?))
}

/// Redirect on a successful submission, otherwise render the form again
pub(crate) fn form_response<F>(
    outcome: FormOutcome<F>,
    invalid: impl FnOnce(F) -> AppResult<Html<String>>,
) -> AppResult<Response> {
    match outcome {
        FormOutcome::Saved { url } => Ok(Redirect::to(&url).into_response()),
        FormOutcome::Invalid(form) => Ok(invalid(form)?.into_response()),
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/catalog", get(home::index))
        // Genres
        .route("/catalog/genres", get(genres::list))
        .route("/catalog/genre/create", get(genres::create_form).post(genres::create))
        .route("/catalog/genre/:id", get(genres::detail))
        .route("/catalog/genre/:id/delete", get(genres::delete_form).post(genres::delete))
        .route("/catalog/genre/:id/update", get(genres::update_form).post(genres::update))
        // Authors
        .route("/catalog/authors", get(authors::list))
        .route("/catalog/author/create", get(authors::create_form).post(authors::create))
        .route("/catalog/author/:id", get(authors::detail))
        .route("/catalog/author/:id/delete", get(authors::delete_form).post(authors::delete))
        .route("/catalog/author/:id/update", get(authors::update_form).post(authors::update))
        // Books
        .route("/catalog/books", get(books::list))
        .route("/catalog/book/create", get(books::create_form).post(books::create))
        .route("/catalog/book/:id", get(books::detail))
        .route("/catalog/book/:id/delete", get(books::delete_form).post(books::delete))
        .route("/catalog/book/:id/update", get(books::update_form).post(books::update))
        // Book instances
        .route("/catalog/bookinstances", get(book_instances::list))
        .route(
            "/catalog/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/catalog/bookinstance/:id", get(book_instances::detail))
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        )
        .with_state(state)
}
