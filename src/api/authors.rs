//! Author pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;

use super::{form_response, render, EntityId};
use crate::{
    error::AppResult,
    forms::FormFields,
    services::{
        authors::{AuthorDetail, AuthorForm},
        DeleteOutcome,
    },
    AppState,
};

const LIST_URL: &str = "/catalog/authors";
const NOT_FOUND: &str = "Author not found";

fn form_page(state: &AppState, title: &str, form: AuthorForm) -> AppResult<Html<String>> {
    render(
        state,
        "author_form.html",
        context! { title, author => form.author, errors => form.errors },
    )
}

fn delete_page(state: &AppState, detail: AuthorDetail) -> AppResult<Response> {
    Ok(render(
        state,
        "author_delete.html",
        context! { title => "Delete Author", author => detail.author, author_books => detail.author_books },
    )?
    .into_response())
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let author_list = state.services.authors.list().await?;
    render(&state, "author_list.html", context! { title => "Author List", author_list })
}

pub async fn detail(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let detail = state.services.authors.detail(id.require(NOT_FOUND)?).await?;
    render(
        &state,
        "author_detail.html",
        context! { title => "Author Detail", author => detail.author, author_books => detail.author_books },
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    form_page(&state, "Create Author", state.services.authors.create_form())
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let outcome = state.services.authors.create(&FormFields::from(pairs)).await?;
    form_response(outcome, |form| form_page(&state, "Create Author", form))
}

pub async fn delete_form(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    let Some(id) = id.0 else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.authors.delete_page(id).await? {
        Some(detail) => delete_page(&state, detail),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    let Some(id) = id.0 else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Blocked(detail) => delete_page(&state, detail),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn update_form(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let form = state.services.authors.update_form(id.require(NOT_FOUND)?).await?;
    form_page(&state, "Update Author", form)
}

pub async fn update(
    State(state): State<AppState>,
    id: EntityId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = id.require(NOT_FOUND)?;
    let outcome = state.services.authors.update(id, &FormFields::from(pairs)).await?;
    form_response(outcome, |form| form_page(&state, "Update Author", form))
}
