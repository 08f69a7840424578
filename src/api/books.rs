//! Book pages

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
        books::{BookDelete, BookForm},
        DeleteOutcome,
    },
    AppState,
};

const LIST_URL: &str = "/catalog/books";
const NOT_FOUND: &str = "Book not found";

fn form_page(state: &AppState, title: &str, form: BookForm) -> AppResult<Html<String>> {
    render(
        state,
        "book_form.html",
        context! {
            title,
            authors => form.authors,
            genres => form.genres,
            book => form.book,
            errors => form.errors,
        },
    )
}

fn delete_page(state: &AppState, page: BookDelete) -> AppResult<Response> {
    Ok(render(
        state,
        "book_delete.html",
        context! {
            title => "Delete Book",
            book => page.book,
            author => page.author,
            book_instances => page.book_instances,
            blocked => page.blocked,
        },
    )?
    .into_response())
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let book_list = state.services.books.list().await?;
    render(&state, "book_list.html", context! { title => "Book List", book_list })
}

pub async fn detail(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let detail = state.services.books.detail(id.require(NOT_FOUND)?).await?;
    render(
        &state,
        "book_detail.html",
        context! {
            title => "Book Detail",
            book => detail.book,
            author => detail.author,
            genres => detail.genres,
            book_instances => detail.book_instances,
        },
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let form = state.services.books.create_form().await?;
    form_page(&state, "Create Book", form)
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let outcome = state.services.books.create(&FormFields::from(pairs)).await?;
    form_response(outcome, |form| form_page(&state, "Create Book", form))
}

pub async fn delete_form(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    let Some(id) = id.0 else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.books.delete_page(id).await? {
        Some(page) => delete_page(&state, page),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    let Some(id) = id.0 else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.books.delete(id).await? {
        DeleteOutcome::Blocked(page) => delete_page(&state, page),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn update_form(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let form = state.services.books.update_form(id.require(NOT_FOUND)?).await?;
    form_page(&state, "Update Book", form)
}

pub async fn update(
    State(state): State<AppState>,
    id: EntityId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = id.require(NOT_FOUND)?;
    let outcome = state.services.books.update(id, &FormFields::from(pairs)).await?;
    form_response(outcome, |form| form_page(&state, "Update Book", form))
}
