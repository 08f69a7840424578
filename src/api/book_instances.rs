//! Book instance (copy) pages

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
    services::book_instances::BookInstanceForm,
    AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";
const NOT_FOUND: &str = "Book copy not found";

fn form_page(state: &AppState, title: &str, form: BookInstanceForm) -> AppResult<Html<String>> {
    render(
        state,
        "bookinstance_form.html",
        context! {
            title,
            book_list => form.book_list,
            statuses => form.statuses,
            bookinstance => form.bookinstance,
            errors => form.errors,
        },
    )
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let bookinstance_list = state.services.book_instances.list().await?;
    render(
        &state,
        "bookinstance_list.html",
        context! { title => "Book Instance List", bookinstance_list },
    )
}

pub async fn detail(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let detail = state.services.book_instances.detail(id.require(NOT_FOUND)?).await?;
    render(
        &state,
        "bookinstance_detail.html",
        context! { title => "Book Instance", bookinstance => detail.bookinstance, book => detail.book },
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let form = state.services.book_instances.create_form().await?;
    form_page(&state, "Create BookInstance", form)
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.create(&FormFields::from(pairs)).await?;
    form_response(outcome, |form| form_page(&state, "Create BookInstance", form))
}

pub async fn delete_form(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    let Some(id) = id.0 else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.book_instances.delete_page(id).await? {
        Some(detail) => Ok(render(
            &state,
            "bookinstance_delete.html",
            context! {
                title => "Delete BookInstance",
                bookinstance => detail.bookinstance,
                book => detail.book,
            },
        )?
        .into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

/// Copies have no dependents, so every submission ends on the list
pub async fn delete(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    if let Some(id) = id.0 {
        state.services.book_instances.delete(id).await?;
    }
    Ok(Redirect::to(LIST_URL).into_response())
}

pub async fn update_form(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let form = state
        .services
        .book_instances
        .update_form(id.require(NOT_FOUND)?)
        .await?;
    form_page(&state, "Update BookInstance", form)
}

pub async fn update(
    State(state): State<AppState>,
    id: EntityId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = id.require(NOT_FOUND)?;
    let outcome = state
        .services
        .book_instances
        .update(id, &FormFields::from(pairs))
        .await?;
    form_response(outcome, |form| form_page(&state, "Update BookInstance", form))
}
